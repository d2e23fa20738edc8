//! Identity HTTP adapter.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::IdentityAppState;
pub use routes::{auth_routes, user_routes};
