//! Store HTTP adapter.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::StoreAppState;
pub use routes::store_routes;
