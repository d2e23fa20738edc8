//! Contract HTTP adapter.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::ContractAppState;
pub use routes::{contract_routes, request_routes};
