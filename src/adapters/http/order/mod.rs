//! Order HTTP adapter.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::OrderAppState;
pub use routes::order_routes;
