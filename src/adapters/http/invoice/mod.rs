//! Invoice HTTP adapter.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::InvoiceAppState;
pub use routes::invoice_routes;
