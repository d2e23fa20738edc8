//! Ticket HTTP adapter.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::TicketAppState;
pub use routes::ticket_routes;
