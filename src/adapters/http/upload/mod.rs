//! Upload HTTP adapter.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::UploadAppState;
pub use routes::upload_routes;
