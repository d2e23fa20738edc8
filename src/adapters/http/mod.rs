//! HTTP adapters - REST API implementation.
//!
//! Each domain module has its own HTTP adapter (`dto` / `handlers` /
//! `routes`); `router` assembles them into the application.

pub mod catalog;
pub mod contract;
pub mod error;
pub mod identity;
pub mod invoice;
pub mod middleware;
pub mod order;
pub mod payment;
pub mod router;
pub mod store;
pub mod ticket;
pub mod upload;

pub use router::{build_router, AppContext};
