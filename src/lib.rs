//! Tradehub - Multi-tenant E-commerce Platform API
//!
//! This crate implements a REST backend for stores, product catalogs,
//! checkout with invoicing, payments, supplier contract bidding,
//! support tickets, and file uploads.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
