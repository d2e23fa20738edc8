//! PostgreSQL adapters - database implementations for repository ports.
//!
//! One repository per aggregate, all sharing a `PgPool`. Multi-step
//! writes (checkout, payment application, request approval) run inside
//! transactions in their owning repository.

mod contract_repository;
mod contract_request_repository;
mod invoice_repository;
mod order_repository;
mod payment_repository;
mod product_repository;
mod store_repository;
mod ticket_repository;
mod upload_repository;
mod user_repository;

pub use contract_repository::PostgresContractRepository;
pub use contract_request_repository::PostgresContractRequestRepository;
pub use invoice_repository::PostgresInvoiceRepository;
pub use order_repository::PostgresOrderRepository;
pub use payment_repository::PostgresPaymentRepository;
pub use product_repository::PostgresProductRepository;
pub use store_repository::PostgresStoreRepository;
pub use ticket_repository::PostgresTicketRepository;
pub use upload_repository::PostgresUploadRepository;
pub use user_repository::PostgresUserRepository;

pub(crate) use invoice_repository::insert_invoice;

use crate::domain::foundation::DomainError;

/// Maps a sqlx error into a domain database error with context.
pub(crate) fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    DomainError::database(format!("{}: {}", context, e))
}
