//! Ports - interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the application core and the outside world. Adapters implement them.

mod contract_repository;
mod contract_request_repository;
mod file_store;
mod invoice_repository;
mod order_repository;
mod password_hasher;
mod payment_repository;
mod product_repository;
mod session_validator;
mod store_repository;
mod ticket_repository;
mod upload_repository;
mod user_repository;

pub use contract_repository::ContractRepository;
pub use contract_request_repository::ContractRequestRepository;
pub use file_store::{FileStore, StoredFile};
pub use invoice_repository::InvoiceRepository;
pub use order_repository::OrderRepository;
pub use password_hasher::PasswordHasher;
pub use payment_repository::PaymentRepository;
pub use product_repository::ProductRepository;
pub use session_validator::{IssuedToken, SessionValidator, TokenIssuer};
pub use store_repository::StoreRepository;
pub use ticket_repository::TicketRepository;
pub use upload_repository::UploadRepository;
pub use user_repository::UserRepository;
