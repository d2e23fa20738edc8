//! Contract and contract-request aggregates - the supplier bidding
//! workflow.
//!
//! An owner posts a contract; suppliers submit requests carrying a
//! counter-offer; the owner approves one (which closes the contract to
//! further bidding and rejects the other pending requests), the winning
//! supplier completes the work, and the owner finally marks the contract
//! paid.

mod aggregate;
mod request;

pub use aggregate::Contract;
pub use request::{ContractRequest, RequestStatus};
