//! Contract handlers - the supplier bidding workflow.
//!
//! Owner-side: post, update, delete, approve/reject bids, mark paid.
//! Supplier-side: browse open contracts, submit bids, complete work.

mod approve_request;
mod complete_request;
mod create_contract;
mod delete_contract;
mod get_contract;
mod list_contracts;
mod list_requests;
mod mark_contract_paid;
mod reject_request;
mod submit_request;
mod update_contract;

pub use approve_request::{ApproveRequestCommand, ApproveRequestHandler};
pub use complete_request::{CompleteRequestCommand, CompleteRequestHandler};
pub use create_contract::{CreateContractCommand, CreateContractHandler};
pub use delete_contract::{DeleteContractCommand, DeleteContractHandler};
pub use get_contract::{GetContractHandler, GetContractQuery};
pub use list_contracts::{ListContractsHandler, ListMyContractsQuery, ListOpenContractsQuery};
pub use list_requests::{ListContractRequestsQuery, ListMyRequestsQuery, ListRequestsHandler};
pub use mark_contract_paid::{MarkContractPaidCommand, MarkContractPaidHandler};
pub use reject_request::{RejectRequestCommand, RejectRequestHandler};
pub use submit_request::{SubmitRequestCommand, SubmitRequestHandler};
pub use update_contract::{UpdateContractCommand, UpdateContractHandler};
