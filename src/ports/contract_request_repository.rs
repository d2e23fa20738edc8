//! Contract request persistence port.

use async_trait::async_trait;

use crate::domain::contract::{ContractRequest, RequestStatus};
use crate::domain::foundation::{ContractId, ContractRequestId, DomainError, Page, PageQuery, UserId};

/// Persistent storage for supplier bids.
#[async_trait]
pub trait ContractRequestRepository: Send + Sync {
    async fn save(&self, request: &ContractRequest) -> Result<(), DomainError>;

    async fn find_by_id(
        &self,
        id: &ContractRequestId,
    ) -> Result<Option<ContractRequest>, DomainError>;

    async fn list_for_contract(
        &self,
        contract_id: &ContractId,
    ) -> Result<Vec<ContractRequest>, DomainError>;

    async fn list_by_supplier(
        &self,
        supplier_id: &UserId,
        page: &PageQuery,
    ) -> Result<Page<ContractRequest>, DomainError>;

    /// True when the supplier already has a pending or ongoing request on
    /// the contract.
    async fn has_active_request(
        &self,
        contract_id: &ContractId,
        supplier_id: &UserId,
    ) -> Result<bool, DomainError>;

    /// Approves one request in a single transaction: the request goes
    /// `Pending → Ongoing` with `owner_approved` set, the contract closes
    /// to further bidding, and every sibling pending request is rejected.
    /// Fails with a conflict (and writes nothing) if the request is no
    /// longer pending.
    async fn approve(
        &self,
        id: &ContractRequestId,
        contract_id: &ContractId,
    ) -> Result<(), DomainError>;

    /// Moves a request from `from` to `to`, predicated on the current
    /// status; zero affected rows surfaces as a conflict.
    async fn update_status(
        &self,
        id: &ContractRequestId,
        from: RequestStatus,
        to: RequestStatus,
    ) -> Result<(), DomainError>;

    /// True when the contract has at least one completed request.
    async fn has_completed_request(&self, contract_id: &ContractId) -> Result<bool, DomainError>;
}
