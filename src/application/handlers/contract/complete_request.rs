//! CompleteRequestHandler - the running work is finished.

use std::sync::Arc;

use crate::domain::contract::RequestStatus;
use crate::domain::foundation::{AuthenticatedUser, ContractRequestId, DomainError};
use crate::ports::{ContractRepository, ContractRequestRepository};

#[derive(Debug, Clone)]
pub struct CompleteRequestCommand {
    pub request_id: ContractRequestId,
}

pub struct CompleteRequestHandler {
    contracts: Arc<dyn ContractRepository>,
    requests: Arc<dyn ContractRequestRepository>,
}

impl CompleteRequestHandler {
    pub fn new(
        contracts: Arc<dyn ContractRepository>,
        requests: Arc<dyn ContractRequestRepository>,
    ) -> Self {
        Self { contracts, requests }
    }

    /// The supplier doing the work or the contract owner may complete.
    pub async fn handle(
        &self,
        cmd: CompleteRequestCommand,
        actor: &AuthenticatedUser,
    ) -> Result<(), DomainError> {
        let request = self
            .requests
            .find_by_id(&cmd.request_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Contract request", cmd.request_id))?;

        let contract = self
            .contracts
            .find_by_id(&request.contract_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Contract", request.contract_id))?;

        let is_supplier = actor.is_self(&request.supplier_id);
        let is_owner_side = actor.can_act_for(&contract.owner_id);
        if !is_supplier && !is_owner_side {
            return Err(DomainError::forbidden("Cannot complete this request"));
        }
        if !request.status.can_become(RequestStatus::Completed) {
            return Err(DomainError::invalid_transition(request.status, RequestStatus::Completed));
        }

        self.requests
            .update_status(&cmd.request_id, RequestStatus::Ongoing, RequestStatus::Completed)
            .await?;

        tracing::info!(request_id = %request.id, "contract request completed");
        Ok(())
    }
}
