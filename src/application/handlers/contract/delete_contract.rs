//! DeleteContractHandler - soft delete, blocked while work is running.

use std::sync::Arc;

use crate::domain::contract::RequestStatus;
use crate::domain::foundation::{AuthenticatedUser, ContractId, DomainError};
use crate::ports::{ContractRepository, ContractRequestRepository};

#[derive(Debug, Clone)]
pub struct DeleteContractCommand {
    pub contract_id: ContractId,
}

pub struct DeleteContractHandler {
    contracts: Arc<dyn ContractRepository>,
    requests: Arc<dyn ContractRequestRepository>,
}

impl DeleteContractHandler {
    pub fn new(
        contracts: Arc<dyn ContractRepository>,
        requests: Arc<dyn ContractRequestRepository>,
    ) -> Self {
        Self { contracts, requests }
    }

    pub async fn handle(
        &self,
        cmd: DeleteContractCommand,
        actor: &AuthenticatedUser,
    ) -> Result<(), DomainError> {
        let mut contract = self
            .contracts
            .find_by_id(&cmd.contract_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Contract", cmd.contract_id))?;

        if !actor.can_act_for(&contract.owner_id) {
            return Err(DomainError::forbidden("Only the contract owner can delete it"));
        }

        let requests = self.requests.list_for_contract(&cmd.contract_id).await?;
        if requests.iter().any(|r| r.status == RequestStatus::Ongoing) {
            return Err(DomainError::conflict(
                "Contract has an ongoing request and cannot be deleted",
            ));
        }

        contract.soft_delete();
        self.contracts.update(&contract).await?;

        tracing::info!(contract_id = %contract.id, "soft-deleted contract");
        Ok(())
    }
}
