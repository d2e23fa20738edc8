//! MarkContractPaidHandler - settle a finished contract.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, ContractId, DomainError};
use crate::ports::{ContractRepository, ContractRequestRepository};

#[derive(Debug, Clone)]
pub struct MarkContractPaidCommand {
    pub contract_id: ContractId,
}

pub struct MarkContractPaidHandler {
    contracts: Arc<dyn ContractRepository>,
    requests: Arc<dyn ContractRequestRepository>,
}

impl MarkContractPaidHandler {
    pub fn new(
        contracts: Arc<dyn ContractRepository>,
        requests: Arc<dyn ContractRequestRepository>,
    ) -> Self {
        Self { contracts, requests }
    }

    /// Payment presupposes finished work: some request on the contract
    /// must be completed.
    pub async fn handle(
        &self,
        cmd: MarkContractPaidCommand,
        actor: &AuthenticatedUser,
    ) -> Result<(), DomainError> {
        let contract = self
            .contracts
            .find_by_id(&cmd.contract_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Contract", cmd.contract_id))?;

        if !actor.can_act_for(&contract.owner_id) {
            return Err(DomainError::forbidden("Only the contract owner can mark it paid"));
        }
        if contract.paid {
            return Err(DomainError::conflict("Contract is already paid"));
        }
        if !self.requests.has_completed_request(&cmd.contract_id).await? {
            return Err(DomainError::conflict(
                "Contract has no completed request to pay for",
            ));
        }

        self.contracts.mark_paid(&cmd.contract_id).await?;

        tracing::info!(contract_id = %contract.id, "contract marked paid");
        Ok(())
    }
}
