//! UpdateContractHandler.
//!
//! Edits are only allowed while no bid is running; changing the terms
//! under an approved supplier would rewrite an agreement in flight.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::contract::Contract;
use crate::domain::foundation::{AuthenticatedUser, ContractId, DomainError, Money, Timestamp};
use crate::ports::{ContractRepository, ContractRequestRepository};

#[derive(Debug, Clone)]
pub struct UpdateContractCommand {
    pub contract_id: ContractId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub amount: Option<Money>,
    pub starts_on: Option<NaiveDate>,
    pub ends_on: Option<NaiveDate>,
}

pub struct UpdateContractHandler {
    contracts: Arc<dyn ContractRepository>,
    requests: Arc<dyn ContractRequestRepository>,
}

impl UpdateContractHandler {
    pub fn new(
        contracts: Arc<dyn ContractRepository>,
        requests: Arc<dyn ContractRequestRepository>,
    ) -> Self {
        Self { contracts, requests }
    }

    pub async fn handle(
        &self,
        cmd: UpdateContractCommand,
        actor: &AuthenticatedUser,
    ) -> Result<Contract, DomainError> {
        let mut contract = self
            .contracts
            .find_by_id(&cmd.contract_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Contract", cmd.contract_id))?;

        if !actor.can_act_for(&contract.owner_id) {
            return Err(DomainError::forbidden("Only the contract owner can edit it"));
        }
        self.ensure_no_running_work(&contract).await?;

        if let Some(title) = cmd.title {
            if title.trim().is_empty() {
                return Err(DomainError::validation("title", "Contract title cannot be empty"));
            }
            contract.title = title;
        }
        if let Some(description) = cmd.description {
            contract.description = description;
        }
        if let Some(amount) = cmd.amount {
            if !amount.is_positive() {
                return Err(DomainError::validation("amount", "Contract amount must be positive"));
            }
            contract.amount = amount;
        }
        if let Some(starts_on) = cmd.starts_on {
            contract.starts_on = starts_on;
        }
        if let Some(ends_on) = cmd.ends_on {
            contract.ends_on = ends_on;
        }
        if contract.ends_on < contract.starts_on {
            return Err(DomainError::validation(
                "ends_on",
                "Contract end date cannot be before its start date",
            ));
        }

        contract.updated_at = Timestamp::now();
        self.contracts.update(&contract).await?;
        Ok(contract)
    }

    async fn ensure_no_running_work(&self, contract: &Contract) -> Result<(), DomainError> {
        let requests = self.requests.list_for_contract(&contract.id).await?;
        if requests
            .iter()
            .any(|r| r.status == crate::domain::contract::RequestStatus::Ongoing)
        {
            return Err(DomainError::conflict(
                "Contract has an ongoing request and cannot be edited",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{
        MockContractRepository, MockContractRequestRepository,
    };
    use crate::domain::contract::ContractRequest;
    use crate::domain::foundation::{ErrorCode, Role, StoreId, UserId};

    fn contract(owner_id: UserId) -> Contract {
        Contract::post(
            StoreId::new(),
            owner_id,
            "Refit",
            "",
            Money::from_cents(100_000),
            NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
        )
        .unwrap()
    }

    fn no_field_cmd(contract_id: ContractId) -> UpdateContractCommand {
        UpdateContractCommand {
            contract_id,
            title: None,
            description: None,
            amount: None,
            starts_on: None,
            ends_on: None,
        }
    }

    #[tokio::test]
    async fn owner_raises_the_budget() {
        let owner_id = UserId::new();
        let c = contract(owner_id);
        let handler = UpdateContractHandler::new(
            Arc::new(MockContractRepository::new().with_contract(c.clone())),
            Arc::new(MockContractRequestRepository::new()),
        );
        let owner = AuthenticatedUser::new(owner_id, "o@example.com", Role::Owner, None);

        let mut cmd = no_field_cmd(c.id);
        cmd.amount = Some(Money::from_cents(150_000));
        let updated = handler.handle(cmd, &owner).await.unwrap();
        assert_eq!(updated.amount, Money::from_cents(150_000));
    }

    #[tokio::test]
    async fn edit_blocked_while_a_request_is_ongoing() {
        let owner_id = UserId::new();
        let c = contract(owner_id);
        let mut request =
            ContractRequest::submit(c.id, UserId::new(), "bid", Money::from_cents(1)).unwrap();
        request.approve().unwrap();

        let handler = UpdateContractHandler::new(
            Arc::new(MockContractRepository::new().with_contract(c.clone())),
            Arc::new(MockContractRequestRepository::new().with_request(request)),
        );
        let owner = AuthenticatedUser::new(owner_id, "o@example.com", Role::Owner, None);

        let mut cmd = no_field_cmd(c.id);
        cmd.title = Some("Bigger refit".to_string());
        let err = handler.handle(cmd, &owner).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[tokio::test]
    async fn inverted_dates_after_edit_are_rejected() {
        let owner_id = UserId::new();
        let c = contract(owner_id);
        let handler = UpdateContractHandler::new(
            Arc::new(MockContractRepository::new().with_contract(c.clone())),
            Arc::new(MockContractRequestRepository::new()),
        );
        let owner = AuthenticatedUser::new(owner_id, "o@example.com", Role::Owner, None);

        let mut cmd = no_field_cmd(c.id);
        cmd.ends_on = Some(NaiveDate::from_ymd_opt(2026, 8, 1).unwrap());
        let err = handler.handle(cmd, &owner).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationFailed);
    }
}
