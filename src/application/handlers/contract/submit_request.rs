//! SubmitRequestHandler - a supplier bids on a contract.

use std::sync::Arc;

use crate::domain::contract::ContractRequest;
use crate::domain::foundation::{AuthenticatedUser, ContractId, DomainError, Money};
use crate::ports::{ContractRepository, ContractRequestRepository};

#[derive(Debug, Clone)]
pub struct SubmitRequestCommand {
    pub contract_id: ContractId,
    pub message: String,
    pub counter_offer: Money,
}

pub struct SubmitRequestHandler {
    contracts: Arc<dyn ContractRepository>,
    requests: Arc<dyn ContractRequestRepository>,
}

impl SubmitRequestHandler {
    pub fn new(
        contracts: Arc<dyn ContractRepository>,
        requests: Arc<dyn ContractRequestRepository>,
    ) -> Self {
        Self { contracts, requests }
    }

    pub async fn handle(
        &self,
        cmd: SubmitRequestCommand,
        actor: &AuthenticatedUser,
    ) -> Result<ContractRequest, DomainError> {
        if !actor.can_submit_request() {
            return Err(DomainError::forbidden("Only suppliers can bid on contracts"));
        }

        let contract = self
            .contracts
            .find_by_id(&cmd.contract_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Contract", cmd.contract_id))?;

        if actor.is_self(&contract.owner_id) {
            return Err(DomainError::forbidden("Cannot bid on your own contract"));
        }
        if !contract.accepts_requests() {
            return Err(DomainError::conflict("Contract is no longer open for bidding"));
        }
        if self
            .requests
            .has_active_request(&cmd.contract_id, &actor.id)
            .await?
        {
            return Err(DomainError::conflict(
                "You already have an active request on this contract",
            ));
        }

        let request =
            ContractRequest::submit(cmd.contract_id, actor.id, cmd.message, cmd.counter_offer)?;
        self.requests.save(&request).await?;

        tracing::info!(
            contract_id = %cmd.contract_id,
            request_id = %request.id,
            counter_offer = %request.counter_offer,
            "supplier submitted contract request"
        );
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{
        MockContractRepository, MockContractRequestRepository,
    };
    use crate::domain::contract::{Contract, RequestStatus};
    use crate::domain::foundation::{ErrorCode, Role, StoreId, UserId};
    use chrono::NaiveDate;

    fn contract(owner_id: UserId) -> Contract {
        Contract::post(
            StoreId::new(),
            owner_id,
            "Refit",
            "",
            Money::from_cents(500_000),
            NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
        )
        .unwrap()
    }

    fn supplier() -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new(), "s@example.com", Role::Supplier, None)
    }

    fn cmd(contract_id: ContractId) -> SubmitRequestCommand {
        SubmitRequestCommand {
            contract_id,
            message: "Can start next week".to_string(),
            counter_offer: Money::from_cents(450_000),
        }
    }

    #[tokio::test]
    async fn supplier_submits_pending_request() {
        let c = contract(UserId::new());
        let requests = Arc::new(MockContractRequestRepository::new());
        let handler = SubmitRequestHandler::new(
            Arc::new(MockContractRepository::new().with_contract(c.clone())),
            requests.clone(),
        );

        let request = handler.handle(cmd(c.id), &supplier()).await.unwrap();
        assert_eq!(request.status, RequestStatus::Pending);
        assert!(!request.owner_approved);
        assert_eq!(requests.saved_requests().len(), 1);
    }

    #[tokio::test]
    async fn owner_cannot_bid_on_own_contract() {
        let actor = AuthenticatedUser::new(UserId::new(), "o@example.com", Role::Supplier, None);
        let c = contract(actor.id);
        let handler = SubmitRequestHandler::new(
            Arc::new(MockContractRepository::new().with_contract(c.clone())),
            Arc::new(MockContractRequestRepository::new()),
        );

        let err = handler.handle(cmd(c.id), &actor).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn closed_contract_rejects_bids() {
        let mut c = contract(UserId::new());
        c.close_bidding();
        let handler = SubmitRequestHandler::new(
            Arc::new(MockContractRepository::new().with_contract(c.clone())),
            Arc::new(MockContractRequestRepository::new()),
        );

        let err = handler.handle(cmd(c.id), &supplier()).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[tokio::test]
    async fn second_active_request_is_a_conflict() {
        let c = contract(UserId::new());
        let actor = supplier();
        let handler = SubmitRequestHandler::new(
            Arc::new(MockContractRepository::new().with_contract(c.clone())),
            Arc::new(MockContractRequestRepository::new()),
        );

        handler.handle(cmd(c.id), &actor).await.unwrap();
        let err = handler.handle(cmd(c.id), &actor).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[tokio::test]
    async fn customer_cannot_bid() {
        let c = contract(UserId::new());
        let customer = AuthenticatedUser::new(UserId::new(), "c@example.com", Role::Customer, None);
        let handler = SubmitRequestHandler::new(
            Arc::new(MockContractRepository::new().with_contract(c.clone())),
            Arc::new(MockContractRequestRepository::new()),
        );

        let err = handler.handle(cmd(c.id), &customer).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn zero_counter_offer_is_rejected() {
        let c = contract(UserId::new());
        let handler = SubmitRequestHandler::new(
            Arc::new(MockContractRepository::new().with_contract(c.clone())),
            Arc::new(MockContractRequestRepository::new()),
        );

        let mut command = cmd(c.id);
        command.counter_offer = Money::ZERO;
        let err = handler.handle(command, &supplier()).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationFailed);
    }
}
