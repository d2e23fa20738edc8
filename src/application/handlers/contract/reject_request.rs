//! RejectRequestHandler - the owner declines a bid.

use std::sync::Arc;

use crate::domain::contract::RequestStatus;
use crate::domain::foundation::{AuthenticatedUser, ContractRequestId, DomainError};
use crate::ports::{ContractRepository, ContractRequestRepository};

#[derive(Debug, Clone)]
pub struct RejectRequestCommand {
    pub request_id: ContractRequestId,
}

pub struct RejectRequestHandler {
    contracts: Arc<dyn ContractRepository>,
    requests: Arc<dyn ContractRequestRepository>,
}

impl RejectRequestHandler {
    pub fn new(
        contracts: Arc<dyn ContractRepository>,
        requests: Arc<dyn ContractRequestRepository>,
    ) -> Self {
        Self { contracts, requests }
    }

    pub async fn handle(
        &self,
        cmd: RejectRequestCommand,
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

        if !actor.can_act_for(&contract.owner_id) {
            return Err(DomainError::forbidden("Only the contract owner can reject requests"));
        }
        if !request.status.can_become(RequestStatus::Rejected) {
            return Err(DomainError::invalid_transition(request.status, RequestStatus::Rejected));
        }

        self.requests
            .update_status(&cmd.request_id, RequestStatus::Pending, RequestStatus::Rejected)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{
        MockContractRepository, MockContractRequestRepository,
    };
    use crate::domain::contract::{Contract, ContractRequest};
    use crate::domain::foundation::{ErrorCode, Money, Role, StoreId, UserId};
    use chrono::NaiveDate;

    fn setup() -> (AuthenticatedUser, ContractRequest, Arc<MockContractRequestRepository>, RejectRequestHandler) {
        let owner_id = UserId::new();
        let contract = Contract::post(
            StoreId::new(),
            owner_id,
            "Refit",
            "",
            Money::from_cents(100_000),
            NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
        )
        .unwrap();
        let request = ContractRequest::submit(
            contract.id,
            UserId::new(),
            "bid",
            Money::from_cents(90_000),
        )
        .unwrap();
        let requests = Arc::new(MockContractRequestRepository::new().with_request(request.clone()));
        let handler = RejectRequestHandler::new(
            Arc::new(MockContractRepository::new().with_contract(contract)),
            requests.clone(),
        );
        let owner = AuthenticatedUser::new(owner_id, "o@example.com", Role::Owner, None);
        (owner, request, requests, handler)
    }

    #[tokio::test]
    async fn owner_rejects_pending_request() {
        let (owner, request, requests, handler) = setup();
        handler
            .handle(RejectRequestCommand { request_id: request.id }, &owner)
            .await
            .unwrap();
        assert_eq!(requests.saved_requests()[0].status, RequestStatus::Rejected);
    }

    #[tokio::test]
    async fn ongoing_request_cannot_be_rejected() {
        let (owner, request, requests, handler) = setup();
        requests
            .update_status(&request.id, RequestStatus::Pending, RequestStatus::Ongoing)
            .await
            .unwrap();

        let err = handler
            .handle(RejectRequestCommand { request_id: request.id }, &owner)
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidStateTransition);
    }
}
