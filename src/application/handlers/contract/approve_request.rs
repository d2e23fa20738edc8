//! ApproveRequestHandler - the owner picks a winning bid.
//!
//! Approval is single-winner: the chosen request goes ongoing, the
//! contract closes to further bidding, and every other pending request
//! is rejected, all in one repository transaction.

use std::sync::Arc;

use crate::domain::contract::RequestStatus;
use crate::domain::foundation::{AuthenticatedUser, ContractRequestId, DomainError};
use crate::ports::{ContractRepository, ContractRequestRepository};

#[derive(Debug, Clone)]
pub struct ApproveRequestCommand {
    pub request_id: ContractRequestId,
}

pub struct ApproveRequestHandler {
    contracts: Arc<dyn ContractRepository>,
    requests: Arc<dyn ContractRequestRepository>,
}

impl ApproveRequestHandler {
    pub fn new(
        contracts: Arc<dyn ContractRepository>,
        requests: Arc<dyn ContractRequestRepository>,
    ) -> Self {
        Self { contracts, requests }
    }

    pub async fn handle(
        &self,
        cmd: ApproveRequestCommand,
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
            return Err(DomainError::forbidden("Only the contract owner can approve requests"));
        }
        if !contract.accepts_requests() {
            return Err(DomainError::conflict("Contract already has an approved request"));
        }
        if !request.status.can_become(RequestStatus::Ongoing) {
            return Err(DomainError::invalid_transition(request.status, RequestStatus::Ongoing));
        }

        self.requests
            .approve(&cmd.request_id, &request.contract_id)
            .await?;

        tracing::info!(
            contract_id = %request.contract_id,
            request_id = %request.id,
            supplier_id = %request.supplier_id,
            "contract request approved"
        );
        Ok(())
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

    struct Fixture {
        owner: AuthenticatedUser,
        contract: Contract,
        winner: ContractRequest,
        loser: ContractRequest,
        requests: Arc<MockContractRequestRepository>,
        handler: ApproveRequestHandler,
    }

    fn fixture() -> Fixture {
        let owner_id = UserId::new();
        let contract = Contract::post(
            StoreId::new(),
            owner_id,
            "Refit",
            "",
            Money::from_cents(500_000),
            NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
        )
        .unwrap();
        let winner = ContractRequest::submit(
            contract.id,
            UserId::new(),
            "pick me",
            Money::from_cents(450_000),
        )
        .unwrap();
        let loser = ContractRequest::submit(
            contract.id,
            UserId::new(),
            "no, me",
            Money::from_cents(480_000),
        )
        .unwrap();

        let requests = Arc::new(
            MockContractRequestRepository::new()
                .with_request(winner.clone())
                .with_request(loser.clone()),
        );
        let handler = ApproveRequestHandler::new(
            Arc::new(MockContractRepository::new().with_contract(contract.clone())),
            requests.clone(),
        );

        Fixture {
            owner: AuthenticatedUser::new(owner_id, "o@example.com", Role::Owner, None),
            contract,
            winner,
            loser,
            requests,
            handler,
        }
    }

    #[tokio::test]
    async fn approval_starts_winner_and_rejects_siblings() {
        let f = fixture();
        f.handler
            .handle(ApproveRequestCommand { request_id: f.winner.id }, &f.owner)
            .await
            .unwrap();

        let saved = f.requests.saved_requests();
        let winner = saved.iter().find(|r| r.id == f.winner.id).unwrap();
        let loser = saved.iter().find(|r| r.id == f.loser.id).unwrap();

        assert_eq!(winner.status, RequestStatus::Ongoing);
        assert!(winner.owner_approved);
        assert_eq!(loser.status, RequestStatus::Rejected);
        assert!(f
            .requests
            .closed_contracts
            .lock()
            .unwrap()
            .contains(&f.contract.id));
    }

    #[tokio::test]
    async fn supplier_cannot_approve() {
        let f = fixture();
        let supplier = AuthenticatedUser::new(
            f.winner.supplier_id,
            "s@example.com",
            Role::Supplier,
            None,
        );
        let err = f
            .handler
            .handle(ApproveRequestCommand { request_id: f.winner.id }, &supplier)
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn approving_a_rejected_request_fails() {
        let f = fixture();
        f.handler
            .handle(ApproveRequestCommand { request_id: f.winner.id }, &f.owner)
            .await
            .unwrap();

        // The loser was auto-rejected; it can no longer become ongoing.
        let err = f
            .handler
            .handle(ApproveRequestCommand { request_id: f.loser.id }, &f.owner)
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidStateTransition);
    }

    #[tokio::test]
    async fn missing_request_is_not_found() {
        let f = fixture();
        let err = f
            .handler
            .handle(
                ApproveRequestCommand { request_id: ContractRequestId::new() },
                &f.owner,
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
