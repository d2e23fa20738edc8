//! ListRequestsHandler - owner and supplier request listings.

use std::sync::Arc;

use crate::domain::contract::ContractRequest;
use crate::domain::foundation::{AuthenticatedUser, ContractId, DomainError, Page, PageQuery};
use crate::ports::{ContractRepository, ContractRequestRepository};

/// All requests on one contract; the owner's review view.
#[derive(Debug, Clone)]
pub struct ListContractRequestsQuery {
    pub contract_id: ContractId,
}

/// The acting supplier's own bids.
#[derive(Debug, Clone, Default)]
pub struct ListMyRequestsQuery {
    pub page: PageQuery,
}

pub struct ListRequestsHandler {
    contracts: Arc<dyn ContractRepository>,
    requests: Arc<dyn ContractRequestRepository>,
}

impl ListRequestsHandler {
    pub fn new(
        contracts: Arc<dyn ContractRepository>,
        requests: Arc<dyn ContractRequestRepository>,
    ) -> Self {
        Self { contracts, requests }
    }

    pub async fn handle_for_contract(
        &self,
        query: ListContractRequestsQuery,
        actor: &AuthenticatedUser,
    ) -> Result<Vec<ContractRequest>, DomainError> {
        let contract = self
            .contracts
            .find_by_id(&query.contract_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Contract", query.contract_id))?;

        if !actor.can_act_for(&contract.owner_id) {
            return Err(DomainError::forbidden("Only the contract owner can review requests"));
        }

        self.requests.list_for_contract(&query.contract_id).await
    }

    pub async fn handle_mine(
        &self,
        query: ListMyRequestsQuery,
        actor: &AuthenticatedUser,
    ) -> Result<Page<ContractRequest>, DomainError> {
        self.requests.list_by_supplier(&actor.id, &query.page).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{
        MockContractRepository, MockContractRequestRepository,
    };
    use crate::domain::contract::Contract;
    use crate::domain::foundation::{ErrorCode, Money, Role, StoreId, UserId};
    use chrono::NaiveDate;

    #[tokio::test]
    async fn supplier_cannot_read_the_owners_review_list() {
        let contract = Contract::post(
            StoreId::new(),
            UserId::new(),
            "Refit",
            "",
            Money::from_cents(100_000),
            NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
        )
        .unwrap();
        let handler = ListRequestsHandler::new(
            Arc::new(MockContractRepository::new().with_contract(contract.clone())),
            Arc::new(MockContractRequestRepository::new()),
        );
        let supplier = AuthenticatedUser::new(UserId::new(), "s@example.com", Role::Supplier, None);

        let err = handler
            .handle_for_contract(
                ListContractRequestsQuery { contract_id: contract.id },
                &supplier,
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }
}
