//! ListContractsHandler.

use std::sync::Arc;

use crate::domain::contract::Contract;
use crate::domain::foundation::{AuthenticatedUser, DomainError, Page, PageQuery};
use crate::ports::ContractRepository;

/// Contracts still open for bidding; the supplier browse view.
#[derive(Debug, Clone, Default)]
pub struct ListOpenContractsQuery {
    pub page: PageQuery,
}

/// Contracts the acting owner posted.
#[derive(Debug, Clone, Default)]
pub struct ListMyContractsQuery {
    pub page: PageQuery,
}

pub struct ListContractsHandler {
    contracts: Arc<dyn ContractRepository>,
}

impl ListContractsHandler {
    pub fn new(contracts: Arc<dyn ContractRepository>) -> Self {
        Self { contracts }
    }

    pub async fn handle_open(
        &self,
        query: ListOpenContractsQuery,
    ) -> Result<Page<Contract>, DomainError> {
        self.contracts.list_open(&query.page).await
    }

    pub async fn handle_mine(
        &self,
        query: ListMyContractsQuery,
        actor: &AuthenticatedUser,
    ) -> Result<Page<Contract>, DomainError> {
        self.contracts.list_by_owner(&actor.id, &query.page).await
    }
}
