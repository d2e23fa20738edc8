//! GetContractHandler.

use std::sync::Arc;

use crate::domain::contract::Contract;
use crate::domain::foundation::{ContractId, DomainError};
use crate::ports::ContractRepository;

/// Contracts are browsable by any authenticated user.
#[derive(Debug, Clone)]
pub struct GetContractQuery {
    pub contract_id: ContractId,
}

pub struct GetContractHandler {
    contracts: Arc<dyn ContractRepository>,
}

impl GetContractHandler {
    pub fn new(contracts: Arc<dyn ContractRepository>) -> Self {
        Self { contracts }
    }

    pub async fn handle(&self, query: GetContractQuery) -> Result<Option<Contract>, DomainError> {
        self.contracts.find_by_id(&query.contract_id).await
    }
}
