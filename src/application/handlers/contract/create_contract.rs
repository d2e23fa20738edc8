//! CreateContractHandler.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::contract::Contract;
use crate::domain::foundation::{AuthenticatedUser, DomainError, Money, StoreId};
use crate::ports::{ContractRepository, StoreRepository};

#[derive(Debug, Clone)]
pub struct CreateContractCommand {
    pub store_id: StoreId,
    pub title: String,
    pub description: String,
    pub amount: Money,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
}

pub struct CreateContractHandler {
    contracts: Arc<dyn ContractRepository>,
    stores: Arc<dyn StoreRepository>,
}

impl CreateContractHandler {
    pub fn new(contracts: Arc<dyn ContractRepository>, stores: Arc<dyn StoreRepository>) -> Self {
        Self { contracts, stores }
    }

    pub async fn handle(
        &self,
        cmd: CreateContractCommand,
        actor: &AuthenticatedUser,
    ) -> Result<Contract, DomainError> {
        let store = self
            .stores
            .find_by_id(&cmd.store_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Store", cmd.store_id))?;

        if !actor.can_manage_store(&store.owner_id) {
            return Err(DomainError::forbidden("Cannot post contracts for this store"));
        }

        let contract = Contract::post(
            cmd.store_id,
            store.owner_id,
            cmd.title,
            cmd.description,
            cmd.amount,
            cmd.starts_on,
            cmd.ends_on,
        )?;
        self.contracts.save(&contract).await?;

        tracing::info!(contract_id = %contract.id, "posted contract");
        Ok(contract)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{MockContractRepository, MockStoreRepository};
    use crate::domain::foundation::{ErrorCode, Role, UserId};
    use crate::domain::store::Store;

    fn dates() -> (NaiveDate, NaiveDate) {
        (
            NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
        )
    }

    #[tokio::test]
    async fn owner_posts_open_contract() {
        let owner_id = UserId::new();
        let store = Store::new(owner_id, "Acme", "acme").unwrap();
        let contracts = Arc::new(MockContractRepository::new());
        let handler = CreateContractHandler::new(
            contracts.clone(),
            Arc::new(MockStoreRepository::new().with_store(store.clone())),
        );
        let actor = AuthenticatedUser::new(owner_id, "o@example.com", Role::Owner, None);
        let (starts_on, ends_on) = dates();

        let contract = handler
            .handle(
                CreateContractCommand {
                    store_id: store.id,
                    title: "Warehouse refit".to_string(),
                    description: String::new(),
                    amount: Money::from_cents(500_000),
                    starts_on,
                    ends_on,
                },
                &actor,
            )
            .await
            .unwrap();

        assert!(contract.open);
        assert_eq!(contract.owner_id, owner_id);
        assert_eq!(contracts.contracts.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn supplier_cannot_post_contracts() {
        let store = Store::new(UserId::new(), "Acme", "acme").unwrap();
        let handler = CreateContractHandler::new(
            Arc::new(MockContractRepository::new()),
            Arc::new(MockStoreRepository::new().with_store(store.clone())),
        );
        let supplier = AuthenticatedUser::new(UserId::new(), "s@example.com", Role::Supplier, None);
        let (starts_on, ends_on) = dates();

        let err = handler
            .handle(
                CreateContractCommand {
                    store_id: store.id,
                    title: "Refit".to_string(),
                    description: String::new(),
                    amount: Money::from_cents(100),
                    starts_on,
                    ends_on,
                },
                &supplier,
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }
}
