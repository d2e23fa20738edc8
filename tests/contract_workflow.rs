//! Integration tests for the contract bidding workflow, from posting
//! through approval, completion, and payment, with in-memory port
//! implementations.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;

use tradehub::application::handlers::contract::{
    ApproveRequestCommand, ApproveRequestHandler, CompleteRequestCommand, CompleteRequestHandler,
    CreateContractCommand, CreateContractHandler, MarkContractPaidCommand,
    MarkContractPaidHandler, SubmitRequestCommand, SubmitRequestHandler,
};
use tradehub::domain::contract::{Contract, ContractRequest, RequestStatus};
use tradehub::domain::foundation::{
    AuthenticatedUser, ContractId, ContractRequestId, DomainError, ErrorCode, Money, Page,
    PageQuery, Role, StoreId, UserId,
};
use tradehub::domain::store::Store;
use tradehub::ports::{ContractRepository, ContractRequestRepository, StoreRepository};

// =============================================================================
// Test Infrastructure
// =============================================================================

/// Shared in-memory "database"; the approval write touches both the
/// requests and the contract row, as in the Postgres transaction.
#[derive(Default)]
struct Db {
    stores: Mutex<Vec<Store>>,
    contracts: Mutex<Vec<Contract>>,
    requests: Mutex<Vec<ContractRequest>>,
}

struct Repo(Arc<Db>);

#[async_trait]
impl StoreRepository for Repo {
    async fn save(&self, store: &Store) -> Result<(), DomainError> {
        self.0.stores.lock().unwrap().push(store.clone());
        Ok(())
    }

    async fn update(&self, _store: &Store) -> Result<(), DomainError> {
        Ok(())
    }

    async fn find_by_id(&self, id: &StoreId) -> Result<Option<Store>, DomainError> {
        Ok(self
            .0
            .stores
            .lock()
            .unwrap()
            .iter()
            .find(|s| &s.id == id && !s.deleted)
            .cloned())
    }

    async fn list(&self, page: &PageQuery) -> Result<Page<Store>, DomainError> {
        Ok(Page::new(self.0.stores.lock().unwrap().clone(), 0, page))
    }
}

#[async_trait]
impl ContractRepository for Repo {
    async fn save(&self, contract: &Contract) -> Result<(), DomainError> {
        self.0.contracts.lock().unwrap().push(contract.clone());
        Ok(())
    }

    async fn update(&self, contract: &Contract) -> Result<(), DomainError> {
        let mut contracts = self.0.contracts.lock().unwrap();
        let existing = contracts
            .iter_mut()
            .find(|c| c.id == contract.id)
            .ok_or_else(|| DomainError::not_found("Contract", contract.id))?;
        *existing = contract.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: &ContractId) -> Result<Option<Contract>, DomainError> {
        Ok(self
            .0
            .contracts
            .lock()
            .unwrap()
            .iter()
            .find(|c| &c.id == id && !c.deleted)
            .cloned())
    }

    async fn list_open(&self, page: &PageQuery) -> Result<Page<Contract>, DomainError> {
        let contracts: Vec<Contract> = self
            .0
            .contracts
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.open && !c.deleted)
            .cloned()
            .collect();
        let total = contracts.len() as u64;
        Ok(Page::new(contracts, total, page))
    }

    async fn list_by_owner(
        &self,
        owner_id: &UserId,
        page: &PageQuery,
    ) -> Result<Page<Contract>, DomainError> {
        let contracts: Vec<Contract> = self
            .0
            .contracts
            .lock()
            .unwrap()
            .iter()
            .filter(|c| &c.owner_id == owner_id && !c.deleted)
            .cloned()
            .collect();
        let total = contracts.len() as u64;
        Ok(Page::new(contracts, total, page))
    }

    async fn mark_paid(&self, id: &ContractId) -> Result<(), DomainError> {
        let mut contracts = self.0.contracts.lock().unwrap();
        let contract = contracts
            .iter_mut()
            .find(|c| &c.id == id && !c.deleted)
            .ok_or_else(|| DomainError::not_found("Contract", id))?;
        if contract.paid {
            return Err(DomainError::conflict("Contract is already paid"));
        }
        contract.paid = true;
        Ok(())
    }
}

#[async_trait]
impl ContractRequestRepository for Repo {
    async fn save(&self, request: &ContractRequest) -> Result<(), DomainError> {
        self.0.requests.lock().unwrap().push(request.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &ContractRequestId,
    ) -> Result<Option<ContractRequest>, DomainError> {
        Ok(self
            .0
            .requests
            .lock()
            .unwrap()
            .iter()
            .find(|r| &r.id == id)
            .cloned())
    }

    async fn list_for_contract(
        &self,
        contract_id: &ContractId,
    ) -> Result<Vec<ContractRequest>, DomainError> {
        Ok(self
            .0
            .requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| &r.contract_id == contract_id)
            .cloned()
            .collect())
    }

    async fn list_by_supplier(
        &self,
        supplier_id: &UserId,
        page: &PageQuery,
    ) -> Result<Page<ContractRequest>, DomainError> {
        let requests: Vec<ContractRequest> = self
            .0
            .requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| &r.supplier_id == supplier_id)
            .cloned()
            .collect();
        let total = requests.len() as u64;
        Ok(Page::new(requests, total, page))
    }

    async fn has_active_request(
        &self,
        contract_id: &ContractId,
        supplier_id: &UserId,
    ) -> Result<bool, DomainError> {
        Ok(self.0.requests.lock().unwrap().iter().any(|r| {
            &r.contract_id == contract_id
                && &r.supplier_id == supplier_id
                && r.status.is_active()
        }))
    }

    async fn approve(
        &self,
        id: &ContractRequestId,
        contract_id: &ContractId,
    ) -> Result<(), DomainError> {
        let mut requests = self.0.requests.lock().unwrap();
        let target = requests
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| DomainError::not_found("Contract request", id))?;
        if target.status != RequestStatus::Pending {
            return Err(DomainError::conflict("Request is no longer pending"));
        }
        target.status = RequestStatus::Ongoing;
        target.owner_approved = true;
        for sibling in requests
            .iter_mut()
            .filter(|r| &r.contract_id == contract_id && &r.id != id)
        {
            if sibling.status == RequestStatus::Pending {
                sibling.status = RequestStatus::Rejected;
            }
        }

        let mut contracts = self.0.contracts.lock().unwrap();
        if let Some(contract) = contracts.iter_mut().find(|c| &c.id == contract_id) {
            contract.open = false;
        }
        Ok(())
    }

    async fn update_status(
        &self,
        id: &ContractRequestId,
        from: RequestStatus,
        to: RequestStatus,
    ) -> Result<(), DomainError> {
        let mut requests = self.0.requests.lock().unwrap();
        let request = requests
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| DomainError::not_found("Contract request", id))?;
        if request.status != from {
            return Err(DomainError::conflict("status moved"));
        }
        request.status = to;
        Ok(())
    }

    async fn has_completed_request(&self, contract_id: &ContractId) -> Result<bool, DomainError> {
        Ok(self
            .0
            .requests
            .lock()
            .unwrap()
            .iter()
            .any(|r| &r.contract_id == contract_id && r.status == RequestStatus::Completed))
    }
}

// =============================================================================
// Fixtures
// =============================================================================

struct Fixture {
    db: Arc<Db>,
    owner: AuthenticatedUser,
    supplier_a: AuthenticatedUser,
    supplier_b: AuthenticatedUser,
    create: CreateContractHandler,
    submit: SubmitRequestHandler,
    approve: ApproveRequestHandler,
    complete: CompleteRequestHandler,
    mark_paid: MarkContractPaidHandler,
}

fn fixture() -> Fixture {
    let db = Arc::new(Db::default());
    let owner_id = UserId::new();
    let store = Store::new(owner_id, "Acme", "acme").unwrap();
    db.stores.lock().unwrap().push(store);

    let contracts = Arc::new(Repo(db.clone()));
    let requests = Arc::new(Repo(db.clone()));
    let stores = Arc::new(Repo(db.clone()));

    Fixture {
        db,
        owner: AuthenticatedUser::new(owner_id, "o@example.com", Role::Owner, None),
        supplier_a: AuthenticatedUser::new(UserId::new(), "a@example.com", Role::Supplier, None),
        supplier_b: AuthenticatedUser::new(UserId::new(), "b@example.com", Role::Supplier, None),
        create: CreateContractHandler::new(contracts.clone(), stores),
        submit: SubmitRequestHandler::new(contracts.clone(), requests.clone()),
        approve: ApproveRequestHandler::new(contracts.clone(), requests.clone()),
        complete: CompleteRequestHandler::new(contracts.clone(), requests.clone()),
        mark_paid: MarkContractPaidHandler::new(contracts, requests),
    }
}

impl Fixture {
    async fn post_contract(&self) -> Contract {
        let store_id = self.db.stores.lock().unwrap()[0].id;
        self.create
            .handle(
                CreateContractCommand {
                    store_id,
                    title: "Warehouse refit".to_string(),
                    description: "Shelving and lighting".to_string(),
                    amount: Money::from_cents(500_000),
                    starts_on: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
                    ends_on: NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
                },
                &self.owner,
            )
            .await
            .unwrap()
    }

    async fn bid(&self, contract: &Contract, supplier: &AuthenticatedUser, cents: i64) -> ContractRequest {
        self.submit
            .handle(
                SubmitRequestCommand {
                    contract_id: contract.id,
                    message: "I can do this".to_string(),
                    counter_offer: Money::from_cents(cents),
                },
                supplier,
            )
            .await
            .unwrap()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn full_bidding_lifecycle_ends_with_a_paid_contract() {
    let f = fixture();
    let contract = f.post_contract().await;

    let winner = f.bid(&contract, &f.supplier_a, 450_000).await;
    let loser = f.bid(&contract, &f.supplier_b, 480_000).await;

    f.approve
        .handle(ApproveRequestCommand { request_id: winner.id }, &f.owner)
        .await
        .unwrap();

    {
        let requests = f.db.requests.lock().unwrap();
        let winner = requests.iter().find(|r| r.id == winner.id).unwrap();
        let loser = requests.iter().find(|r| r.id == loser.id).unwrap();
        assert_eq!(winner.status, RequestStatus::Ongoing);
        assert!(winner.owner_approved);
        assert_eq!(loser.status, RequestStatus::Rejected);
        assert!(!f.db.contracts.lock().unwrap()[0].open);
    }

    // Paying before the work is done is refused.
    let err = f
        .mark_paid
        .handle(MarkContractPaidCommand { contract_id: contract.id }, &f.owner)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::Conflict);

    f.complete
        .handle(CompleteRequestCommand { request_id: winner.id }, &f.supplier_a)
        .await
        .unwrap();
    f.mark_paid
        .handle(MarkContractPaidCommand { contract_id: contract.id }, &f.owner)
        .await
        .unwrap();

    assert!(f.db.contracts.lock().unwrap()[0].paid);
}

#[tokio::test]
async fn closed_contract_accepts_no_further_bids() {
    let f = fixture();
    let contract = f.post_contract().await;
    let winner = f.bid(&contract, &f.supplier_a, 450_000).await;

    f.approve
        .handle(ApproveRequestCommand { request_id: winner.id }, &f.owner)
        .await
        .unwrap();

    let err = f
        .submit
        .handle(
            SubmitRequestCommand {
                contract_id: contract.id,
                message: "too late".to_string(),
                counter_offer: Money::from_cents(400_000),
            },
            &f.supplier_b,
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[tokio::test]
async fn supplier_cannot_bid_twice_while_active() {
    let f = fixture();
    let contract = f.post_contract().await;
    f.bid(&contract, &f.supplier_a, 450_000).await;

    let err = f
        .submit
        .handle(
            SubmitRequestCommand {
                contract_id: contract.id,
                message: "again".to_string(),
                counter_offer: Money::from_cents(440_000),
            },
            &f.supplier_a,
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[tokio::test]
async fn rejected_supplier_may_bid_again_on_an_open_contract() {
    let f = fixture();
    let contract = f.post_contract().await;
    let first = f.bid(&contract, &f.supplier_a, 450_000).await;

    // Owner declines; the contract is still open, so a fresh bid is fine.
    let requests = Arc::new(Repo(f.db.clone()));
    requests
        .update_status(&first.id, RequestStatus::Pending, RequestStatus::Rejected)
        .await
        .unwrap();

    let second = f.bid(&contract, &f.supplier_a, 430_000).await;
    assert_eq!(second.status, RequestStatus::Pending);
}
