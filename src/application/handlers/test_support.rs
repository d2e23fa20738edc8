//! In-memory port implementations shared by handler tests.
//!
//! Each mock keeps its rows in a `Mutex<Vec<_>>` and mirrors the
//! conflict/not-found semantics of the Postgres adapters closely enough
//! for handler logic to be exercised without a database.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use sha2::Digest;

use crate::domain::catalog::Product;
use crate::domain::contract::{Contract, ContractRequest, RequestStatus};
use crate::domain::foundation::{
    ContractId, ContractRequestId, DomainError, InvoiceId, Money, OrderId, Page, PageQuery,
    ProductId, StoreId, TicketId, Timestamp, UploadId, UserId,
};
use crate::domain::invoice::Invoice;
use crate::domain::order::{Order, OrderLine, OrderStatus};
use crate::domain::payment::Payment;
use crate::domain::store::Store;
use crate::domain::ticket::{Ticket, TicketReply};
use crate::domain::upload::Upload;
use crate::domain::user::User;
use crate::ports::{
    ContractRepository, ContractRequestRepository, FileStore, InvoiceRepository, OrderRepository,
    PaymentRepository, ProductRepository, StoreRepository, StoredFile, TicketRepository,
    UploadRepository, UserRepository,
};

fn page_of<T: Clone>(items: Vec<T>, query: &PageQuery) -> Page<T> {
    let total = items.len() as u64;
    let start = (query.offset() as usize).min(items.len());
    let end = (start + query.limit() as usize).min(items.len());
    Page::new(items[start..end].to_vec(), total, query)
}

// ════════════════════════════════════════════════════════════════════════════
// Users
// ════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
pub struct MockUserRepository {
    pub users: Mutex<Vec<User>>,
    pub fail: bool,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(self, user: User) -> Self {
        self.users.lock().unwrap().push(user);
        self
    }

    pub fn failing() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    fn check(&self) -> Result<(), DomainError> {
        if self.fail {
            return Err(DomainError::database("Simulated failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn save(&self, user: &User) -> Result<(), DomainError> {
        self.check()?;
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email && !u.deleted) {
            return Err(DomainError::conflict("Email is already registered"));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        self.check()?;
        let mut users = self.users.lock().unwrap();
        match users.iter_mut().find(|u| u.id == user.id) {
            Some(existing) => {
                *existing = user.clone();
                Ok(())
            }
            None => Err(DomainError::not_found("User", user.id)),
        }
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        self.check()?;
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| &u.id == id && !u.deleted)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.check()?;
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email && !u.deleted)
            .cloned())
    }

    async fn list(&self, page: &PageQuery) -> Result<Page<User>, DomainError> {
        self.check()?;
        let users: Vec<User> = self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| !u.deleted)
            .cloned()
            .collect();
        Ok(page_of(users, page))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Stores
// ════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
pub struct MockStoreRepository {
    pub stores: Mutex<Vec<Store>>,
}

impl MockStoreRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_store(self, store: Store) -> Self {
        self.stores.lock().unwrap().push(store);
        self
    }
}

#[async_trait]
impl StoreRepository for MockStoreRepository {
    async fn save(&self, store: &Store) -> Result<(), DomainError> {
        let mut stores = self.stores.lock().unwrap();
        if stores.iter().any(|s| s.slug == store.slug) {
            return Err(DomainError::conflict("Store slug is already taken"));
        }
        stores.push(store.clone());
        Ok(())
    }

    async fn update(&self, store: &Store) -> Result<(), DomainError> {
        let mut stores = self.stores.lock().unwrap();
        match stores.iter_mut().find(|s| s.id == store.id) {
            Some(existing) => {
                *existing = store.clone();
                Ok(())
            }
            None => Err(DomainError::not_found("Store", store.id)),
        }
    }

    async fn find_by_id(&self, id: &StoreId) -> Result<Option<Store>, DomainError> {
        Ok(self
            .stores
            .lock()
            .unwrap()
            .iter()
            .find(|s| &s.id == id && !s.deleted)
            .cloned())
    }

    async fn list(&self, page: &PageQuery) -> Result<Page<Store>, DomainError> {
        let stores: Vec<Store> = self
            .stores
            .lock()
            .unwrap()
            .iter()
            .filter(|s| !s.deleted)
            .cloned()
            .collect();
        Ok(page_of(stores, page))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Products
// ════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
pub struct MockProductRepository {
    pub products: Mutex<Vec<Product>>,
}

impl MockProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_product(self, product: Product) -> Self {
        self.products.lock().unwrap().push(product);
        self
    }
}

#[async_trait]
impl ProductRepository for MockProductRepository {
    async fn save(&self, product: &Product) -> Result<(), DomainError> {
        self.products.lock().unwrap().push(product.clone());
        Ok(())
    }

    async fn update(&self, product: &Product) -> Result<(), DomainError> {
        let mut products = self.products.lock().unwrap();
        match products.iter_mut().find(|p| p.id == product.id) {
            Some(existing) => {
                *existing = product.clone();
                Ok(())
            }
            None => Err(DomainError::not_found("Product", product.id)),
        }
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, DomainError> {
        Ok(self
            .products
            .lock()
            .unwrap()
            .iter()
            .find(|p| &p.id == id && !p.deleted)
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>, DomainError> {
        Ok(self
            .products
            .lock()
            .unwrap()
            .iter()
            .filter(|p| ids.contains(&p.id) && !p.deleted)
            .cloned()
            .collect())
    }

    async fn list_by_store(
        &self,
        store_id: &StoreId,
        page: &PageQuery,
    ) -> Result<Page<Product>, DomainError> {
        let products: Vec<Product> = self
            .products
            .lock()
            .unwrap()
            .iter()
            .filter(|p| &p.store_id == store_id && !p.deleted)
            .cloned()
            .collect();
        Ok(page_of(products, page))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Orders
// ════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
pub struct MockOrderRepository {
    pub orders: Mutex<Vec<Order>>,
    pub lines: Mutex<Vec<OrderLine>>,
    pub invoices: Mutex<Vec<Invoice>>,
    pub fail_checkout: bool,
}

impl MockOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_checkout() -> Self {
        Self {
            fail_checkout: true,
            ..Self::default()
        }
    }

    pub fn with_order(self, order: Order) -> Self {
        self.orders.lock().unwrap().push(order);
        self
    }

    pub fn saved_orders(&self) -> Vec<Order> {
        self.orders.lock().unwrap().clone()
    }

    pub fn saved_invoices(&self) -> Vec<Invoice> {
        self.invoices.lock().unwrap().clone()
    }
}

#[async_trait]
impl OrderRepository for MockOrderRepository {
    async fn create_checkout(
        &self,
        order: &Order,
        lines: &[OrderLine],
        invoice: &Invoice,
    ) -> Result<(), DomainError> {
        if self.fail_checkout {
            return Err(DomainError::conflict("Insufficient stock"));
        }
        self.orders.lock().unwrap().push(order.clone());
        self.lines.lock().unwrap().extend_from_slice(lines);
        self.invoices.lock().unwrap().push(invoice.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, DomainError> {
        Ok(self
            .orders
            .lock()
            .unwrap()
            .iter()
            .find(|o| &o.id == id && !o.deleted)
            .cloned())
    }

    async fn find_lines(&self, order_id: &OrderId) -> Result<Vec<OrderLine>, DomainError> {
        Ok(self
            .lines
            .lock()
            .unwrap()
            .iter()
            .filter(|l| &l.order_id == order_id)
            .cloned()
            .collect())
    }

    async fn list_by_customer(
        &self,
        customer_id: &UserId,
        page: &PageQuery,
    ) -> Result<Page<Order>, DomainError> {
        let orders: Vec<Order> = self
            .orders
            .lock()
            .unwrap()
            .iter()
            .filter(|o| &o.customer_id == customer_id && !o.deleted)
            .cloned()
            .collect();
        Ok(page_of(orders, page))
    }

    async fn list_by_store(
        &self,
        store_id: &StoreId,
        page: &PageQuery,
    ) -> Result<Page<Order>, DomainError> {
        let orders: Vec<Order> = self
            .orders
            .lock()
            .unwrap()
            .iter()
            .filter(|o| &o.store_id == store_id && !o.deleted)
            .cloned()
            .collect();
        Ok(page_of(orders, page))
    }

    async fn update_status(
        &self,
        id: &OrderId,
        from: OrderStatus,
        to: OrderStatus,
    ) -> Result<(), DomainError> {
        let mut orders = self.orders.lock().unwrap();
        match orders.iter_mut().find(|o| &o.id == id && !o.deleted) {
            None => Err(DomainError::not_found("Order", id)),
            Some(order) if order.status != from => Err(DomainError::conflict(format!(
                "Order is {} but the update expected {}",
                order.status, from
            ))),
            Some(order) => {
                order.status = to;
                order.updated_at = Timestamp::now();
                Ok(())
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Invoices
// ════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
pub struct MockInvoiceRepository {
    pub invoices: Mutex<Vec<Invoice>>,
    counter: Mutex<i64>,
}

impl MockInvoiceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_invoice(self, invoice: Invoice) -> Self {
        self.invoices.lock().unwrap().push(invoice);
        self
    }
}

#[async_trait]
impl InvoiceRepository for MockInvoiceRepository {
    async fn find_by_id(&self, id: &InvoiceId) -> Result<Option<Invoice>, DomainError> {
        Ok(self
            .invoices
            .lock()
            .unwrap()
            .iter()
            .find(|i| &i.id == id && !i.deleted)
            .cloned())
    }

    async fn find_by_order(&self, order_id: &OrderId) -> Result<Option<Invoice>, DomainError> {
        Ok(self
            .invoices
            .lock()
            .unwrap()
            .iter()
            .find(|i| &i.order_id == order_id && !i.deleted)
            .cloned())
    }

    async fn list_by_customer(
        &self,
        customer_id: &UserId,
        page: &PageQuery,
    ) -> Result<Page<Invoice>, DomainError> {
        let invoices: Vec<Invoice> = self
            .invoices
            .lock()
            .unwrap()
            .iter()
            .filter(|i| &i.customer_id == customer_id && !i.deleted)
            .cloned()
            .collect();
        Ok(page_of(invoices, page))
    }

    async fn list_by_store(
        &self,
        _store_id: &StoreId,
        page: &PageQuery,
    ) -> Result<Page<Invoice>, DomainError> {
        let invoices: Vec<Invoice> = self.invoices.lock().unwrap().clone();
        Ok(page_of(invoices, page))
    }

    async fn void(&self, id: &InvoiceId) -> Result<(), DomainError> {
        let mut invoices = self.invoices.lock().unwrap();
        match invoices.iter_mut().find(|i| &i.id == id && !i.deleted) {
            None => Err(DomainError::not_found("Invoice", id)),
            Some(invoice) => {
                invoice.void()?;
                Ok(())
            }
        }
    }

    async fn next_invoice_number(&self, _store_id: &StoreId) -> Result<String, DomainError> {
        let mut counter = self.counter.lock().unwrap();
        *counter += 1;
        Ok(format!("INV-{:06}", *counter))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Payments
// ════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
pub struct MockPaymentRepository {
    pub payments: Mutex<Vec<Payment>>,
    pub applied: Mutex<Vec<Invoice>>,
    pub conflict_on_apply: bool,
}

impl MockPaymentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn conflicting() -> Self {
        Self {
            conflict_on_apply: true,
            ..Self::default()
        }
    }

    pub fn recorded(&self) -> Vec<Payment> {
        self.payments.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymentRepository for MockPaymentRepository {
    async fn record_and_apply(
        &self,
        payment: &Payment,
        invoice: &Invoice,
        _expected_paid_before: Money,
    ) -> Result<(), DomainError> {
        if self.conflict_on_apply {
            return Err(DomainError::conflict(
                "Invoice balance changed while recording the payment",
            ));
        }
        self.payments.lock().unwrap().push(payment.clone());
        self.applied.lock().unwrap().push(invoice.clone());
        Ok(())
    }

    async fn list_for_invoice(&self, invoice_id: &InvoiceId) -> Result<Vec<Payment>, DomainError> {
        Ok(self
            .payments
            .lock()
            .unwrap()
            .iter()
            .filter(|p| &p.invoice_id == invoice_id)
            .cloned()
            .collect())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Contracts
// ════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
pub struct MockContractRepository {
    pub contracts: Mutex<Vec<Contract>>,
}

impl MockContractRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contract(self, contract: Contract) -> Self {
        self.contracts.lock().unwrap().push(contract);
        self
    }
}

#[async_trait]
impl ContractRepository for MockContractRepository {
    async fn save(&self, contract: &Contract) -> Result<(), DomainError> {
        self.contracts.lock().unwrap().push(contract.clone());
        Ok(())
    }

    async fn update(&self, contract: &Contract) -> Result<(), DomainError> {
        let mut contracts = self.contracts.lock().unwrap();
        match contracts.iter_mut().find(|c| c.id == contract.id) {
            Some(existing) => {
                *existing = contract.clone();
                Ok(())
            }
            None => Err(DomainError::not_found("Contract", contract.id)),
        }
    }

    async fn find_by_id(&self, id: &ContractId) -> Result<Option<Contract>, DomainError> {
        Ok(self
            .contracts
            .lock()
            .unwrap()
            .iter()
            .find(|c| &c.id == id && !c.deleted)
            .cloned())
    }

    async fn list_open(&self, page: &PageQuery) -> Result<Page<Contract>, DomainError> {
        let contracts: Vec<Contract> = self
            .contracts
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.open && !c.deleted)
            .cloned()
            .collect();
        Ok(page_of(contracts, page))
    }

    async fn list_by_owner(
        &self,
        owner_id: &UserId,
        page: &PageQuery,
    ) -> Result<Page<Contract>, DomainError> {
        let contracts: Vec<Contract> = self
            .contracts
            .lock()
            .unwrap()
            .iter()
            .filter(|c| &c.owner_id == owner_id && !c.deleted)
            .cloned()
            .collect();
        Ok(page_of(contracts, page))
    }

    async fn mark_paid(&self, id: &ContractId) -> Result<(), DomainError> {
        let mut contracts = self.contracts.lock().unwrap();
        match contracts.iter_mut().find(|c| &c.id == id && !c.deleted) {
            None => Err(DomainError::not_found("Contract", id)),
            Some(contract) if contract.paid => {
                Err(DomainError::conflict("Contract is already paid"))
            }
            Some(contract) => {
                contract.paid = true;
                Ok(())
            }
        }
    }
}

#[derive(Default)]
pub struct MockContractRequestRepository {
    pub requests: Mutex<Vec<ContractRequest>>,
    pub closed_contracts: Mutex<Vec<ContractId>>,
}

impl MockContractRequestRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_request(self, request: ContractRequest) -> Self {
        self.requests.lock().unwrap().push(request);
        self
    }

    pub fn saved_requests(&self) -> Vec<ContractRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContractRequestRepository for MockContractRequestRepository {
    async fn save(&self, request: &ContractRequest) -> Result<(), DomainError> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &ContractRequestId,
    ) -> Result<Option<ContractRequest>, DomainError> {
        Ok(self
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
            .requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| &r.supplier_id == supplier_id)
            .cloned()
            .collect();
        Ok(page_of(requests, page))
    }

    async fn has_active_request(
        &self,
        contract_id: &ContractId,
        supplier_id: &UserId,
    ) -> Result<bool, DomainError> {
        Ok(self.requests.lock().unwrap().iter().any(|r| {
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
        let mut requests = self.requests.lock().unwrap();
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
        self.closed_contracts.lock().unwrap().push(*contract_id);
        Ok(())
    }

    async fn update_status(
        &self,
        id: &ContractRequestId,
        from: RequestStatus,
        to: RequestStatus,
    ) -> Result<(), DomainError> {
        let mut requests = self.requests.lock().unwrap();
        match requests.iter_mut().find(|r| &r.id == id) {
            None => Err(DomainError::not_found("Contract request", id)),
            Some(request) if request.status != from => Err(DomainError::conflict(format!(
                "Request is {} but the update expected {}",
                request.status, from
            ))),
            Some(request) => {
                request.status = to;
                Ok(())
            }
        }
    }

    async fn has_completed_request(&self, contract_id: &ContractId) -> Result<bool, DomainError> {
        Ok(self
            .requests
            .lock()
            .unwrap()
            .iter()
            .any(|r| &r.contract_id == contract_id && r.status == RequestStatus::Completed))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tickets
// ════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
pub struct MockTicketRepository {
    pub tickets: Mutex<Vec<Ticket>>,
    pub replies: Mutex<Vec<TicketReply>>,
}

impl MockTicketRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ticket(self, ticket: Ticket) -> Self {
        self.tickets.lock().unwrap().push(ticket);
        self
    }
}

#[async_trait]
impl TicketRepository for MockTicketRepository {
    async fn save(&self, ticket: &Ticket) -> Result<(), DomainError> {
        self.tickets.lock().unwrap().push(ticket.clone());
        Ok(())
    }

    async fn update(&self, ticket: &Ticket) -> Result<(), DomainError> {
        let mut tickets = self.tickets.lock().unwrap();
        match tickets.iter_mut().find(|t| t.id == ticket.id) {
            Some(existing) => {
                *existing = ticket.clone();
                Ok(())
            }
            None => Err(DomainError::not_found("Ticket", ticket.id)),
        }
    }

    async fn find_by_id(&self, id: &TicketId) -> Result<Option<Ticket>, DomainError> {
        Ok(self
            .tickets
            .lock()
            .unwrap()
            .iter()
            .find(|t| &t.id == id && !t.deleted)
            .cloned())
    }

    async fn list_by_author(
        &self,
        author_id: &UserId,
        page: &PageQuery,
    ) -> Result<Page<Ticket>, DomainError> {
        let tickets: Vec<Ticket> = self
            .tickets
            .lock()
            .unwrap()
            .iter()
            .filter(|t| &t.author_id == author_id && !t.deleted)
            .cloned()
            .collect();
        Ok(page_of(tickets, page))
    }

    async fn list_all(&self, page: &PageQuery) -> Result<Page<Ticket>, DomainError> {
        let tickets: Vec<Ticket> = self
            .tickets
            .lock()
            .unwrap()
            .iter()
            .filter(|t| !t.deleted)
            .cloned()
            .collect();
        Ok(page_of(tickets, page))
    }

    async fn save_reply(&self, reply: &TicketReply) -> Result<(), DomainError> {
        self.replies.lock().unwrap().push(reply.clone());
        Ok(())
    }

    async fn list_replies(&self, ticket_id: &TicketId) -> Result<Vec<TicketReply>, DomainError> {
        Ok(self
            .replies
            .lock()
            .unwrap()
            .iter()
            .filter(|r| &r.ticket_id == ticket_id)
            .cloned()
            .collect())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Uploads
// ════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
pub struct MockUploadRepository {
    pub uploads: Mutex<Vec<Upload>>,
}

impl MockUploadRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_upload(self, upload: Upload) -> Self {
        self.uploads.lock().unwrap().push(upload);
        self
    }
}

#[async_trait]
impl UploadRepository for MockUploadRepository {
    async fn save(&self, upload: &Upload) -> Result<(), DomainError> {
        self.uploads.lock().unwrap().push(upload.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UploadId) -> Result<Option<Upload>, DomainError> {
        Ok(self
            .uploads
            .lock()
            .unwrap()
            .iter()
            .find(|u| &u.id == id && !u.deleted)
            .cloned())
    }

    async fn list_by_owner(
        &self,
        owner_id: &UserId,
        page: &PageQuery,
    ) -> Result<Page<Upload>, DomainError> {
        let uploads: Vec<Upload> = self
            .uploads
            .lock()
            .unwrap()
            .iter()
            .filter(|u| &u.owner_id == owner_id && !u.deleted)
            .cloned()
            .collect();
        Ok(page_of(uploads, page))
    }

    async fn soft_delete(&self, id: &UploadId) -> Result<(), DomainError> {
        let mut uploads = self.uploads.lock().unwrap();
        match uploads.iter_mut().find(|u| &u.id == id && !u.deleted) {
            None => Err(DomainError::not_found("Upload", id)),
            Some(upload) => {
                upload.deleted = true;
                Ok(())
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Auth
// ════════════════════════════════════════════════════════════════════════════

/// Plaintext-prefix "hasher" so tests can build users without argon2.
#[derive(Default)]
pub struct MockPasswordHasher;

impl MockPasswordHasher {
    pub fn new() -> Self {
        Self
    }

    pub fn stored(password: &str) -> String {
        format!("plain:{}", password)
    }
}

impl crate::ports::PasswordHasher for MockPasswordHasher {
    fn hash(&self, password: &str) -> Result<String, crate::domain::foundation::AuthError> {
        Ok(Self::stored(password))
    }

    fn verify(
        &self,
        password: &str,
        stored_hash: &str,
    ) -> Result<(), crate::domain::foundation::AuthError> {
        if stored_hash == Self::stored(password) {
            Ok(())
        } else {
            Err(crate::domain::foundation::AuthError::InvalidCredentials)
        }
    }
}

/// Token issuer that returns a fixed token string.
#[derive(Default)]
pub struct MockTokenIssuer;

impl MockTokenIssuer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl crate::ports::TokenIssuer for MockTokenIssuer {
    async fn issue(
        &self,
        user: &User,
    ) -> Result<crate::ports::IssuedToken, crate::domain::foundation::AuthError> {
        Ok(crate::ports::IssuedToken {
            token: format!("token-for-{}", user.id),
            expires_in_secs: 3600,
        })
    }
}

/// In-memory `FileStore` backed by a map of relative paths to bytes.
#[derive(Default)]
pub struct MockFileStore {
    pub files: Mutex<HashMap<String, Vec<u8>>>,
}

impl MockFileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FileStore for MockFileStore {
    async fn put(
        &self,
        owner_id: &UserId,
        upload_id: UploadId,
        bytes: &[u8],
    ) -> Result<StoredFile, DomainError> {
        if bytes.is_empty() {
            return Err(DomainError::validation("file", "Uploaded file is empty"));
        }
        let relative_path = format!("user_{}/f_{}", owner_id, upload_id);
        self.files
            .lock()
            .unwrap()
            .insert(relative_path.clone(), bytes.to_vec());
        Ok(StoredFile {
            relative_path,
            size_bytes: bytes.len() as u64,
            checksum: format!("{:x}", sha2::Sha256::digest(bytes)),
        })
    }

    async fn get(&self, relative_path: &str) -> Result<Vec<u8>, DomainError> {
        self.files
            .lock()
            .unwrap()
            .get(relative_path)
            .cloned()
            .ok_or_else(|| DomainError::not_found("Upload content", relative_path))
    }

    async fn remove(&self, relative_path: &str) -> Result<(), DomainError> {
        self.files.lock().unwrap().remove(relative_path);
        Ok(())
    }
}
