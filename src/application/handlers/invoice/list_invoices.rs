//! ListInvoicesHandler.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError, Page, PageQuery, StoreId};
use crate::domain::invoice::Invoice;
use crate::ports::{InvoiceRepository, StoreRepository};

#[derive(Debug, Clone, Default)]
pub struct ListMyInvoicesQuery {
    pub page: PageQuery,
}

#[derive(Debug, Clone)]
pub struct ListStoreInvoicesQuery {
    pub store_id: StoreId,
    pub page: PageQuery,
}

pub struct ListInvoicesHandler {
    invoices: Arc<dyn InvoiceRepository>,
    stores: Arc<dyn StoreRepository>,
}

impl ListInvoicesHandler {
    pub fn new(invoices: Arc<dyn InvoiceRepository>, stores: Arc<dyn StoreRepository>) -> Self {
        Self { invoices, stores }
    }

    pub async fn handle_mine(
        &self,
        query: ListMyInvoicesQuery,
        actor: &AuthenticatedUser,
    ) -> Result<Page<Invoice>, DomainError> {
        self.invoices.list_by_customer(&actor.id, &query.page).await
    }

    pub async fn handle_store(
        &self,
        query: ListStoreInvoicesQuery,
        actor: &AuthenticatedUser,
    ) -> Result<Page<Invoice>, DomainError> {
        let store = self
            .stores
            .find_by_id(&query.store_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Store", query.store_id))?;

        if !actor.can_manage_store(&store.owner_id) {
            return Err(DomainError::forbidden("Cannot view this store's invoices"));
        }

        self.invoices.list_by_store(&query.store_id, &query.page).await
    }
}
