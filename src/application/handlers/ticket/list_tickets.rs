//! ListTicketsHandler.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError, Page, PageQuery};
use crate::domain::ticket::Ticket;
use crate::ports::TicketRepository;

#[derive(Debug, Clone, Default)]
pub struct ListMyTicketsQuery {
    pub page: PageQuery,
}

#[derive(Debug, Clone, Default)]
pub struct ListAllTicketsQuery {
    pub page: PageQuery,
}

pub struct ListTicketsHandler {
    tickets: Arc<dyn TicketRepository>,
}

impl ListTicketsHandler {
    pub fn new(tickets: Arc<dyn TicketRepository>) -> Self {
        Self { tickets }
    }

    pub async fn handle_mine(
        &self,
        query: ListMyTicketsQuery,
        actor: &AuthenticatedUser,
    ) -> Result<Page<Ticket>, DomainError> {
        self.tickets.list_by_author(&actor.id, &query.page).await
    }

    pub async fn handle_all(
        &self,
        query: ListAllTicketsQuery,
        actor: &AuthenticatedUser,
    ) -> Result<Page<Ticket>, DomainError> {
        if !actor.is_admin() {
            return Err(DomainError::forbidden("Only admins can list all tickets"));
        }
        self.tickets.list_all(&query.page).await
    }
}
