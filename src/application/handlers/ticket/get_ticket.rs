//! GetTicketHandler - ticket with its reply thread.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError, TicketId};
use crate::domain::ticket::{Ticket, TicketReply};
use crate::ports::{StoreRepository, TicketRepository};

#[derive(Debug, Clone)]
pub struct GetTicketQuery {
    pub ticket_id: TicketId,
}

#[derive(Debug, Clone)]
pub struct TicketThread {
    pub ticket: Ticket,
    pub replies: Vec<TicketReply>,
}

pub struct GetTicketHandler {
    tickets: Arc<dyn TicketRepository>,
    stores: Arc<dyn StoreRepository>,
}

impl GetTicketHandler {
    pub fn new(tickets: Arc<dyn TicketRepository>, stores: Arc<dyn StoreRepository>) -> Self {
        Self { tickets, stores }
    }

    /// The author, the targeted store's owner, and admins may read a
    /// ticket.
    pub async fn handle(
        &self,
        query: GetTicketQuery,
        actor: &AuthenticatedUser,
    ) -> Result<Option<TicketThread>, DomainError> {
        let Some(ticket) = self.tickets.find_by_id(&query.ticket_id).await? else {
            return Ok(None);
        };

        if !self.can_view(&ticket, actor).await? {
            return Err(DomainError::forbidden("Cannot view this ticket"));
        }

        let replies = self.tickets.list_replies(&ticket.id).await?;
        Ok(Some(TicketThread { ticket, replies }))
    }

    async fn can_view(
        &self,
        ticket: &Ticket,
        actor: &AuthenticatedUser,
    ) -> Result<bool, DomainError> {
        if actor.is_admin() || actor.is_self(&ticket.author_id) {
            return Ok(true);
        }
        if let Some(store_id) = ticket.store_id {
            if let Some(store) = self.stores.find_by_id(&store_id).await? {
                return Ok(actor.can_manage_store(&store.owner_id));
            }
        }
        Ok(false)
    }
}
