//! CloseTicketHandler.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError, TicketId};
use crate::ports::TicketRepository;

#[derive(Debug, Clone)]
pub struct CloseTicketCommand {
    pub ticket_id: TicketId,
}

pub struct CloseTicketHandler {
    tickets: Arc<dyn TicketRepository>,
}

impl CloseTicketHandler {
    pub fn new(tickets: Arc<dyn TicketRepository>) -> Self {
        Self { tickets }
    }

    pub async fn handle(
        &self,
        cmd: CloseTicketCommand,
        actor: &AuthenticatedUser,
    ) -> Result<(), DomainError> {
        let mut ticket = self
            .tickets
            .find_by_id(&cmd.ticket_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Ticket", cmd.ticket_id))?;

        if !actor.is_self(&ticket.author_id) && !actor.is_admin() {
            return Err(DomainError::forbidden("Cannot close this ticket"));
        }

        ticket.close()?;
        self.tickets.update(&ticket).await?;
        Ok(())
    }
}
