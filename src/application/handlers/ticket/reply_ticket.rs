//! ReplyTicketHandler.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError, TicketId};
use crate::domain::ticket::TicketReply;
use crate::ports::TicketRepository;

#[derive(Debug, Clone)]
pub struct ReplyTicketCommand {
    pub ticket_id: TicketId,
    pub body: String,
}

pub struct ReplyTicketHandler {
    tickets: Arc<dyn TicketRepository>,
}

impl ReplyTicketHandler {
    pub fn new(tickets: Arc<dyn TicketRepository>) -> Self {
        Self { tickets }
    }

    /// The author and admins may reply. An admin reply marks the ticket
    /// answered; an author reply reopens it.
    pub async fn handle(
        &self,
        cmd: ReplyTicketCommand,
        actor: &AuthenticatedUser,
    ) -> Result<TicketReply, DomainError> {
        if cmd.body.trim().is_empty() {
            return Err(DomainError::validation("body", "Reply cannot be empty"));
        }

        let mut ticket = self
            .tickets
            .find_by_id(&cmd.ticket_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Ticket", cmd.ticket_id))?;

        let is_author = actor.is_self(&ticket.author_id);
        if !is_author && !actor.is_admin() {
            return Err(DomainError::forbidden("Cannot reply to this ticket"));
        }

        ticket.note_reply(actor.is_admin())?;

        let reply = TicketReply::new(ticket.id, actor.id, cmd.body);
        self.tickets.save_reply(&reply).await?;
        self.tickets.update(&ticket).await?;

        Ok(reply)
    }
}
