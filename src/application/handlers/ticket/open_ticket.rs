//! OpenTicketHandler.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError, StoreId};
use crate::domain::ticket::Ticket;
use crate::ports::TicketRepository;

#[derive(Debug, Clone)]
pub struct OpenTicketCommand {
    pub store_id: Option<StoreId>,
    pub subject: String,
    pub body: String,
}

pub struct OpenTicketHandler {
    tickets: Arc<dyn TicketRepository>,
}

impl OpenTicketHandler {
    pub fn new(tickets: Arc<dyn TicketRepository>) -> Self {
        Self { tickets }
    }

    pub async fn handle(
        &self,
        cmd: OpenTicketCommand,
        actor: &AuthenticatedUser,
    ) -> Result<Ticket, DomainError> {
        let ticket = Ticket::open(actor.id, cmd.store_id, cmd.subject, cmd.body)?;
        self.tickets.save(&ticket).await?;

        tracing::info!(ticket_id = %ticket.id, "opened ticket");
        Ok(ticket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::MockTicketRepository;
    use crate::domain::foundation::{ErrorCode, Role, UserId};
    use crate::domain::ticket::TicketStatus;

    #[tokio::test]
    async fn opens_ticket_for_author() {
        let tickets = Arc::new(MockTicketRepository::new());
        let actor = AuthenticatedUser::new(UserId::new(), "c@example.com", Role::Customer, None);

        let ticket = OpenTicketHandler::new(tickets.clone())
            .handle(
                OpenTicketCommand {
                    store_id: None,
                    subject: "Order never arrived".to_string(),
                    body: "Two weeks now".to_string(),
                },
                &actor,
            )
            .await
            .unwrap();

        assert_eq!(ticket.author_id, actor.id);
        assert_eq!(ticket.status, TicketStatus::Open);
        assert_eq!(tickets.tickets.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn empty_subject_is_rejected() {
        let tickets = Arc::new(MockTicketRepository::new());
        let actor = AuthenticatedUser::new(UserId::new(), "c@example.com", Role::Customer, None);

        let err = OpenTicketHandler::new(tickets)
            .handle(
                OpenTicketCommand {
                    store_id: None,
                    subject: "  ".to_string(),
                    body: String::new(),
                },
                &actor,
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationFailed);
    }
}
