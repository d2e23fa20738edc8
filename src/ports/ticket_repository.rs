//! Ticket persistence port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, Page, PageQuery, TicketId, UserId};
use crate::domain::ticket::{Ticket, TicketReply};

/// Persistent storage for support tickets and their replies.
#[async_trait]
pub trait TicketRepository: Send + Sync {
    async fn save(&self, ticket: &Ticket) -> Result<(), DomainError>;

    async fn update(&self, ticket: &Ticket) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &TicketId) -> Result<Option<Ticket>, DomainError>;

    async fn list_by_author(
        &self,
        author_id: &UserId,
        page: &PageQuery,
    ) -> Result<Page<Ticket>, DomainError>;

    /// Admin listing across all tenants.
    async fn list_all(&self, page: &PageQuery) -> Result<Page<Ticket>, DomainError>;

    async fn save_reply(&self, reply: &TicketReply) -> Result<(), DomainError>;

    async fn list_replies(&self, ticket_id: &TicketId) -> Result<Vec<TicketReply>, DomainError>;
}
