//! HTTP DTOs for ticket endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::ticket::TicketThread;
use crate::domain::foundation::Timestamp;
use crate::domain::ticket::{Ticket, TicketReply, TicketStatus};

#[derive(Debug, Clone, Deserialize)]
pub struct OpenTicketRequest {
    pub store_id: Option<String>,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReplyRequest {
    pub body: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TicketResponse {
    pub id: String,
    pub author_id: String,
    pub store_id: Option<String>,
    pub subject: String,
    pub body: String,
    pub status: TicketStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Ticket> for TicketResponse {
    fn from(ticket: Ticket) -> Self {
        Self {
            id: ticket.id.to_string(),
            author_id: ticket.author_id.to_string(),
            store_id: ticket.store_id.map(|id| id.to_string()),
            subject: ticket.subject,
            body: ticket.body,
            status: ticket.status,
            created_at: ticket.created_at,
            updated_at: ticket.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplyResponse {
    pub id: String,
    pub author_id: String,
    pub body: String,
    pub created_at: Timestamp,
}

impl From<TicketReply> for ReplyResponse {
    fn from(reply: TicketReply) -> Self {
        Self {
            id: reply.id.to_string(),
            author_id: reply.author_id.to_string(),
            body: reply.body,
            created_at: reply.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TicketThreadResponse {
    #[serde(flatten)]
    pub ticket: TicketResponse,
    pub replies: Vec<ReplyResponse>,
}

impl From<TicketThread> for TicketThreadResponse {
    fn from(thread: TicketThread) -> Self {
        Self {
            ticket: thread.ticket.into(),
            replies: thread.replies.into_iter().map(ReplyResponse::from).collect(),
        }
    }
}
