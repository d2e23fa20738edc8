//! Support ticket entities.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{
    DomainError, StoreId, TicketId, TicketReplyId, Timestamp, UserId,
};

/// Conversation state of a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    /// Waiting on staff.
    Open,
    /// Staff replied, waiting on the author.
    Answered,
    /// Closed. Terminal.
    Closed,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::Answered => "answered",
            TicketStatus::Closed => "closed",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A support ticket, optionally scoped to a store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    pub author_id: UserId,
    pub store_id: Option<StoreId>,
    pub subject: String,
    pub body: String,
    pub status: TicketStatus,
    pub deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One message in a ticket thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketReply {
    pub id: TicketReplyId,
    pub ticket_id: TicketId,
    pub author_id: UserId,
    pub body: String,
    pub created_at: Timestamp,
}

impl Ticket {
    pub fn open(
        author_id: UserId,
        store_id: Option<StoreId>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let subject = subject.into();
        if subject.trim().is_empty() {
            return Err(DomainError::validation("subject", "Ticket subject cannot be empty"));
        }
        let now = Timestamp::now();
        Ok(Self {
            id: TicketId::new(),
            author_id,
            store_id,
            subject,
            body: body.into(),
            status: TicketStatus::Open,
            deleted: false,
            created_at: now,
            updated_at: now,
        })
    }

    /// Records the status effect of a reply: a staff reply marks the
    /// ticket answered, an author reply reopens it.
    pub fn note_reply(&mut self, from_staff: bool) -> Result<(), DomainError> {
        if self.status == TicketStatus::Closed {
            return Err(DomainError::conflict("Cannot reply to a closed ticket"));
        }
        self.status = if from_staff {
            TicketStatus::Answered
        } else {
            TicketStatus::Open
        };
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Closes the ticket. Closed tickets stay closed.
    pub fn close(&mut self) -> Result<(), DomainError> {
        if self.status == TicketStatus::Closed {
            return Err(DomainError::conflict("Ticket is already closed"));
        }
        self.status = TicketStatus::Closed;
        self.updated_at = Timestamp::now();
        Ok(())
    }
}

impl TicketReply {
    pub fn new(ticket_id: TicketId, author_id: UserId, body: impl Into<String>) -> Self {
        Self {
            id: TicketReplyId::new(),
            ticket_id,
            author_id,
            body: body.into(),
            created_at: Timestamp::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket() -> Ticket {
        Ticket::open(UserId::new(), None, "Order never arrived", "It has been two weeks").unwrap()
    }

    #[test]
    fn new_ticket_is_open() {
        assert_eq!(ticket().status, TicketStatus::Open);
    }

    #[test]
    fn empty_subject_is_rejected() {
        assert!(Ticket::open(UserId::new(), None, "  ", "body").is_err());
    }

    #[test]
    fn staff_reply_marks_answered_author_reply_reopens() {
        let mut t = ticket();
        t.note_reply(true).unwrap();
        assert_eq!(t.status, TicketStatus::Answered);
        t.note_reply(false).unwrap();
        assert_eq!(t.status, TicketStatus::Open);
    }

    #[test]
    fn closed_ticket_rejects_replies_and_reclose() {
        let mut t = ticket();
        t.close().unwrap();
        assert!(t.note_reply(false).is_err());
        assert!(t.close().is_err());
    }
}
