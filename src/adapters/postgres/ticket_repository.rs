//! PostgreSQL implementation of TicketRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{
    DomainError, Page, PageQuery, StoreId, TicketId, TicketReplyId, Timestamp, UserId,
};
use crate::domain::ticket::{Ticket, TicketReply, TicketStatus};
use crate::ports::TicketRepository;

use super::db_error;

pub struct PostgresTicketRepository {
    pool: PgPool,
}

impl PostgresTicketRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TicketRow {
    id: Uuid,
    author_id: Uuid,
    store_id: Option<Uuid>,
    subject: String,
    body: String,
    status: String,
    deleted: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TicketRow> for Ticket {
    type Error = DomainError;

    fn try_from(row: TicketRow) -> Result<Self, Self::Error> {
        Ok(Ticket {
            id: TicketId::from_uuid(row.id),
            author_id: UserId::from_uuid(row.author_id),
            store_id: row.store_id.map(StoreId::from_uuid),
            subject: row.subject,
            body: row.body,
            status: parse_status(&row.status)?,
            deleted: row.deleted,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ReplyRow {
    id: Uuid,
    ticket_id: Uuid,
    author_id: Uuid,
    body: String,
    created_at: DateTime<Utc>,
}

impl From<ReplyRow> for TicketReply {
    fn from(row: ReplyRow) -> Self {
        TicketReply {
            id: TicketReplyId::from_uuid(row.id),
            ticket_id: TicketId::from_uuid(row.ticket_id),
            author_id: UserId::from_uuid(row.author_id),
            body: row.body,
            created_at: Timestamp::from_datetime(row.created_at),
        }
    }
}

fn parse_status(s: &str) -> Result<TicketStatus, DomainError> {
    match s {
        "open" => Ok(TicketStatus::Open),
        "answered" => Ok(TicketStatus::Answered),
        "closed" => Ok(TicketStatus::Closed),
        _ => Err(DomainError::database(format!("Invalid ticket status value: {}", s))),
    }
}

const COLUMNS: &str = "id, author_id, store_id, subject, body, status, deleted, created_at, updated_at";

#[async_trait]
impl TicketRepository for PostgresTicketRepository {
    async fn save(&self, ticket: &Ticket) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO tickets (
                id, author_id, store_id, subject, body, status,
                deleted, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(ticket.id.as_uuid())
        .bind(ticket.author_id.as_uuid())
        .bind(ticket.store_id.map(|id| *id.as_uuid()))
        .bind(&ticket.subject)
        .bind(&ticket.body)
        .bind(ticket.status.as_str())
        .bind(ticket.deleted)
        .bind(ticket.created_at.as_datetime())
        .bind(ticket.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to save ticket", e))?;

        Ok(())
    }

    async fn update(&self, ticket: &Ticket) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE tickets SET subject = $2, body = $3, status = $4, deleted = $5, updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(ticket.id.as_uuid())
        .bind(&ticket.subject)
        .bind(&ticket.body)
        .bind(ticket.status.as_str())
        .bind(ticket.deleted)
        .bind(ticket.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update ticket", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Ticket", ticket.id));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &TicketId) -> Result<Option<Ticket>, DomainError> {
        let row: Option<TicketRow> = sqlx::query_as(&format!(
            "SELECT {} FROM tickets WHERE id = $1 AND deleted = FALSE",
            COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find ticket", e))?;

        row.map(Ticket::try_from).transpose()
    }

    async fn list_by_author(
        &self,
        author_id: &UserId,
        page: &PageQuery,
    ) -> Result<Page<Ticket>, DomainError> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM tickets WHERE author_id = $1 AND deleted = FALSE",
        )
        .bind(author_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to count tickets", e))?;

        let rows: Vec<TicketRow> = sqlx::query_as(&format!(
            r#"
            SELECT {} FROM tickets
            WHERE author_id = $1 AND deleted = FALSE
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
            COLUMNS
        ))
        .bind(author_id.as_uuid())
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list tickets", e))?;

        let items = rows
            .into_iter()
            .map(Ticket::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(items, total as u64, page))
    }

    async fn list_all(&self, page: &PageQuery) -> Result<Page<Ticket>, DomainError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tickets WHERE deleted = FALSE")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("Failed to count tickets", e))?;

        let rows: Vec<TicketRow> = sqlx::query_as(&format!(
            r#"
            SELECT {} FROM tickets
            WHERE deleted = FALSE
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
            COLUMNS
        ))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list tickets", e))?;

        let items = rows
            .into_iter()
            .map(Ticket::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(items, total as u64, page))
    }

    async fn save_reply(&self, reply: &TicketReply) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO ticket_replies (id, ticket_id, author_id, body, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(reply.id.as_uuid())
        .bind(reply.ticket_id.as_uuid())
        .bind(reply.author_id.as_uuid())
        .bind(&reply.body)
        .bind(reply.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to save ticket reply", e))?;

        Ok(())
    }

    async fn list_replies(&self, ticket_id: &TicketId) -> Result<Vec<TicketReply>, DomainError> {
        let rows: Vec<ReplyRow> = sqlx::query_as(
            r#"
            SELECT id, ticket_id, author_id, body, created_at
            FROM ticket_replies
            WHERE ticket_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(ticket_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list ticket replies", e))?;

        Ok(rows.into_iter().map(TicketReply::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_status_roundtrips_all_values() {
        for status in [TicketStatus::Open, TicketStatus::Answered, TicketStatus::Closed] {
            assert_eq!(parse_status(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn parse_status_rejects_invalid_values() {
        assert!(parse_status("pending").is_err());
    }
}
