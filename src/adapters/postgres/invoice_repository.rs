//! PostgreSQL implementation of InvoiceRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::domain::foundation::{
    DomainError, InvoiceId, Money, OrderId, Page, PageQuery, StoreId, Timestamp, UserId,
};
use crate::domain::invoice::{Invoice, InvoiceStatus};
use crate::ports::InvoiceRepository;

use super::db_error;

pub struct PostgresInvoiceRepository {
    pool: PgPool,
}

impl PostgresInvoiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct InvoiceRow {
    id: Uuid,
    order_id: Uuid,
    customer_id: Uuid,
    number: String,
    amount_due_cents: i64,
    amount_paid_cents: i64,
    status: String,
    issued_at: DateTime<Utc>,
    due_at: DateTime<Utc>,
    deleted: bool,
}

impl TryFrom<InvoiceRow> for Invoice {
    type Error = DomainError;

    fn try_from(row: InvoiceRow) -> Result<Self, Self::Error> {
        Ok(Invoice {
            id: InvoiceId::from_uuid(row.id),
            order_id: OrderId::from_uuid(row.order_id),
            customer_id: UserId::from_uuid(row.customer_id),
            number: row.number,
            amount_due: Money::from_cents(row.amount_due_cents),
            amount_paid: Money::from_cents(row.amount_paid_cents),
            status: parse_status(&row.status)?,
            issued_at: Timestamp::from_datetime(row.issued_at),
            due_at: Timestamp::from_datetime(row.due_at),
            deleted: row.deleted,
        })
    }
}

pub(super) fn parse_status(s: &str) -> Result<InvoiceStatus, DomainError> {
    match s {
        "pending" => Ok(InvoiceStatus::Pending),
        "partially_paid" => Ok(InvoiceStatus::PartiallyPaid),
        "paid" => Ok(InvoiceStatus::Paid),
        "void" => Ok(InvoiceStatus::Void),
        _ => Err(DomainError::database(format!("Invalid invoice status value: {}", s))),
    }
}

/// Inserts an invoice row inside an open transaction. Shared with the
/// checkout write in the order repository.
pub(crate) async fn insert_invoice(
    tx: &mut Transaction<'_, Postgres>,
    invoice: &Invoice,
) -> Result<(), DomainError> {
    sqlx::query(
        r#"
        INSERT INTO invoices (
            id, order_id, customer_id, number, amount_due_cents, amount_paid_cents,
            status, issued_at, due_at, deleted
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        "#,
    )
    .bind(invoice.id.as_uuid())
    .bind(invoice.order_id.as_uuid())
    .bind(invoice.customer_id.as_uuid())
    .bind(&invoice.number)
    .bind(invoice.amount_due.cents())
    .bind(invoice.amount_paid.cents())
    .bind(invoice.status.as_str())
    .bind(invoice.issued_at.as_datetime())
    .bind(invoice.due_at.as_datetime())
    .bind(invoice.deleted)
    .execute(&mut **tx)
    .await
    .map_err(|e| db_error("Failed to save invoice", e))?;

    Ok(())
}

const COLUMNS: &str = "id, order_id, customer_id, number, amount_due_cents, amount_paid_cents, status, issued_at, due_at, deleted";

#[async_trait]
impl InvoiceRepository for PostgresInvoiceRepository {
    async fn find_by_id(&self, id: &InvoiceId) -> Result<Option<Invoice>, DomainError> {
        let row: Option<InvoiceRow> = sqlx::query_as(&format!(
            "SELECT {} FROM invoices WHERE id = $1 AND deleted = FALSE",
            COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find invoice", e))?;

        row.map(Invoice::try_from).transpose()
    }

    async fn find_by_order(&self, order_id: &OrderId) -> Result<Option<Invoice>, DomainError> {
        let row: Option<InvoiceRow> = sqlx::query_as(&format!(
            "SELECT {} FROM invoices WHERE order_id = $1 AND deleted = FALSE",
            COLUMNS
        ))
        .bind(order_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find invoice", e))?;

        row.map(Invoice::try_from).transpose()
    }

    async fn list_by_customer(
        &self,
        customer_id: &UserId,
        page: &PageQuery,
    ) -> Result<Page<Invoice>, DomainError> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM invoices WHERE customer_id = $1 AND deleted = FALSE",
        )
        .bind(customer_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to count invoices", e))?;

        let rows: Vec<InvoiceRow> = sqlx::query_as(&format!(
            r#"
            SELECT {} FROM invoices
            WHERE customer_id = $1 AND deleted = FALSE
            ORDER BY issued_at DESC
            LIMIT $2 OFFSET $3
            "#,
            COLUMNS
        ))
        .bind(customer_id.as_uuid())
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list invoices", e))?;

        let items = rows
            .into_iter()
            .map(Invoice::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(items, total as u64, page))
    }

    async fn list_by_store(
        &self,
        store_id: &StoreId,
        page: &PageQuery,
    ) -> Result<Page<Invoice>, DomainError> {
        // Invoices carry no store column; scope through their order.
        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM invoices i
            JOIN orders o ON o.id = i.order_id
            WHERE o.store_id = $1 AND i.deleted = FALSE
            "#,
        )
        .bind(store_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to count invoices", e))?;

        let rows: Vec<InvoiceRow> = sqlx::query_as(
            r#"
            SELECT i.id, i.order_id, i.customer_id, i.number, i.amount_due_cents,
                   i.amount_paid_cents, i.status, i.issued_at, i.due_at, i.deleted
            FROM invoices i
            JOIN orders o ON o.id = i.order_id
            WHERE o.store_id = $1 AND i.deleted = FALSE
            ORDER BY i.issued_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(store_id.as_uuid())
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list invoices", e))?;

        let items = rows
            .into_iter()
            .map(Invoice::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(items, total as u64, page))
    }

    async fn void(&self, id: &InvoiceId) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE invoices SET status = 'void'
            WHERE id = $1 AND deleted = FALSE
              AND status IN ('pending') AND amount_paid_cents = 0
            "#,
        )
        .bind(id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to void invoice", e))?;

        if result.rows_affected() == 0 {
            return match self.find_by_id(id).await? {
                None => Err(DomainError::not_found("Invoice", id)),
                Some(invoice) => Err(DomainError::conflict(format!(
                    "Cannot void a {} invoice",
                    invoice.status
                ))),
            };
        }

        Ok(())
    }

    async fn next_invoice_number(&self, store_id: &StoreId) -> Result<String, DomainError> {
        // Single-statement upsert keeps the counter race-free; abandoned
        // checkouts burn a number, which is fine.
        let n: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO invoice_counters (store_id, last_number)
            VALUES ($1, 1)
            ON CONFLICT (store_id)
            DO UPDATE SET last_number = invoice_counters.last_number + 1
            RETURNING last_number
            "#,
        )
        .bind(store_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to allocate invoice number", e))?;

        // Sequences restart per store, so the number carries a store
        // prefix to stay globally unique.
        let store_hex = store_id.as_uuid().simple().to_string();
        Ok(format!("INV-{}-{:06}", &store_hex[..8], n))
    }
}
