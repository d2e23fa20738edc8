//! PostgreSQL implementation of PaymentRepository.
//!
//! Recording a payment and moving the invoice balance is one
//! transaction; the invoice update predicates on the balance the caller
//! computed against, so concurrent payments cannot double-apply.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{
    DomainError, InvoiceId, Money, PaymentId, Timestamp, UserId,
};
use crate::domain::invoice::Invoice;
use crate::domain::payment::{Payment, PaymentMethod};
use crate::ports::PaymentRepository;

use super::db_error;

pub struct PostgresPaymentRepository {
    pool: PgPool,
}

impl PostgresPaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PaymentRow {
    id: Uuid,
    invoice_id: Uuid,
    payer_id: Uuid,
    amount_cents: i64,
    method: String,
    reference: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<PaymentRow> for Payment {
    type Error = DomainError;

    fn try_from(row: PaymentRow) -> Result<Self, Self::Error> {
        Ok(Payment {
            id: PaymentId::from_uuid(row.id),
            invoice_id: InvoiceId::from_uuid(row.invoice_id),
            payer_id: UserId::from_uuid(row.payer_id),
            amount: Money::from_cents(row.amount_cents),
            method: parse_method(&row.method)?,
            reference: row.reference,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

fn parse_method(s: &str) -> Result<PaymentMethod, DomainError> {
    match s {
        "card" => Ok(PaymentMethod::Card),
        "bank_transfer" => Ok(PaymentMethod::BankTransfer),
        "cash" => Ok(PaymentMethod::Cash),
        _ => Err(DomainError::database(format!("Invalid payment method value: {}", s))),
    }
}

#[async_trait]
impl PaymentRepository for PostgresPaymentRepository {
    async fn record_and_apply(
        &self,
        payment: &Payment,
        invoice: &Invoice,
        expected_paid_before: Money,
    ) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to start payment transaction", e))?;

        sqlx::query(
            r#"
            INSERT INTO payments (id, invoice_id, payer_id, amount_cents, method, reference, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(payment.id.as_uuid())
        .bind(payment.invoice_id.as_uuid())
        .bind(payment.payer_id.as_uuid())
        .bind(payment.amount.cents())
        .bind(payment.method.as_str())
        .bind(&payment.reference)
        .bind(payment.created_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to record payment", e))?;

        let result = sqlx::query(
            r#"
            UPDATE invoices
            SET amount_paid_cents = $2, status = $3
            WHERE id = $1 AND amount_paid_cents = $4 AND deleted = FALSE
            "#,
        )
        .bind(invoice.id.as_uuid())
        .bind(invoice.amount_paid.cents())
        .bind(invoice.status.as_str())
        .bind(expected_paid_before.cents())
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to apply payment to invoice", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::conflict(
                "Invoice balance changed while recording the payment",
            ));
        }

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit payment", e))?;

        Ok(())
    }

    async fn list_for_invoice(&self, invoice_id: &InvoiceId) -> Result<Vec<Payment>, DomainError> {
        let rows: Vec<PaymentRow> = sqlx::query_as(
            r#"
            SELECT id, invoice_id, payer_id, amount_cents, method, reference, created_at
            FROM payments
            WHERE invoice_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(invoice_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list payments", e))?;

        rows.into_iter().map(Payment::try_from).collect()
    }
}
