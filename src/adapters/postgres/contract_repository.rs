//! PostgreSQL implementation of ContractRepository.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::contract::Contract;
use crate::domain::foundation::{
    ContractId, DomainError, Money, Page, PageQuery, StoreId, Timestamp, UserId,
};
use crate::ports::ContractRepository;

use super::db_error;

pub struct PostgresContractRepository {
    pool: PgPool,
}

impl PostgresContractRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ContractRow {
    id: Uuid,
    store_id: Uuid,
    owner_id: Uuid,
    title: String,
    description: String,
    amount_cents: i64,
    starts_on: NaiveDate,
    ends_on: NaiveDate,
    paid: bool,
    open: bool,
    deleted: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ContractRow> for Contract {
    fn from(row: ContractRow) -> Self {
        Contract {
            id: ContractId::from_uuid(row.id),
            store_id: StoreId::from_uuid(row.store_id),
            owner_id: UserId::from_uuid(row.owner_id),
            title: row.title,
            description: row.description,
            amount: Money::from_cents(row.amount_cents),
            starts_on: row.starts_on,
            ends_on: row.ends_on,
            paid: row.paid,
            open: row.open,
            deleted: row.deleted,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        }
    }
}

const COLUMNS: &str = "id, store_id, owner_id, title, description, amount_cents, starts_on, ends_on, paid, open, deleted, created_at, updated_at";

#[async_trait]
impl ContractRepository for PostgresContractRepository {
    async fn save(&self, contract: &Contract) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO contracts (
                id, store_id, owner_id, title, description, amount_cents,
                starts_on, ends_on, paid, open, deleted, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(contract.id.as_uuid())
        .bind(contract.store_id.as_uuid())
        .bind(contract.owner_id.as_uuid())
        .bind(&contract.title)
        .bind(&contract.description)
        .bind(contract.amount.cents())
        .bind(contract.starts_on)
        .bind(contract.ends_on)
        .bind(contract.paid)
        .bind(contract.open)
        .bind(contract.deleted)
        .bind(contract.created_at.as_datetime())
        .bind(contract.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to save contract", e))?;

        Ok(())
    }

    async fn update(&self, contract: &Contract) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE contracts SET
                title = $2,
                description = $3,
                amount_cents = $4,
                starts_on = $5,
                ends_on = $6,
                paid = $7,
                open = $8,
                deleted = $9,
                updated_at = $10
            WHERE id = $1
            "#,
        )
        .bind(contract.id.as_uuid())
        .bind(&contract.title)
        .bind(&contract.description)
        .bind(contract.amount.cents())
        .bind(contract.starts_on)
        .bind(contract.ends_on)
        .bind(contract.paid)
        .bind(contract.open)
        .bind(contract.deleted)
        .bind(contract.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update contract", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Contract", contract.id));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &ContractId) -> Result<Option<Contract>, DomainError> {
        let row: Option<ContractRow> = sqlx::query_as(&format!(
            "SELECT {} FROM contracts WHERE id = $1 AND deleted = FALSE",
            COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find contract", e))?;

        Ok(row.map(Contract::from))
    }

    async fn list_open(&self, page: &PageQuery) -> Result<Page<Contract>, DomainError> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM contracts WHERE open = TRUE AND deleted = FALSE",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to count contracts", e))?;

        let rows: Vec<ContractRow> = sqlx::query_as(&format!(
            r#"
            SELECT {} FROM contracts
            WHERE open = TRUE AND deleted = FALSE
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
            COLUMNS
        ))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list contracts", e))?;

        Ok(Page::new(rows.into_iter().map(Contract::from).collect(), total as u64, page))
    }

    async fn list_by_owner(
        &self,
        owner_id: &UserId,
        page: &PageQuery,
    ) -> Result<Page<Contract>, DomainError> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM contracts WHERE owner_id = $1 AND deleted = FALSE",
        )
        .bind(owner_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to count contracts", e))?;

        let rows: Vec<ContractRow> = sqlx::query_as(&format!(
            r#"
            SELECT {} FROM contracts
            WHERE owner_id = $1 AND deleted = FALSE
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
            COLUMNS
        ))
        .bind(owner_id.as_uuid())
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list contracts", e))?;

        Ok(Page::new(rows.into_iter().map(Contract::from).collect(), total as u64, page))
    }

    async fn mark_paid(&self, id: &ContractId) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE contracts SET paid = TRUE, updated_at = $2
            WHERE id = $1 AND paid = FALSE AND deleted = FALSE
            "#,
        )
        .bind(id.as_uuid())
        .bind(Timestamp::now().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to mark contract paid", e))?;

        if result.rows_affected() == 0 {
            return match self.find_by_id(id).await? {
                None => Err(DomainError::not_found("Contract", id)),
                Some(_) => Err(DomainError::conflict("Contract is already paid")),
            };
        }

        Ok(())
    }
}
