//! PostgreSQL implementation of ContractRequestRepository.
//!
//! Approval is the one multi-row write in the bidding workflow: the
//! winning request, the contract's open flag, and the sibling rejections
//! commit together or not at all.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::contract::{ContractRequest, RequestStatus};
use crate::domain::foundation::{
    ContractId, ContractRequestId, DomainError, Money, Page, PageQuery, Timestamp, UserId,
};
use crate::ports::ContractRequestRepository;

use super::db_error;

pub struct PostgresContractRequestRepository {
    pool: PgPool,
}

impl PostgresContractRequestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct RequestRow {
    id: Uuid,
    contract_id: Uuid,
    supplier_id: Uuid,
    message: String,
    counter_offer_cents: i64,
    status: String,
    owner_approved: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<RequestRow> for ContractRequest {
    type Error = DomainError;

    fn try_from(row: RequestRow) -> Result<Self, Self::Error> {
        Ok(ContractRequest {
            id: ContractRequestId::from_uuid(row.id),
            contract_id: ContractId::from_uuid(row.contract_id),
            supplier_id: UserId::from_uuid(row.supplier_id),
            message: row.message,
            counter_offer: Money::from_cents(row.counter_offer_cents),
            status: parse_status(&row.status)?,
            owner_approved: row.owner_approved,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

fn parse_status(s: &str) -> Result<RequestStatus, DomainError> {
    match s {
        "pending" => Ok(RequestStatus::Pending),
        "ongoing" => Ok(RequestStatus::Ongoing),
        "completed" => Ok(RequestStatus::Completed),
        "rejected" => Ok(RequestStatus::Rejected),
        _ => Err(DomainError::database(format!("Invalid request status value: {}", s))),
    }
}

const COLUMNS: &str = "id, contract_id, supplier_id, message, counter_offer_cents, status, owner_approved, created_at, updated_at";

#[async_trait]
impl ContractRequestRepository for PostgresContractRequestRepository {
    async fn save(&self, request: &ContractRequest) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO contract_requests (
                id, contract_id, supplier_id, message, counter_offer_cents,
                status, owner_approved, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(request.id.as_uuid())
        .bind(request.contract_id.as_uuid())
        .bind(request.supplier_id.as_uuid())
        .bind(&request.message)
        .bind(request.counter_offer.cents())
        .bind(request.status.as_str())
        .bind(request.owner_approved)
        .bind(request.created_at.as_datetime())
        .bind(request.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to save contract request", e))?;

        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &ContractRequestId,
    ) -> Result<Option<ContractRequest>, DomainError> {
        let row: Option<RequestRow> = sqlx::query_as(&format!(
            "SELECT {} FROM contract_requests WHERE id = $1",
            COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find contract request", e))?;

        row.map(ContractRequest::try_from).transpose()
    }

    async fn list_for_contract(
        &self,
        contract_id: &ContractId,
    ) -> Result<Vec<ContractRequest>, DomainError> {
        let rows: Vec<RequestRow> = sqlx::query_as(&format!(
            r#"
            SELECT {} FROM contract_requests
            WHERE contract_id = $1
            ORDER BY created_at ASC
            "#,
            COLUMNS
        ))
        .bind(contract_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list contract requests", e))?;

        rows.into_iter().map(ContractRequest::try_from).collect()
    }

    async fn list_by_supplier(
        &self,
        supplier_id: &UserId,
        page: &PageQuery,
    ) -> Result<Page<ContractRequest>, DomainError> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM contract_requests WHERE supplier_id = $1",
        )
        .bind(supplier_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to count contract requests", e))?;

        let rows: Vec<RequestRow> = sqlx::query_as(&format!(
            r#"
            SELECT {} FROM contract_requests
            WHERE supplier_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
            COLUMNS
        ))
        .bind(supplier_id.as_uuid())
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list contract requests", e))?;

        let items = rows
            .into_iter()
            .map(ContractRequest::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(items, total as u64, page))
    }

    async fn has_active_request(
        &self,
        contract_id: &ContractId,
        supplier_id: &UserId,
    ) -> Result<bool, DomainError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM contract_requests
            WHERE contract_id = $1 AND supplier_id = $2
              AND status IN ('pending', 'ongoing')
            "#,
        )
        .bind(contract_id.as_uuid())
        .bind(supplier_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to check active requests", e))?;

        Ok(count > 0)
    }

    async fn approve(
        &self,
        id: &ContractRequestId,
        contract_id: &ContractId,
    ) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to start approval transaction", e))?;

        let now = Timestamp::now();

        let result = sqlx::query(
            r#"
            UPDATE contract_requests
            SET status = 'ongoing', owner_approved = TRUE, updated_at = $2
            WHERE id = $1 AND status = 'pending'
            "#,
        )
        .bind(id.as_uuid())
        .bind(now.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to approve contract request", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::conflict("Request is no longer pending"));
        }

        sqlx::query(
            r#"
            UPDATE contracts SET open = FALSE, updated_at = $2
            WHERE id = $1
            "#,
        )
        .bind(contract_id.as_uuid())
        .bind(now.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to close contract bidding", e))?;

        sqlx::query(
            r#"
            UPDATE contract_requests
            SET status = 'rejected', updated_at = $3
            WHERE contract_id = $1 AND id <> $2 AND status = 'pending'
            "#,
        )
        .bind(contract_id.as_uuid())
        .bind(id.as_uuid())
        .bind(now.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to reject sibling requests", e))?;

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit approval", e))?;

        Ok(())
    }

    async fn update_status(
        &self,
        id: &ContractRequestId,
        from: RequestStatus,
        to: RequestStatus,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE contract_requests SET status = $3, updated_at = $4
            WHERE id = $1 AND status = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(from.as_str())
        .bind(to.as_str())
        .bind(Timestamp::now().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update request status", e))?;

        if result.rows_affected() == 0 {
            return match self.find_by_id(id).await? {
                None => Err(DomainError::not_found("Contract request", id)),
                Some(request) => Err(DomainError::conflict(format!(
                    "Request is {} but the update expected {}",
                    request.status, from
                ))),
            };
        }

        Ok(())
    }

    async fn has_completed_request(&self, contract_id: &ContractId) -> Result<bool, DomainError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM contract_requests
            WHERE contract_id = $1 AND status = 'completed'
            "#,
        )
        .bind(contract_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to check completed requests", e))?;

        Ok(count > 0)
    }
}
