//! PostgreSQL implementation of StoreRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, Page, PageQuery, StoreId, Timestamp, UserId};
use crate::domain::store::Store;
use crate::ports::StoreRepository;

use super::db_error;

pub struct PostgresStoreRepository {
    pool: PgPool,
}

impl PostgresStoreRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct StoreRow {
    id: Uuid,
    owner_id: Uuid,
    name: String,
    slug: String,
    deleted: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<StoreRow> for Store {
    fn from(row: StoreRow) -> Self {
        Store {
            id: StoreId::from_uuid(row.id),
            owner_id: UserId::from_uuid(row.owner_id),
            name: row.name,
            slug: row.slug,
            deleted: row.deleted,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        }
    }
}

const COLUMNS: &str = "id, owner_id, name, slug, deleted, created_at, updated_at";

#[async_trait]
impl StoreRepository for PostgresStoreRepository {
    async fn save(&self, store: &Store) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO stores (id, owner_id, name, slug, deleted, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(store.id.as_uuid())
        .bind(store.owner_id.as_uuid())
        .bind(&store.name)
        .bind(&store.slug)
        .bind(store.deleted)
        .bind(store.created_at.as_datetime())
        .bind(store.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("stores_slug_key") {
                    return DomainError::conflict("Store slug is already taken");
                }
            }
            db_error("Failed to save store", e)
        })?;

        Ok(())
    }

    async fn update(&self, store: &Store) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE stores SET name = $2, slug = $3, deleted = $4, updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(store.id.as_uuid())
        .bind(&store.name)
        .bind(&store.slug)
        .bind(store.deleted)
        .bind(store.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update store", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Store", store.id));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &StoreId) -> Result<Option<Store>, DomainError> {
        let row: Option<StoreRow> = sqlx::query_as(&format!(
            "SELECT {} FROM stores WHERE id = $1 AND deleted = FALSE",
            COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find store", e))?;

        Ok(row.map(Store::from))
    }

    async fn list(&self, page: &PageQuery) -> Result<Page<Store>, DomainError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM stores WHERE deleted = FALSE")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("Failed to count stores", e))?;

        let rows: Vec<StoreRow> = sqlx::query_as(&format!(
            r#"
            SELECT {} FROM stores
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
        .map_err(|e| db_error("Failed to list stores", e))?;

        Ok(Page::new(rows.into_iter().map(Store::from).collect(), total as u64, page))
    }
}
