//! PostgreSQL implementation of UploadRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, Page, PageQuery, Timestamp, UploadId, UserId};
use crate::domain::upload::Upload;
use crate::ports::UploadRepository;

use super::db_error;

pub struct PostgresUploadRepository {
    pool: PgPool,
}

impl PostgresUploadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UploadRow {
    id: Uuid,
    owner_id: Uuid,
    file_name: String,
    content_type: String,
    size_bytes: i64,
    checksum: String,
    stored_path: String,
    deleted: bool,
    created_at: DateTime<Utc>,
}

impl From<UploadRow> for Upload {
    fn from(row: UploadRow) -> Self {
        Upload {
            id: UploadId::from_uuid(row.id),
            owner_id: UserId::from_uuid(row.owner_id),
            file_name: row.file_name,
            content_type: row.content_type,
            size_bytes: row.size_bytes.max(0) as u64,
            checksum: row.checksum,
            stored_path: row.stored_path,
            deleted: row.deleted,
            created_at: Timestamp::from_datetime(row.created_at),
        }
    }
}

const COLUMNS: &str =
    "id, owner_id, file_name, content_type, size_bytes, checksum, stored_path, deleted, created_at";

#[async_trait]
impl UploadRepository for PostgresUploadRepository {
    async fn save(&self, upload: &Upload) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO uploads (
                id, owner_id, file_name, content_type, size_bytes,
                checksum, stored_path, deleted, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(upload.id.as_uuid())
        .bind(upload.owner_id.as_uuid())
        .bind(&upload.file_name)
        .bind(&upload.content_type)
        .bind(upload.size_bytes as i64)
        .bind(&upload.checksum)
        .bind(&upload.stored_path)
        .bind(upload.deleted)
        .bind(upload.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to save upload", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &UploadId) -> Result<Option<Upload>, DomainError> {
        let row: Option<UploadRow> = sqlx::query_as(&format!(
            "SELECT {} FROM uploads WHERE id = $1 AND deleted = FALSE",
            COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find upload", e))?;

        Ok(row.map(Upload::from))
    }

    async fn list_by_owner(
        &self,
        owner_id: &UserId,
        page: &PageQuery,
    ) -> Result<Page<Upload>, DomainError> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM uploads WHERE owner_id = $1 AND deleted = FALSE",
        )
        .bind(owner_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to count uploads", e))?;

        let rows: Vec<UploadRow> = sqlx::query_as(&format!(
            r#"
            SELECT {} FROM uploads
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
        .map_err(|e| db_error("Failed to list uploads", e))?;

        Ok(Page::new(rows.into_iter().map(Upload::from).collect(), total as u64, page))
    }

    async fn soft_delete(&self, id: &UploadId) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE uploads SET deleted = TRUE WHERE id = $1 AND deleted = FALSE",
        )
        .bind(id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to delete upload", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Upload", id));
        }

        Ok(())
    }
}
