//! HTTP handlers for upload endpoints.
//!
//! The upload endpoint takes `multipart/form-data` with a single `file`
//! field. Download streams the stored bytes back with the original
//! content type and file name.

use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{not_found, ApiError};
use crate::adapters::http::identity::handlers::parse_id;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::upload::{
    DeleteUploadCommand, DeleteUploadHandler, GetUploadHandler, GetUploadQuery,
    ListUploadsHandler, ListUploadsQuery, StoreUploadCommand, StoreUploadHandler,
};
use crate::domain::foundation::{DomainError, PageQuery, UploadId};

use super::dto::UploadResponse;

#[derive(Clone)]
pub struct UploadAppState {
    pub store_handler: Arc<StoreUploadHandler>,
    pub get_handler: Arc<GetUploadHandler>,
    pub list_handler: Arc<ListUploadsHandler>,
    pub delete_handler: Arc<DeleteUploadHandler>,
}

/// POST /api/uploads (multipart)
pub async fn store_upload(
    State(state): State<UploadAppState>,
    RequireAuth(user): RequireAuth,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| ApiError(DomainError::validation("file", e.to_string())))?
        .ok_or_else(|| ApiError(DomainError::validation("file", "Missing file field")))?;

    let file_name = field.file_name().unwrap_or("upload.bin").to_string();
    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();
    let bytes = field
        .bytes()
        .await
        .map_err(|e| ApiError(DomainError::validation("file", e.to_string())))?;

    let upload = state
        .store_handler
        .handle(
            StoreUploadCommand {
                file_name,
                content_type,
                bytes: bytes.to_vec(),
            },
            &user,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(UploadResponse::from(upload))).into_response())
}

/// GET /api/uploads/:id
pub async fn get_upload(
    State(state): State<UploadAppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let upload_id = parse_id::<UploadId>(&id, "upload id")?;
    match state
        .get_handler
        .handle_metadata(GetUploadQuery { upload_id }, &user)
        .await?
    {
        Some(upload) => Ok(Json(UploadResponse::from(upload)).into_response()),
        None => Ok(not_found("Upload", upload_id)),
    }
}

/// GET /api/uploads/:id/content
pub async fn download_upload(
    State(state): State<UploadAppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let upload_id = parse_id::<UploadId>(&id, "upload id")?;
    match state
        .get_handler
        .handle_content(GetUploadQuery { upload_id }, &user)
        .await?
    {
        Some(content) => {
            let headers = [
                (header::CONTENT_TYPE, content.upload.content_type.clone()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", content.upload.file_name),
                ),
            ];
            Ok((headers, content.bytes).into_response())
        }
        None => Ok(not_found("Upload", upload_id)),
    }
}

/// GET /api/uploads
pub async fn list_uploads(
    State(state): State<UploadAppState>,
    RequireAuth(user): RequireAuth,
    Query(page): Query<PageQuery>,
) -> Result<Response, ApiError> {
    let uploads = state
        .list_handler
        .handle(ListUploadsQuery { page }, &user)
        .await?;
    Ok(Json(uploads.map(UploadResponse::from)).into_response())
}

/// DELETE /api/uploads/:id
pub async fn delete_upload(
    State(state): State<UploadAppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let upload_id = parse_id::<UploadId>(&id, "upload id")?;
    state
        .delete_handler
        .handle(DeleteUploadCommand { upload_id }, &user)
        .await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}
