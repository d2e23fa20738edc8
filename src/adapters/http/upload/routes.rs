//! Axum router configuration for upload endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    delete_upload, download_upload, get_upload, list_uploads, store_upload, UploadAppState,
};

/// Upload routes, mounted at `/api/uploads`. All require authentication.
///
/// - `POST /` - Store a file (multipart, `file` field)
/// - `GET /` - List the caller's uploads
/// - `GET /:id` - Fetch metadata
/// - `GET /:id/content` - Download the bytes
/// - `DELETE /:id` - Soft-delete
pub fn upload_routes() -> Router<UploadAppState> {
    Router::new()
        .route("/", post(store_upload).get(list_uploads))
        .route("/:id", get(get_upload).delete(delete_upload))
        .route("/:id/content", get(download_upload))
}
