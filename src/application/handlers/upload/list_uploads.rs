//! ListUploadsHandler.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError, Page, PageQuery};
use crate::domain::upload::Upload;
use crate::ports::UploadRepository;

#[derive(Debug, Clone, Default)]
pub struct ListUploadsQuery {
    pub page: PageQuery,
}

pub struct ListUploadsHandler {
    uploads: Arc<dyn UploadRepository>,
}

impl ListUploadsHandler {
    pub fn new(uploads: Arc<dyn UploadRepository>) -> Self {
        Self { uploads }
    }

    pub async fn handle(
        &self,
        query: ListUploadsQuery,
        actor: &AuthenticatedUser,
    ) -> Result<Page<Upload>, DomainError> {
        self.uploads.list_by_owner(&actor.id, &query.page).await
    }
}
