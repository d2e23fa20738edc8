//! HTTP DTOs for store endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;
use crate::domain::store::Store;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateStoreRequest {
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStoreRequest {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StoreResponse {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub slug: String,
    pub created_at: Timestamp,
}

impl From<Store> for StoreResponse {
    fn from(store: Store) -> Self {
        Self {
            id: store.id.to_string(),
            owner_id: store.owner_id.to_string(),
            name: store.name,
            slug: store.slug,
            created_at: store.created_at,
        }
    }
}
