//! HTTP DTOs for catalog endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::Product;
use crate::domain::foundation::{PageQuery, Timestamp};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductRequest {
    pub store_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Price in cents.
    pub price_cents: i64,
    pub stock: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price_cents: Option<i64>,
    pub stock: Option<i32>,
}

/// Query parameters for the product listing.
///
/// Pagination fields stay flat; `serde_urlencoded` cannot flatten
/// numeric fields through a nested struct.
#[derive(Debug, Clone, Deserialize)]
pub struct ListProductsParams {
    pub store_id: String,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ListProductsParams {
    pub fn page_query(&self) -> PageQuery {
        let defaults = PageQuery::default();
        PageQuery {
            page: self.page.unwrap_or(defaults.page),
            per_page: self.per_page.unwrap_or(defaults.per_page),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductResponse {
    pub id: String,
    pub store_id: String,
    pub name: String,
    pub description: String,
    pub price_cents: i64,
    pub price: String,
    pub stock: i32,
    pub created_at: Timestamp,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.to_string(),
            store_id: product.store_id.to_string(),
            name: product.name,
            description: product.description,
            price_cents: product.price.cents(),
            price: product.price.to_string(),
            stock: product.stock,
            created_at: product.created_at,
        }
    }
}
