//! Catalog handlers - product management.

mod create_product;
mod delete_product;
mod get_product;
mod list_products;
mod update_product;

pub use create_product::{CreateProductCommand, CreateProductHandler};
pub use delete_product::{DeleteProductCommand, DeleteProductHandler};
pub use get_product::{GetProductHandler, GetProductQuery};
pub use list_products::{ListProductsHandler, ListProductsQuery};
pub use update_product::{UpdateProductCommand, UpdateProductHandler};
