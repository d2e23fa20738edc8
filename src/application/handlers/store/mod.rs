//! Store handlers - tenancy management.

mod create_store;
mod delete_store;
mod get_store;
mod list_stores;
mod update_store;

pub use create_store::{CreateStoreCommand, CreateStoreHandler};
pub use delete_store::{DeleteStoreCommand, DeleteStoreHandler};
pub use get_store::{GetStoreHandler, GetStoreQuery};
pub use list_stores::{ListStoresHandler, ListStoresQuery};
pub use update_store::{UpdateStoreCommand, UpdateStoreHandler};
