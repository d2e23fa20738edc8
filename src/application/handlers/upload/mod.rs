//! Upload handlers.

mod delete_upload;
mod get_upload;
mod list_uploads;
mod store_upload;

pub use delete_upload::{DeleteUploadCommand, DeleteUploadHandler};
pub use get_upload::{GetUploadHandler, GetUploadQuery, UploadContent};
pub use list_uploads::{ListUploadsHandler, ListUploadsQuery};
pub use store_upload::{StoreUploadCommand, StoreUploadHandler};
