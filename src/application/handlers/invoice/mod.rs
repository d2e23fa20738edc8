//! Invoice handlers.

mod get_invoice;
mod list_invoices;
mod void_invoice;

pub use get_invoice::{GetInvoiceHandler, GetInvoiceQuery};
pub use list_invoices::{ListInvoicesHandler, ListMyInvoicesQuery, ListStoreInvoicesQuery};
pub use void_invoice::{VoidInvoiceCommand, VoidInvoiceHandler};
