//! Payment handlers.

mod list_payments;
mod record_payment;

pub use list_payments::{ListPaymentsHandler, ListPaymentsQuery};
pub use record_payment::{RecordPaymentCommand, RecordPaymentHandler, RecordPaymentResult};
