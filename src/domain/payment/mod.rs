//! Payment records.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{InvoiceId, Money, PaymentId, Timestamp, UserId};

/// How a payment was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Card,
    BankTransfer,
    Cash,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "card",
            PaymentMethod::BankTransfer => "bank_transfer",
            PaymentMethod::Cash => "cash",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An immutable record of money received against an invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub invoice_id: InvoiceId,
    pub payer_id: UserId,
    pub amount: Money,
    pub method: PaymentMethod,
    /// External reference, e.g. a bank transaction id.
    pub reference: Option<String>,
    pub created_at: Timestamp,
}

impl Payment {
    pub fn new(
        invoice_id: InvoiceId,
        payer_id: UserId,
        amount: Money,
        method: PaymentMethod,
        reference: Option<String>,
    ) -> Self {
        Self {
            id: PaymentId::new(),
            invoice_id,
            payer_id,
            amount,
            method,
            reference,
            created_at: Timestamp::now(),
        }
    }
}
