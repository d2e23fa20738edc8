//! Invoice aggregate.
//!
//! An invoice is issued for every order at checkout. Payments accumulate
//! into `amount_paid`; status derives from the running balance.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{
    DomainError, ErrorCode, InvoiceId, Money, OrderId, Timestamp, UserId,
};

/// Payment state of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Pending,
    PartiallyPaid,
    Paid,
    Void,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::PartiallyPaid => "partially_paid",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Void => "void",
        }
    }

    /// Whether payments may still be applied.
    pub fn accepts_payment(&self) -> bool {
        matches!(self, InvoiceStatus::Pending | InvoiceStatus::PartiallyPaid)
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An invoice for one order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: InvoiceId,
    pub order_id: OrderId,
    pub customer_id: UserId,
    /// Human-readable number, `INV-` plus a per-store sequence.
    pub number: String,
    pub amount_due: Money,
    pub amount_paid: Money,
    pub status: InvoiceStatus,
    pub issued_at: Timestamp,
    pub due_at: Timestamp,
    pub deleted: bool,
}

/// Days until an invoice falls due.
const PAYMENT_TERM_DAYS: i64 = 30;

impl Invoice {
    /// Issues a pending invoice for an order.
    pub fn issue(order_id: OrderId, customer_id: UserId, number: String, amount_due: Money) -> Self {
        let issued_at = Timestamp::now();
        Self {
            id: InvoiceId::new(),
            order_id,
            customer_id,
            number,
            amount_due,
            amount_paid: Money::ZERO,
            status: InvoiceStatus::Pending,
            issued_at,
            due_at: issued_at.add_days(PAYMENT_TERM_DAYS),
            deleted: false,
        }
    }

    /// Remaining balance.
    pub fn outstanding(&self) -> Money {
        self.amount_due
            .checked_sub(self.amount_paid)
            .unwrap_or(Money::ZERO)
    }

    /// Applies a payment, updating `amount_paid` and deriving status.
    ///
    /// # Errors
    ///
    /// Rejects non-positive amounts, payments against non-payable
    /// invoices, and overpayment.
    pub fn apply_payment(&mut self, amount: Money) -> Result<(), DomainError> {
        if !amount.is_positive() {
            return Err(DomainError::validation("amount", "Payment amount must be positive"));
        }
        if !self.status.accepts_payment() {
            return Err(DomainError::new(
                ErrorCode::Conflict,
                format!("Invoice {} does not accept payments", self.status),
            ));
        }
        if amount > self.outstanding() {
            return Err(DomainError::conflict(format!(
                "Payment of {} exceeds outstanding balance of {}",
                amount,
                self.outstanding()
            )));
        }
        self.amount_paid = self
            .amount_paid
            .checked_add(amount)
            .ok_or_else(|| DomainError::conflict("Payment amount overflow"))?;
        self.status = if self.outstanding() == Money::ZERO {
            InvoiceStatus::Paid
        } else {
            InvoiceStatus::PartiallyPaid
        };
        Ok(())
    }

    /// Voids an unpaid invoice.
    pub fn void(&mut self) -> Result<(), DomainError> {
        if self.amount_paid.is_positive() {
            return Err(DomainError::conflict("Cannot void an invoice with recorded payments"));
        }
        if self.status == InvoiceStatus::Void {
            return Err(DomainError::conflict("Invoice is already void"));
        }
        self.status = InvoiceStatus::Void;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invoice(due_cents: i64) -> Invoice {
        Invoice::issue(
            OrderId::new(),
            UserId::new(),
            "INV-000042".to_string(),
            Money::from_cents(due_cents),
        )
    }

    #[test]
    fn issued_invoice_is_pending_with_term() {
        let inv = invoice(1000);
        assert_eq!(inv.status, InvoiceStatus::Pending);
        assert_eq!(inv.outstanding(), Money::from_cents(1000));
        assert!(inv.due_at.is_after(&inv.issued_at));
    }

    #[test]
    fn partial_payment_sets_partially_paid() {
        let mut inv = invoice(1000);
        inv.apply_payment(Money::from_cents(400)).unwrap();
        assert_eq!(inv.status, InvoiceStatus::PartiallyPaid);
        assert_eq!(inv.outstanding(), Money::from_cents(600));
    }

    #[test]
    fn full_payment_sets_paid() {
        let mut inv = invoice(1000);
        inv.apply_payment(Money::from_cents(400)).unwrap();
        inv.apply_payment(Money::from_cents(600)).unwrap();
        assert_eq!(inv.status, InvoiceStatus::Paid);
        assert_eq!(inv.outstanding(), Money::ZERO);
    }

    #[test]
    fn overpayment_is_rejected() {
        let mut inv = invoice(1000);
        let err = inv.apply_payment(Money::from_cents(1001)).unwrap_err();
        assert_eq!(err.code(), ErrorCode::Conflict);
        assert_eq!(inv.amount_paid, Money::ZERO);
    }

    #[test]
    fn paid_invoice_rejects_further_payments() {
        let mut inv = invoice(100);
        inv.apply_payment(Money::from_cents(100)).unwrap();
        assert!(inv.apply_payment(Money::from_cents(1)).is_err());
    }

    #[test]
    fn non_positive_amount_is_rejected() {
        let mut inv = invoice(100);
        assert!(inv.apply_payment(Money::ZERO).is_err());
        assert!(inv.apply_payment(Money::from_cents(-5)).is_err());
    }

    #[test]
    fn void_only_while_unpaid() {
        let mut inv = invoice(100);
        inv.void().unwrap();
        assert_eq!(inv.status, InvoiceStatus::Void);

        let mut paid = invoice(100);
        paid.apply_payment(Money::from_cents(50)).unwrap();
        assert!(paid.void().is_err());
    }

    #[test]
    fn void_invoice_rejects_payment() {
        let mut inv = invoice(100);
        inv.void().unwrap();
        assert!(inv.apply_payment(Money::from_cents(10)).is_err());
    }
}
