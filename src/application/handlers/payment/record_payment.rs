//! RecordPaymentHandler - apply money to an invoice.
//!
//! The balance arithmetic runs on the domain entity; the repository
//! persists the payment and the new balance in one transaction,
//! predicated on the balance this handler read.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError, InvoiceId, Money};
use crate::domain::invoice::Invoice;
use crate::domain::payment::{Payment, PaymentMethod};
use crate::ports::{InvoiceRepository, OrderRepository, PaymentRepository, StoreRepository};

#[derive(Debug, Clone)]
pub struct RecordPaymentCommand {
    pub invoice_id: InvoiceId,
    pub amount: Money,
    pub method: PaymentMethod,
    pub reference: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RecordPaymentResult {
    pub payment: Payment,
    pub invoice: Invoice,
}

pub struct RecordPaymentHandler {
    payments: Arc<dyn PaymentRepository>,
    invoices: Arc<dyn InvoiceRepository>,
    orders: Arc<dyn OrderRepository>,
    stores: Arc<dyn StoreRepository>,
}

impl RecordPaymentHandler {
    pub fn new(
        payments: Arc<dyn PaymentRepository>,
        invoices: Arc<dyn InvoiceRepository>,
        orders: Arc<dyn OrderRepository>,
        stores: Arc<dyn StoreRepository>,
    ) -> Self {
        Self {
            payments,
            invoices,
            orders,
            stores,
        }
    }

    /// Customers pay their own invoices; the store side records manual
    /// payments (bank transfer, cash) on its invoices.
    pub async fn handle(
        &self,
        cmd: RecordPaymentCommand,
        actor: &AuthenticatedUser,
    ) -> Result<RecordPaymentResult, DomainError> {
        let mut invoice = self
            .invoices
            .find_by_id(&cmd.invoice_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Invoice", cmd.invoice_id))?;

        if !self.may_pay(&invoice, actor).await? {
            return Err(DomainError::forbidden("Cannot record payments on this invoice"));
        }

        let paid_before = invoice.amount_paid;
        invoice.apply_payment(cmd.amount)?;

        let payment = Payment::new(
            invoice.id,
            actor.id,
            cmd.amount,
            cmd.method,
            cmd.reference,
        );

        self.payments
            .record_and_apply(&payment, &invoice, paid_before)
            .await?;

        tracing::info!(
            invoice = %invoice.number,
            amount = %cmd.amount,
            status = %invoice.status,
            "payment recorded"
        );
        Ok(RecordPaymentResult { payment, invoice })
    }

    async fn may_pay(
        &self,
        invoice: &Invoice,
        actor: &AuthenticatedUser,
    ) -> Result<bool, DomainError> {
        if actor.is_admin() || actor.is_self(&invoice.customer_id) {
            return Ok(true);
        }
        if let Some(order) = self.orders.find_by_id(&invoice.order_id).await? {
            if let Some(store) = self.stores.find_by_id(&order.store_id).await? {
                return Ok(actor.can_manage_store(&store.owner_id));
            }
        }
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{
        MockInvoiceRepository, MockOrderRepository, MockPaymentRepository, MockStoreRepository,
    };
    use crate::domain::foundation::{ErrorCode, Role, UserId};
    use crate::domain::invoice::InvoiceStatus;
    use crate::domain::order::Order;
    use crate::domain::store::Store;

    struct Fixture {
        invoice: Invoice,
        customer: AuthenticatedUser,
        payments: Arc<MockPaymentRepository>,
        handler: RecordPaymentHandler,
    }

    fn fixture() -> Fixture {
        let store = Store::new(UserId::new(), "Acme", "acme").unwrap();
        let order = Order::new(store.id, UserId::new(), Money::from_cents(1000));
        let invoice = Invoice::issue(
            order.id,
            order.customer_id,
            "INV-000001".to_string(),
            Money::from_cents(1000),
        );
        let customer =
            AuthenticatedUser::new(order.customer_id, "c@example.com", Role::Customer, None);

        let payments = Arc::new(MockPaymentRepository::new());
        let handler = RecordPaymentHandler::new(
            payments.clone(),
            Arc::new(MockInvoiceRepository::new().with_invoice(invoice.clone())),
            Arc::new(MockOrderRepository::new().with_order(order)),
            Arc::new(MockStoreRepository::new().with_store(store)),
        );

        Fixture {
            invoice,
            customer,
            payments,
            handler,
        }
    }

    fn cmd(invoice_id: InvoiceId, cents: i64) -> RecordPaymentCommand {
        RecordPaymentCommand {
            invoice_id,
            amount: Money::from_cents(cents),
            method: PaymentMethod::Card,
            reference: None,
        }
    }

    #[tokio::test]
    async fn partial_payment_marks_invoice_partially_paid() {
        let f = fixture();
        let result = f
            .handler
            .handle(cmd(f.invoice.id, 400), &f.customer)
            .await
            .unwrap();

        assert_eq!(result.invoice.status, InvoiceStatus::PartiallyPaid);
        assert_eq!(result.invoice.amount_paid, Money::from_cents(400));
        assert_eq!(f.payments.recorded().len(), 1);
    }

    #[tokio::test]
    async fn full_payment_marks_invoice_paid() {
        let f = fixture();
        let result = f
            .handler
            .handle(cmd(f.invoice.id, 1000), &f.customer)
            .await
            .unwrap();
        assert_eq!(result.invoice.status, InvoiceStatus::Paid);
    }

    #[tokio::test]
    async fn overpayment_is_a_conflict_and_nothing_is_recorded() {
        let f = fixture();
        let err = f
            .handler
            .handle(cmd(f.invoice.id, 1001), &f.customer)
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::Conflict);
        assert!(f.payments.recorded().is_empty());
    }

    #[tokio::test]
    async fn non_positive_amount_is_rejected() {
        let f = fixture();
        let err = f
            .handler
            .handle(cmd(f.invoice.id, 0), &f.customer)
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn stranger_cannot_pay_someone_elses_invoice() {
        let f = fixture();
        let stranger = AuthenticatedUser::new(UserId::new(), "x@example.com", Role::Customer, None);
        let err = f
            .handler
            .handle(cmd(f.invoice.id, 100), &stranger)
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn balance_race_surfaces_as_conflict() {
        let store = Store::new(UserId::new(), "Acme", "acme").unwrap();
        let order = Order::new(store.id, UserId::new(), Money::from_cents(1000));
        let invoice = Invoice::issue(
            order.id,
            order.customer_id,
            "INV-000001".to_string(),
            Money::from_cents(1000),
        );
        let customer =
            AuthenticatedUser::new(order.customer_id, "c@example.com", Role::Customer, None);
        let handler = RecordPaymentHandler::new(
            Arc::new(MockPaymentRepository::conflicting()),
            Arc::new(MockInvoiceRepository::new().with_invoice(invoice.clone())),
            Arc::new(MockOrderRepository::new().with_order(order)),
            Arc::new(MockStoreRepository::new().with_store(store)),
        );

        let err = handler
            .handle(cmd(invoice.id, 100), &customer)
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::Conflict);
    }
}
