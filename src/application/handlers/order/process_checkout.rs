//! ProcessCheckoutHandler - the checkout pipeline.
//!
//! Validates the cart against the live catalog, prices every line from
//! current product prices, then hands the order, its lines, and the
//! freshly numbered invoice to the repository for one atomic write.

use std::sync::Arc;

use crate::domain::foundation::{
    AuthenticatedUser, DomainError, Money, OrderLineId, ProductId, StoreId,
};
use crate::domain::invoice::Invoice;
use crate::domain::order::{Order, OrderLine};
use crate::ports::{InvoiceRepository, OrderRepository, ProductRepository, StoreRepository};

/// One cart entry.
#[derive(Debug, Clone)]
pub struct CheckoutLine {
    pub product_id: ProductId,
    pub quantity: i32,
}

/// Command to check out a cart against one store.
#[derive(Debug, Clone)]
pub struct ProcessCheckoutCommand {
    pub store_id: StoreId,
    pub lines: Vec<CheckoutLine>,
}

/// Result of a successful checkout.
#[derive(Debug, Clone)]
pub struct ProcessCheckoutResult {
    pub order: Order,
    pub invoice: Invoice,
}

pub struct ProcessCheckoutHandler {
    orders: Arc<dyn OrderRepository>,
    products: Arc<dyn ProductRepository>,
    stores: Arc<dyn StoreRepository>,
    invoices: Arc<dyn InvoiceRepository>,
}

impl ProcessCheckoutHandler {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        products: Arc<dyn ProductRepository>,
        stores: Arc<dyn StoreRepository>,
        invoices: Arc<dyn InvoiceRepository>,
    ) -> Self {
        Self {
            orders,
            products,
            stores,
            invoices,
        }
    }

    pub async fn handle(
        &self,
        cmd: ProcessCheckoutCommand,
        actor: &AuthenticatedUser,
    ) -> Result<ProcessCheckoutResult, DomainError> {
        if !actor.can_place_order() {
            return Err(DomainError::forbidden("Only customers can check out"));
        }
        if cmd.lines.is_empty() {
            return Err(DomainError::validation("lines", "Cart cannot be empty"));
        }
        if cmd.lines.iter().any(|l| l.quantity < 1) {
            return Err(DomainError::validation("quantity", "Quantity must be at least 1"));
        }

        if self.stores.find_by_id(&cmd.store_id).await?.is_none() {
            return Err(DomainError::not_found("Store", cmd.store_id));
        }

        let ids: Vec<ProductId> = cmd.lines.iter().map(|l| l.product_id).collect();
        let catalog = self.products.find_by_ids(&ids).await?;

        // Price the cart from the live catalog. The repository re-checks
        // stock inside the transaction; this pass gives better errors
        // and keeps deleted or foreign products out entirely.
        let mut total = Money::ZERO;
        let mut priced = Vec::with_capacity(cmd.lines.len());
        for line in &cmd.lines {
            let product = catalog
                .iter()
                .find(|p| p.id == line.product_id)
                .ok_or_else(|| {
                    DomainError::validation("lines", format!("Product {} is unavailable", line.product_id))
                })?;
            if product.store_id != cmd.store_id {
                return Err(DomainError::validation(
                    "lines",
                    format!("Product {} belongs to another store", product.id),
                ));
            }
            if !product.has_stock(line.quantity) {
                return Err(DomainError::conflict(format!(
                    "Insufficient stock for product {}",
                    product.id
                )));
            }
            let line_total = product
                .price
                .checked_mul(i64::from(line.quantity))
                .ok_or_else(|| DomainError::validation("lines", "Line total overflow"))?;
            total = total
                .checked_add(line_total)
                .ok_or_else(|| DomainError::validation("lines", "Order total overflow"))?;
            priced.push((line.product_id, line.quantity, product.price));
        }

        let order = Order::new(cmd.store_id, actor.id, total);
        let lines: Vec<OrderLine> = priced
            .into_iter()
            .map(|(product_id, quantity, unit_price)| OrderLine {
                id: OrderLineId::new(),
                order_id: order.id,
                product_id,
                quantity,
                unit_price,
            })
            .collect();

        let number = self.invoices.next_invoice_number(&cmd.store_id).await?;
        let invoice = Invoice::issue(order.id, actor.id, number, total);

        self.orders.create_checkout(&order, &lines, &invoice).await?;

        tracing::info!(
            order_id = %order.id,
            invoice = %invoice.number,
            total = %total,
            "checkout completed"
        );
        Ok(ProcessCheckoutResult { order, invoice })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{
        MockInvoiceRepository, MockOrderRepository, MockProductRepository, MockStoreRepository,
    };
    use crate::domain::catalog::Product;
    use crate::domain::foundation::{ErrorCode, Role, UserId};
    use crate::domain::invoice::InvoiceStatus;
    use crate::domain::order::OrderStatus;
    use crate::domain::store::Store;

    struct Fixture {
        orders: Arc<MockOrderRepository>,
        handler: ProcessCheckoutHandler,
        store: Store,
        widget: Product,
        gadget: Product,
        customer: AuthenticatedUser,
    }

    fn fixture() -> Fixture {
        let store = Store::new(UserId::new(), "Acme", "acme").unwrap();
        let widget = Product::new(store.id, "Widget", "", Money::from_cents(250), 10).unwrap();
        let gadget = Product::new(store.id, "Gadget", "", Money::from_cents(1000), 2).unwrap();

        let orders = Arc::new(MockOrderRepository::new());
        let handler = ProcessCheckoutHandler::new(
            orders.clone(),
            Arc::new(
                MockProductRepository::new()
                    .with_product(widget.clone())
                    .with_product(gadget.clone()),
            ),
            Arc::new(MockStoreRepository::new().with_store(store.clone())),
            Arc::new(MockInvoiceRepository::new()),
        );
        let customer = AuthenticatedUser::new(UserId::new(), "c@example.com", Role::Customer, None);

        Fixture {
            orders,
            handler,
            store,
            widget,
            gadget,
            customer,
        }
    }

    #[tokio::test]
    async fn checkout_creates_order_lines_and_invoice_with_computed_total() {
        let f = fixture();
        let result = f
            .handler
            .handle(
                ProcessCheckoutCommand {
                    store_id: f.store.id,
                    lines: vec![
                        CheckoutLine { product_id: f.widget.id, quantity: 3 },
                        CheckoutLine { product_id: f.gadget.id, quantity: 1 },
                    ],
                },
                &f.customer,
            )
            .await
            .unwrap();

        // 3 × 2.50 + 1 × 10.00
        assert_eq!(result.order.total, Money::from_cents(1750));
        assert_eq!(result.order.status, OrderStatus::Pending);
        assert_eq!(result.invoice.amount_due, Money::from_cents(1750));
        assert_eq!(result.invoice.status, InvoiceStatus::Pending);
        assert_eq!(result.invoice.order_id, result.order.id);
        assert!(result.invoice.number.starts_with("INV-"));

        assert_eq!(f.orders.saved_orders().len(), 1);
        assert_eq!(f.orders.lines.lock().unwrap().len(), 2);
        assert_eq!(f.orders.saved_invoices().len(), 1);
    }

    #[tokio::test]
    async fn line_prices_are_frozen_from_catalog() {
        let f = fixture();
        f.handler
            .handle(
                ProcessCheckoutCommand {
                    store_id: f.store.id,
                    lines: vec![CheckoutLine { product_id: f.widget.id, quantity: 2 }],
                },
                &f.customer,
            )
            .await
            .unwrap();

        let lines = f.orders.lines.lock().unwrap();
        assert_eq!(lines[0].unit_price, Money::from_cents(250));
        assert_eq!(lines[0].line_total(), Money::from_cents(500));
    }

    #[tokio::test]
    async fn empty_cart_is_rejected() {
        let f = fixture();
        let err = f
            .handler
            .handle(
                ProcessCheckoutCommand { store_id: f.store.id, lines: vec![] },
                &f.customer,
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn zero_quantity_is_rejected() {
        let f = fixture();
        let err = f
            .handler
            .handle(
                ProcessCheckoutCommand {
                    store_id: f.store.id,
                    lines: vec![CheckoutLine { product_id: f.widget.id, quantity: 0 }],
                },
                &f.customer,
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn unknown_product_is_rejected_before_any_write() {
        let f = fixture();
        let err = f
            .handler
            .handle(
                ProcessCheckoutCommand {
                    store_id: f.store.id,
                    lines: vec![CheckoutLine { product_id: ProductId::new(), quantity: 1 }],
                },
                &f.customer,
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationFailed);
        assert!(f.orders.saved_orders().is_empty());
        assert!(f.orders.saved_invoices().is_empty());
    }

    #[tokio::test]
    async fn insufficient_stock_is_a_conflict() {
        let f = fixture();
        let err = f
            .handler
            .handle(
                ProcessCheckoutCommand {
                    store_id: f.store.id,
                    lines: vec![CheckoutLine { product_id: f.gadget.id, quantity: 3 }],
                },
                &f.customer,
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[tokio::test]
    async fn product_from_another_store_is_rejected() {
        let f = fixture();
        let other_store = Store::new(UserId::new(), "Other", "other").unwrap();
        let err = f
            .handler
            .handle(
                ProcessCheckoutCommand {
                    store_id: other_store.id,
                    lines: vec![CheckoutLine { product_id: f.widget.id, quantity: 1 }],
                },
                &f.customer,
            )
            .await
            .unwrap_err();
        // The other store doesn't exist in the fixture repository.
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn supplier_cannot_check_out() {
        let f = fixture();
        let supplier = AuthenticatedUser::new(UserId::new(), "s@example.com", Role::Supplier, None);
        let err = f
            .handler
            .handle(
                ProcessCheckoutCommand {
                    store_id: f.store.id,
                    lines: vec![CheckoutLine { product_id: f.widget.id, quantity: 1 }],
                },
                &supplier,
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn repository_conflict_bubbles_up_with_nothing_recorded() {
        let store = Store::new(UserId::new(), "Acme", "acme").unwrap();
        let widget = Product::new(store.id, "Widget", "", Money::from_cents(250), 10).unwrap();
        let orders = Arc::new(MockOrderRepository::failing_checkout());
        let handler = ProcessCheckoutHandler::new(
            orders.clone(),
            Arc::new(MockProductRepository::new().with_product(widget.clone())),
            Arc::new(MockStoreRepository::new().with_store(store.clone())),
            Arc::new(MockInvoiceRepository::new()),
        );
        let customer = AuthenticatedUser::new(UserId::new(), "c@example.com", Role::Customer, None);

        let err = handler
            .handle(
                ProcessCheckoutCommand {
                    store_id: store.id,
                    lines: vec![CheckoutLine { product_id: widget.id, quantity: 1 }],
                },
                &customer,
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::Conflict);
        assert!(orders.saved_orders().is_empty());
    }
}
