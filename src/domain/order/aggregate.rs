//! Order aggregate.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    DomainError, Money, OrderId, OrderLineId, ProductId, StoreId, Timestamp, UserId,
};

use super::OrderStatus;

/// A customer order against one store.
///
/// `total` is the sum of line totals, priced at checkout time. Catalog
/// edits after checkout do not change it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub store_id: StoreId,
    pub customer_id: UserId,
    pub status: OrderStatus,
    pub total: Money,
    pub deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One product line on an order. Quantity and unit price are frozen at
/// checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    pub id: OrderLineId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: i32,
    pub unit_price: Money,
}

impl OrderLine {
    pub fn line_total(&self) -> Money {
        self.unit_price
            .checked_mul(i64::from(self.quantity))
            .unwrap_or(Money::ZERO)
    }
}

impl Order {
    /// Creates a pending order. Line construction and total arithmetic
    /// happen in the checkout handler, which owns product validation.
    pub fn new(store_id: StoreId, customer_id: UserId, total: Money) -> Self {
        let now = Timestamp::now();
        Self {
            id: OrderId::new(),
            store_id,
            customer_id,
            status: OrderStatus::Pending,
            total,
            deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Moves the order to `next`, rejecting illegal transitions.
    pub fn transition_to(&mut self, next: OrderStatus) -> Result<(), DomainError> {
        if !self.status.can_become(next) {
            return Err(DomainError::invalid_transition(self.status, next));
        }
        self.status = next;
        self.updated_at = Timestamp::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order() -> Order {
        Order::new(StoreId::new(), UserId::new(), Money::from_cents(1000))
    }

    #[test]
    fn new_order_is_pending() {
        assert_eq!(order().status, OrderStatus::Pending);
    }

    #[test]
    fn legal_transition_succeeds() {
        let mut o = order();
        o.transition_to(OrderStatus::Processing).unwrap();
        assert_eq!(o.status, OrderStatus::Processing);
    }

    #[test]
    fn illegal_transition_is_rejected_and_state_unchanged() {
        let mut o = order();
        let err = o.transition_to(OrderStatus::Delivered).unwrap_err();
        assert_eq!(o.status, OrderStatus::Pending);
        assert!(err.message().contains("pending"));
    }

    #[test]
    fn line_total_multiplies_quantity() {
        let line = OrderLine {
            id: OrderLineId::new(),
            order_id: OrderId::new(),
            product_id: ProductId::new(),
            quantity: 3,
            unit_price: Money::from_cents(250),
        };
        assert_eq!(line.line_total(), Money::from_cents(750));
    }
}
