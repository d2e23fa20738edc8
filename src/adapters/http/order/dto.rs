//! HTTP DTOs for order endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::order::OrderDetails;
use crate::domain::foundation::Timestamp;
use crate::domain::order::{Order, OrderLine, OrderStatus};

#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutRequest {
    pub store_id: String,
    pub lines: Vec<CheckoutLineRequest>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutLineRequest {
    pub product_id: String,
    pub quantity: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderResponse {
    pub id: String,
    pub store_id: String,
    pub customer_id: String,
    pub status: OrderStatus,
    pub total_cents: i64,
    pub created_at: Timestamp,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id.to_string(),
            store_id: order.store_id.to_string(),
            customer_id: order.customer_id.to_string(),
            status: order.status,
            total_cents: order.total.cents(),
            created_at: order.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderLineResponse {
    pub product_id: String,
    pub quantity: i32,
    pub unit_price_cents: i64,
    pub line_total_cents: i64,
}

impl From<OrderLine> for OrderLineResponse {
    fn from(line: OrderLine) -> Self {
        Self {
            product_id: line.product_id.to_string(),
            quantity: line.quantity,
            unit_price_cents: line.unit_price.cents(),
            line_total_cents: line.line_total().cents(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderDetailsResponse {
    #[serde(flatten)]
    pub order: OrderResponse,
    pub lines: Vec<OrderLineResponse>,
}

impl From<OrderDetails> for OrderDetailsResponse {
    fn from(details: OrderDetails) -> Self {
        Self {
            order: details.order.into(),
            lines: details.lines.into_iter().map(OrderLineResponse::from).collect(),
        }
    }
}

/// Returned from checkout: the order plus its invoice handle.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutResponse {
    pub order: OrderResponse,
    pub invoice_id: String,
    pub invoice_number: String,
}
