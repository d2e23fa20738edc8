//! Order handlers - the checkout pipeline and fulfilment lifecycle.

mod cancel_order;
mod get_order;
mod list_orders;
mod process_checkout;
mod update_order_status;

pub use cancel_order::{CancelOrderCommand, CancelOrderHandler};
pub use get_order::{GetOrderHandler, GetOrderQuery, OrderDetails};
pub use list_orders::{ListMyOrdersQuery, ListOrdersHandler, ListStoreOrdersQuery};
pub use process_checkout::{
    CheckoutLine, ProcessCheckoutCommand, ProcessCheckoutHandler, ProcessCheckoutResult,
};
pub use update_order_status::{UpdateOrderStatusCommand, UpdateOrderStatusHandler};
