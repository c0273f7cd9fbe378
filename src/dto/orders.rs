use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Order, OrderItem};

/// Places an order for every line currently in the caller's cart.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CheckoutRequest {
    /// Shipping address, stored trimmed.
    pub address: String,
    /// For example `upi`, `card` or `cod`. Stored lowercase.
    pub payment_method: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PayOrderRequest {
    /// Must match the invoice number issued at checkout.
    pub invoice_number: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderWithItems {
    pub order: Order,
    /// Total units across all lines.
    pub item_count: i32,
    pub items: Vec<OrderItem>,
}

impl OrderWithItems {
    pub fn new(order: Order, items: Vec<OrderItem>) -> Self {
        let item_count = items.iter().map(|item| item.quantity).sum();
        Self {
            order,
            item_count,
            items,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderList {
    pub items: Vec<Order>,
}
