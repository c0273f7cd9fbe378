use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::store::{Cart, CartItem, Toast};

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddToCartRequest {
    pub product_id: Uuid,
    pub quantity: Option<i32>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCartItemRequest {
    pub quantity: i32,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartItem>,
    pub total_amount: i64,
    pub total_savings: i64,
    pub item_count: i64,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.items().to_vec(),
            total_amount: cart.total_amount(),
            total_savings: cart.total_savings(),
            item_count: cart.item_count(),
        }
    }
}

/// Cart state after a mutation, with the toast describing it.
#[derive(Debug, Serialize, ToSchema)]
pub struct CartMutation {
    pub cart: CartView,
    pub toast: Toast,
}
