use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    dto::cart::CartView,
    store::{Toast, Wishlist, WishlistItem},
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddToWishlistRequest {
    pub product_id: Uuid,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WishlistView {
    pub items: Vec<WishlistItem>,
    pub count: usize,
}

impl From<&Wishlist> for WishlistView {
    fn from(wishlist: &Wishlist) -> Self {
        Self {
            items: wishlist.items().to_vec(),
            count: wishlist.len(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WishlistMutation {
    pub wishlist: WishlistView,
    pub toast: Toast,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MoveToCartResponse {
    pub wishlist: WishlistView,
    pub cart: CartView,
    pub toast: Toast,
}
