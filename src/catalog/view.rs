use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    models::Product,
    store::{CartItem, WishlistItem},
};

/// Card shown in listing grids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductCard {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub price: i64,
    pub original_price: Option<i64>,
    pub discount_percent: Option<i64>,
    pub image: Option<String>,
    pub in_stock: bool,
    pub max_quantity: i32,
    pub category: Option<String>,
    pub size: Option<String>,
    pub tag: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ProductCard {
    /// `category` is the slug of the product's category, when known.
    pub fn from_product(product: Product, category: Option<String>, max_per_line: i32) -> Self {
        let discount_percent = discount_percent(product.price, product.original_price);
        Self {
            id: product.id,
            in_stock: product.stock > 0,
            max_quantity: product.stock.min(max_per_line).max(0),
            name: product.name,
            slug: product.slug,
            price: product.price,
            original_price: product.original_price,
            discount_percent,
            image: product.image,
            category,
            size: product.size,
            tag: product.tag,
            created_at: product.created_at,
        }
    }

    /// Cart line for `quantity` units of this card.
    pub fn to_cart_item(&self, quantity: i32) -> CartItem {
        CartItem {
            id: self.id,
            name: self.name.clone(),
            price: self.price,
            original_price: self.original_price,
            image: self.image.clone(),
            in_stock: self.in_stock,
            max_quantity: self.max_quantity,
            quantity,
        }
    }

    pub fn to_wishlist_item(&self) -> WishlistItem {
        WishlistItem {
            id: self.id,
            name: self.name.clone(),
            price: self.price,
            image: self.image.clone(),
            slug: self.slug.clone(),
        }
    }
}

/// Whole-percent discount, rounded down. `None` unless the original price
/// is above the current one.
pub fn discount_percent(price: i64, original_price: Option<i64>) -> Option<i64> {
    match original_price {
        Some(original) if original > price && original > 0 => {
            Some((original - price) * 100 / original)
        }
        _ => None,
    }
}
