use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::StoreError;

/// One cart line. `id` is the product id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: Uuid,
    pub name: String,
    pub price: i64,
    pub original_price: Option<i64>,
    pub image: Option<String>,
    pub in_stock: bool,
    pub max_quantity: i32,
    pub quantity: i32,
}

impl CartItem {
    pub fn line_total(&self) -> i64 {
        self.price * i64::from(self.quantity)
    }

    pub fn line_savings(&self) -> i64 {
        match self.original_price {
            Some(original) if original > self.price => {
                (original - self.price) * i64::from(self.quantity)
            }
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn get(&self, id: Uuid) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Adds `item.quantity` units of `item`. An existing line with the same
    /// id is refreshed with the new product data and its quantity grows,
    /// capped at `max_quantity`.
    pub fn add(&mut self, item: CartItem) -> Result<CartItem, StoreError> {
        if item.quantity < 1 {
            return Err(StoreError::QuantityBelowMinimum);
        }
        if !item.in_stock || item.max_quantity < 1 {
            return Err(StoreError::OutOfStock(item.name));
        }

        let line = match self.items.iter().position(|line| line.id == item.id) {
            Some(idx) => {
                let quantity = self.items[idx]
                    .quantity
                    .saturating_add(item.quantity)
                    .min(item.max_quantity);
                self.items[idx] = CartItem { quantity, ..item };
                &self.items[idx]
            }
            None => {
                let quantity = item.quantity.min(item.max_quantity);
                self.items.push(CartItem { quantity, ..item });
                &self.items[self.items.len() - 1]
            }
        };
        Ok(line.clone())
    }

    pub fn update_quantity(&mut self, id: Uuid, quantity: i32) -> Result<CartItem, StoreError> {
        if quantity < 1 {
            return Err(StoreError::QuantityBelowMinimum);
        }
        let line = self
            .items
            .iter_mut()
            .find(|line| line.id == id)
            .ok_or(StoreError::NotFound(id))?;
        if quantity > line.max_quantity {
            return Err(StoreError::QuantityAboveMaximum {
                requested: quantity,
                max: line.max_quantity,
            });
        }
        line.quantity = quantity;
        Ok(line.clone())
    }

    pub fn increment(&mut self, id: Uuid) -> Result<CartItem, StoreError> {
        let current = self.get(id).ok_or(StoreError::NotFound(id))?.quantity;
        self.update_quantity(id, current.saturating_add(1))
    }

    pub fn decrement(&mut self, id: Uuid) -> Result<CartItem, StoreError> {
        let current = self.get(id).ok_or(StoreError::NotFound(id))?.quantity;
        self.update_quantity(id, current.saturating_sub(1))
    }

    pub fn remove(&mut self, id: Uuid) -> Result<CartItem, StoreError> {
        let idx = self
            .items
            .iter()
            .position(|line| line.id == id)
            .ok_or(StoreError::NotFound(id))?;
        Ok(self.items.remove(idx))
    }

    pub fn clear(&mut self) -> Vec<CartItem> {
        std::mem::take(&mut self.items)
    }

    pub fn total_amount(&self) -> i64 {
        self.items.iter().map(CartItem::line_total).sum()
    }

    pub fn total_savings(&self) -> i64 {
        self.items.iter().map(CartItem::line_savings).sum()
    }

    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|line| i64::from(line.quantity)).sum()
    }
}
