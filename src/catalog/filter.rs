use serde::Deserialize;
use utoipa::ToSchema;

use super::ProductCard;

/// Predicate applied to an already-fetched list of cards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    /// Accepted sizes, lowercase. Empty accepts every size.
    pub sizes: Vec<String>,
    pub in_stock_only: bool,
}

impl ProductFilter {
    /// Parses a comma separated size list such as `small,Medium`.
    pub fn with_sizes(mut self, sizes: &str) -> Self {
        self.sizes = sizes
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.min_price.is_none()
            && self.max_price.is_none()
            && self.sizes.is_empty()
            && !self.in_stock_only
    }

    pub fn matches(&self, card: &ProductCard) -> bool {
        if self.min_price.is_some_and(|min| card.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| card.price > max) {
            return false;
        }
        if self.in_stock_only && !card.in_stock {
            return false;
        }
        if !self.sizes.is_empty() {
            let Some(size) = card.size.as_deref() else {
                return false;
            };
            if !self.sizes.iter().any(|s| s.eq_ignore_ascii_case(size)) {
                return false;
            }
        }
        true
    }

    /// Keeps the matching cards in their original order.
    pub fn apply(&self, mut cards: Vec<ProductCard>) -> Vec<ProductCard> {
        if !self.is_empty() {
            cards.retain(|card| self.matches(card));
        }
        cards
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CardSort {
    /// Order as fetched.
    #[default]
    Featured,
    PriceAsc,
    PriceDesc,
    Name,
    Newest,
}

impl CardSort {
    pub fn apply(self, cards: &mut [ProductCard]) {
        match self {
            CardSort::Featured => {}
            CardSort::PriceAsc => cards.sort_by_key(|card| card.price),
            CardSort::PriceDesc => cards.sort_by(|a, b| b.price.cmp(&a.price)),
            CardSort::Name => cards.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase())),
            CardSort::Newest => cards.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        }
    }
}
