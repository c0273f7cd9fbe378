use serde::Deserialize;
use utoipa::ToSchema;

use crate::catalog::{CardSort, ProductFilter};

#[derive(Debug, Clone, Copy, Default, Deserialize, ToSchema)]
pub struct Pagination {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl Pagination {
    pub fn normalize(&self) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1).saturating_mul(per_page);
        (page, per_page, offset)
    }
}

#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProductSortBy {
    CreatedAt,
    Price,
    Name,
    Stock,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ProductQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub q: Option<String>,
    /// Category slug.
    pub category: Option<String>,
    pub tag: Option<String>,
    pub size: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    /// Admins may list inactive products too.
    pub include_inactive: Option<bool>,
    pub sort_by: Option<ProductSortBy>,
    pub sort_order: Option<SortOrder>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct OrderListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub status: Option<String>,
    pub sort_order: Option<SortOrder>,
}

// Query strings cannot be flattened into numeric fields, so the list
// queries carry `page`/`per_page` themselves.
macro_rules! paginated {
    ($($ty:ty),*) => {
        $(impl $ty {
            pub fn pagination(&self) -> Pagination {
                Pagination {
                    page: self.page,
                    per_page: self.per_page,
                }
            }
        })*
    };
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct LowStockQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    /// Defaults to the configured low stock threshold.
    pub threshold: Option<i32>,
}

paginated!(ProductQuery, OrderListQuery, LowStockQuery);

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CategoryListQuery {
    /// Include inactive categories (admin only).
    pub all: Option<bool>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CollectionQuery {
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    /// Comma separated sizes, e.g. `small,medium`.
    pub size: Option<String>,
    pub in_stock: Option<bool>,
    pub sort: Option<CardSort>,
}

impl CollectionQuery {
    pub fn filter(&self) -> ProductFilter {
        let filter = ProductFilter {
            min_price: self.min_price,
            max_price: self.max_price,
            sizes: Vec::new(),
            in_stock_only: self.in_stock.unwrap_or(false),
        };
        match self.size.as_deref() {
            Some(sizes) => filter.with_sizes(sizes),
            None => filter,
        }
    }

    pub fn sort(&self) -> CardSort {
        self.sort.unwrap_or_default()
    }
}
