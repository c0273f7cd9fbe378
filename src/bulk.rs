//! Admin bulk operations: one action applied to each selected id in turn.
//!
//! Ids are processed independently. A failing id is recorded and the run
//! moves on, so the outcome is a count of successes and failures rather
//! than all-or-nothing.

use std::future::Future;

use uuid::Uuid;

use crate::{
    dto::bulk::{
        BulkData, BulkFailure, BulkResult, OrderBulkOperation, OrderBulkRequest,
        ProductBulkOperation, ProductBulkRequest,
    },
    error::{AppError, AppResult},
    services::product_service::validate_pricing,
};

pub const ORDER_STATUSES: [&str; 5] = ["pending", "paid", "shipped", "completed", "cancelled"];

/// A product bulk request with its arguments checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductAction {
    Delete,
    SetActive(bool),
    SetPrice {
        price: i64,
        original_price: Option<i64>,
    },
    AdjustStock(i32),
    SetCategory(Option<Uuid>),
    SetTag(Option<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderAction {
    SetStatus(String),
}

pub fn validate_order_status(status: &str) -> AppResult<()> {
    if ORDER_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(AppError::BadRequest("Invalid order status".into()))
    }
}

/// Stock after applying `delta`. Rejects results below zero or past `i32`.
pub fn adjusted_stock(stock: i32, delta: i32) -> AppResult<i32> {
    match stock.checked_add(delta) {
        Some(next) if next >= 0 => Ok(next),
        Some(_) => Err(AppError::BadRequest("stock cannot be negative".into())),
        None => Err(AppError::BadRequest("stock adjustment out of range".into())),
    }
}

pub fn validate_ids(ids: &[Uuid], max: usize) -> AppResult<()> {
    if ids.is_empty() {
        return Err(AppError::BadRequest("ids must not be empty".into()));
    }
    if ids.len() > max {
        return Err(AppError::BadRequest(format!(
            "at most {max} ids per bulk request"
        )));
    }
    Ok(())
}

impl ProductBulkRequest {
    pub fn action(&self) -> AppResult<ProductAction> {
        let BulkData {
            price,
            original_price,
            delta,
            category_id,
            tag,
            ..
        } = &self.data;

        let action = match self.operation {
            ProductBulkOperation::Delete => ProductAction::Delete,
            ProductBulkOperation::Activate => ProductAction::SetActive(true),
            ProductBulkOperation::Deactivate => ProductAction::SetActive(false),
            ProductBulkOperation::SetPrice => {
                let price = price.ok_or_else(|| {
                    AppError::BadRequest("data.price is required for set_price".into())
                })?;
                validate_pricing(price, *original_price)?;
                ProductAction::SetPrice {
                    price,
                    original_price: *original_price,
                }
            }
            ProductBulkOperation::AdjustStock => match delta {
                Some(0) | None => {
                    return Err(AppError::BadRequest(
                        "data.delta must be a non-zero number for adjust_stock".into(),
                    ));
                }
                Some(delta) => ProductAction::AdjustStock(*delta),
            },
            ProductBulkOperation::SetCategory => ProductAction::SetCategory(*category_id),
            ProductBulkOperation::SetTag => ProductAction::SetTag(
                tag.as_ref()
                    .map(|t| t.trim().to_lowercase())
                    .filter(|t| !t.is_empty()),
            ),
        };
        Ok(action)
    }
}

impl OrderBulkRequest {
    pub fn action(&self) -> AppResult<OrderAction> {
        match self.operation {
            OrderBulkOperation::SetStatus => {
                let status = self.data.status.clone().ok_or_else(|| {
                    AppError::BadRequest("data.status is required for set_status".into())
                })?;
                validate_order_status(&status)?;
                Ok(OrderAction::SetStatus(status))
            }
            OrderBulkOperation::Cancel => Ok(OrderAction::SetStatus("cancelled".into())),
        }
    }
}

/// Applies `apply` to every id in order and tallies the outcomes.
pub async fn run<F, Fut>(operation: &str, ids: &[Uuid], mut apply: F) -> BulkResult
where
    F: FnMut(Uuid) -> Fut,
    Fut: Future<Output = AppResult<()>>,
{
    let mut succeeded_ids = Vec::with_capacity(ids.len());
    let mut failures = Vec::new();

    for &id in ids {
        match apply(id).await {
            Ok(()) => succeeded_ids.push(id),
            Err(err) => {
                tracing::debug!(%id, operation, error = %err, "bulk item failed");
                failures.push(BulkFailure {
                    id,
                    error: err.to_string(),
                });
            }
        }
    }

    BulkResult {
        operation: operation.to_string(),
        requested: ids.len(),
        succeeded: succeeded_ids.len(),
        failed: failures.len(),
        succeeded_ids,
        failures,
    }
}
