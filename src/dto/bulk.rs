use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProductBulkOperation {
    Delete,
    Activate,
    Deactivate,
    SetPrice,
    AdjustStock,
    SetCategory,
    SetTag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OrderBulkOperation {
    SetStatus,
    Cancel,
}

impl ProductBulkOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductBulkOperation::Delete => "delete",
            ProductBulkOperation::Activate => "activate",
            ProductBulkOperation::Deactivate => "deactivate",
            ProductBulkOperation::SetPrice => "set_price",
            ProductBulkOperation::AdjustStock => "adjust_stock",
            ProductBulkOperation::SetCategory => "set_category",
            ProductBulkOperation::SetTag => "set_tag",
        }
    }
}

impl OrderBulkOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderBulkOperation::SetStatus => "set_status",
            OrderBulkOperation::Cancel => "cancel",
        }
    }
}

/// Operation arguments. Which fields are required depends on the operation.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct BulkData {
    pub price: Option<i64>,
    pub original_price: Option<i64>,
    pub delta: Option<i32>,
    pub category_id: Option<Uuid>,
    pub tag: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ProductBulkRequest {
    pub operation: ProductBulkOperation,
    pub ids: Vec<Uuid>,
    #[serde(default)]
    pub data: BulkData,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct OrderBulkRequest {
    pub operation: OrderBulkOperation,
    pub ids: Vec<Uuid>,
    #[serde(default)]
    pub data: BulkData,
}

#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
pub struct BulkFailure {
    pub id: Uuid,
    pub error: String,
}

/// `succeeded + failed == requested` always holds.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BulkResult {
    pub operation: String,
    pub requested: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub succeeded_ids: Vec<Uuid>,
    pub failures: Vec<BulkFailure>,
}
