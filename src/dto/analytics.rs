use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct AnalyticsQuery {
    /// Only orders created within the last `days` days. All time when absent.
    pub days: Option<i64>,
    /// Number of top sellers to return, default 5.
    pub top: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TopProduct {
    pub product_id: Uuid,
    pub product_name: String,
    pub quantity_sold: i64,
    pub revenue: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AnalyticsSummary {
    pub total_orders: i64,
    pub paid_orders: i64,
    pub total_revenue: i64,
    pub average_order_value: i64,
    pub orders_by_status: Vec<StatusCount>,
    pub product_count: i64,
    pub active_product_count: i64,
    pub category_count: i64,
    pub low_stock_threshold: i32,
    pub low_stock_count: i64,
    pub top_products: Vec<TopProduct>,
}
