use sqlx::FromRow;
use uuid::Uuid;

use crate::{
    dto::analytics::{AnalyticsQuery, AnalyticsSummary, StatusCount, TopProduct},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    response::{ApiResponse, Meta},
    state::AppState,
};

#[derive(FromRow)]
struct OrderTotals {
    total_orders: i64,
    paid_orders: i64,
    total_revenue: i64,
}

#[derive(FromRow)]
struct StatusRow {
    status: String,
    count: i64,
}

#[derive(FromRow)]
struct CatalogCounts {
    product_count: i64,
    active_product_count: i64,
    low_stock_count: i64,
    category_count: i64,
}

#[derive(FromRow)]
struct TopRow {
    product_id: Uuid,
    product_name: String,
    quantity_sold: i64,
    revenue: i64,
}

// Revenue only counts paid orders; `$1` limits to the last N days when set.
const ORDER_TOTALS_SQL: &str = r#"
    SELECT
        COUNT(*) AS total_orders,
        COUNT(*) FILTER (WHERE payment_status = 'paid') AS paid_orders,
        COALESCE(SUM(total_amount) FILTER (WHERE payment_status = 'paid'), 0)::BIGINT AS total_revenue
    FROM orders
    WHERE ($1::BIGINT IS NULL OR created_at >= NOW() - make_interval(days => $1::INT))
"#;

const STATUS_SQL: &str = r#"
    SELECT status, COUNT(*) AS count
    FROM orders
    WHERE ($1::BIGINT IS NULL OR created_at >= NOW() - make_interval(days => $1::INT))
    GROUP BY status
    ORDER BY status
"#;

const CATALOG_SQL: &str = r#"
    SELECT
        (SELECT COUNT(*) FROM products) AS product_count,
        (SELECT COUNT(*) FROM products WHERE is_active) AS active_product_count,
        (SELECT COUNT(*) FROM products WHERE stock <= $1) AS low_stock_count,
        (SELECT COUNT(*) FROM categories) AS category_count
"#;

const TOP_PRODUCTS_SQL: &str = r#"
    SELECT
        oi.product_id,
        MAX(oi.product_name) AS product_name,
        SUM(oi.quantity)::BIGINT AS quantity_sold,
        SUM(oi.quantity::BIGINT * oi.price)::BIGINT AS revenue
    FROM order_items oi
    JOIN orders o ON o.id = oi.order_id
    WHERE o.payment_status = 'paid'
      AND ($1::BIGINT IS NULL OR o.created_at >= NOW() - make_interval(days => $1::INT))
    GROUP BY oi.product_id
    ORDER BY quantity_sold DESC, revenue DESC
    LIMIT $2
"#;

/// Longest reporting window, ten years.
pub const MAX_DAYS: i64 = 3650;

pub async fn summary(
    state: &AppState,
    user: &AuthUser,
    query: AnalyticsQuery,
) -> AppResult<ApiResponse<AnalyticsSummary>> {
    ensure_admin(user)?;
    if query.days.is_some_and(|days| !(1..=MAX_DAYS).contains(&days)) {
        return Err(AppError::BadRequest(format!(
            "days must be between 1 and {MAX_DAYS}"
        )));
    }
    let days = query.days;
    let top = query.top.unwrap_or(5).clamp(1, 50);
    let threshold = state.config.low_stock_threshold;

    let totals: OrderTotals = sqlx::query_as(ORDER_TOTALS_SQL)
        .bind(days)
        .fetch_one(&state.pool)
        .await?;

    let orders_by_status = sqlx::query_as::<_, StatusRow>(STATUS_SQL)
        .bind(days)
        .fetch_all(&state.pool)
        .await?
        .into_iter()
        .map(|row| StatusCount {
            status: row.status,
            count: row.count,
        })
        .collect();

    let catalog: CatalogCounts = sqlx::query_as(CATALOG_SQL)
        .bind(threshold)
        .fetch_one(&state.pool)
        .await?;

    let top_products = sqlx::query_as::<_, TopRow>(TOP_PRODUCTS_SQL)
        .bind(days)
        .bind(top)
        .fetch_all(&state.pool)
        .await?
        .into_iter()
        .map(|row| TopProduct {
            product_id: row.product_id,
            product_name: row.product_name,
            quantity_sold: row.quantity_sold,
            revenue: row.revenue,
        })
        .collect();

    let average_order_value = if totals.paid_orders > 0 {
        totals.total_revenue / totals.paid_orders
    } else {
        0
    };

    let data = AnalyticsSummary {
        total_orders: totals.total_orders,
        paid_orders: totals.paid_orders,
        total_revenue: totals.total_revenue,
        average_order_value,
        orders_by_status,
        product_count: catalog.product_count,
        active_product_count: catalog.active_product_count,
        category_count: catalog.category_count,
        low_stock_threshold: threshold,
        low_stock_count: catalog.low_stock_count,
        top_products,
    };

    Ok(ApiResponse::success("Analytics", data, Some(Meta::empty())))
}
