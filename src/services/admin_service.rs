use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::LockType;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit,
    bulk::{self, OrderAction, ProductAction, validate_order_status},
    dto::{
        bulk::{BulkResult, OrderBulkRequest, ProductBulkRequest},
        orders::{OrderList, OrderWithItems},
        products::ProductList,
    },
    entity::{
        orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders},
        products::{ActiveModel as ProductActive, Column as ProdCol, Entity as Products},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Order, Product},
    response::{ApiResponse, Meta},
    routes::admin::{InventoryAdjustRequest, UpdateOrderStatusRequest},
    routes::params::{LowStockQuery, OrderListQuery, SortOrder},
    services::{order_service, product_service},
    state::AppState,
};

pub async fn list_all_orders(
    state: &AppState,
    user: &AuthUser,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    ensure_admin(user)?;
    let (page, limit, offset) = query.pagination().normalize();

    let mut condition = Condition::all();
    if let Some(status) = query.status.as_ref().filter(|s| !s.is_empty()) {
        condition = condition.add(OrderCol::Status.eq(status.clone()));
    }

    let mut finder = Orders::find().filter(condition);

    let sort_order = query.sort_order.unwrap_or(SortOrder::Desc);
    finder = match sort_order {
        SortOrder::Asc => finder.order_by_asc(OrderCol::CreatedAt),
        SortOrder::Desc => finder.order_by_desc(OrderCol::CreatedAt),
    };

    let total = finder.clone().count(&state.orm).await? as i64;

    let orders = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Order::from)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(
        "Orders",
        OrderList { items: orders },
        Some(meta),
    ))
}

pub async fn get_order_admin(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<OrderWithItems>> {
    ensure_admin(user)?;
    let order = Orders::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let items = order_service::order_items_of(state, order.id).await?;

    Ok(ApiResponse::success(
        "Order found",
        OrderWithItems::new(Order::from(order), items),
        Some(Meta::empty()),
    ))
}

pub async fn update_order_status(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateOrderStatusRequest,
) -> AppResult<ApiResponse<Order>> {
    ensure_admin(user)?;
    validate_order_status(&payload.status)?;

    let order = set_order_status(state, id, &payload.status).await?;

    audit::record(
        state,
        user.user_id,
        "order_status_update",
        "orders",
        serde_json::json!({ "order_id": order.id, "status": order.status }),
    )
    .await;

    Ok(ApiResponse::success(
        "Order updated",
        Order::from(order),
        Some(Meta::empty()),
    ))
}

pub async fn list_low_stock(
    state: &AppState,
    user: &AuthUser,
    query: LowStockQuery,
) -> AppResult<ApiResponse<ProductList>> {
    ensure_admin(user)?;
    let threshold = query.threshold.unwrap_or(state.config.low_stock_threshold);
    let (page, limit, offset) = query.pagination().normalize();

    let finder = Products::find()
        .filter(ProdCol::Stock.lte(threshold))
        .order_by_asc(ProdCol::Stock)
        .order_by_desc(ProdCol::CreatedAt);

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Product::from)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(
        "Low stock",
        ProductList { items },
        Some(meta),
    ))
}

pub async fn adjust_inventory(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: InventoryAdjustRequest,
) -> AppResult<ApiResponse<Product>> {
    ensure_admin(user)?;
    if payload.delta == 0 {
        return Err(AppError::BadRequest("delta must not be 0".into()));
    }

    let updated = adjust_stock(state, id, payload.delta).await?;

    audit::record(
        state,
        user.user_id,
        "inventory_adjust",
        "products",
        serde_json::json!({ "product_id": updated.id, "delta": payload.delta }),
    )
    .await;

    Ok(ApiResponse::success(
        "Inventory updated",
        Product::from(updated),
        Some(Meta::empty()),
    ))
}

/// Every request argument is checked before the first row is touched.
pub async fn bulk_products(
    state: &AppState,
    user: &AuthUser,
    payload: ProductBulkRequest,
) -> AppResult<ApiResponse<BulkResult>> {
    ensure_admin(user)?;
    bulk::validate_ids(&payload.ids, state.config.bulk_max_ids)?;
    let action = payload.action()?;
    if let ProductAction::SetCategory(Some(category_id)) = action {
        product_service::ensure_category_exists(state, category_id).await?;
    }

    let operation = payload.operation.as_str();
    let action = &action;
    let result = bulk::run(operation, &payload.ids, move |id| {
        apply_product_action(state, id, action)
    })
    .await;

    tracing::info!(
        operation,
        requested = result.requested,
        succeeded = result.succeeded,
        failed = result.failed,
        "product bulk operation"
    );

    audit::record(
        state,
        user.user_id,
        "product_bulk",
        "products",
        serde_json::json!({
            "operation": operation,
            "succeeded": result.succeeded_ids,
            "failed": result.failed,
        }),
    )
    .await;

    Ok(ApiResponse::success(
        "Bulk operation finished",
        result,
        Some(Meta::empty()),
    ))
}

pub async fn bulk_orders(
    state: &AppState,
    user: &AuthUser,
    payload: OrderBulkRequest,
) -> AppResult<ApiResponse<BulkResult>> {
    ensure_admin(user)?;
    bulk::validate_ids(&payload.ids, state.config.bulk_max_ids)?;
    let action = payload.action()?;

    let operation = payload.operation.as_str();
    let action = &action;
    let result = bulk::run(operation, &payload.ids, move |id| {
        apply_order_action(state, id, action)
    })
    .await;

    tracing::info!(
        operation,
        requested = result.requested,
        succeeded = result.succeeded,
        failed = result.failed,
        "order bulk operation"
    );

    audit::record(
        state,
        user.user_id,
        "order_bulk",
        "orders",
        serde_json::json!({
            "operation": operation,
            "succeeded": result.succeeded_ids,
            "failed": result.failed,
        }),
    )
    .await;

    Ok(ApiResponse::success(
        "Bulk operation finished",
        result,
        Some(Meta::empty()),
    ))
}

async fn apply_product_action(state: &AppState, id: Uuid, action: &ProductAction) -> AppResult<()> {
    if let ProductAction::Delete = action {
        let result = Products::delete_by_id(id).exec(&state.orm).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        return Ok(());
    }
    if let ProductAction::AdjustStock(delta) = action {
        adjust_stock(state, id, *delta).await?;
        return Ok(());
    }

    let existing = Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: ProductActive = existing.into();
    match action {
        ProductAction::SetActive(is_active) => active.is_active = Set(*is_active),
        ProductAction::SetPrice {
            price,
            original_price,
        } => {
            active.price = Set(*price);
            active.original_price = Set(*original_price);
        }
        ProductAction::SetCategory(category_id) => active.category_id = Set(*category_id),
        ProductAction::SetTag(tag) => active.tag = Set(tag.clone()),
        ProductAction::Delete | ProductAction::AdjustStock(_) => {}
    }
    active.updated_at = Set(Utc::now().into());
    active.update(&state.orm).await?;
    Ok(())
}

async fn apply_order_action(state: &AppState, id: Uuid, action: &OrderAction) -> AppResult<()> {
    match action {
        OrderAction::SetStatus(status) => {
            set_order_status(state, id, status).await?;
        }
    }
    Ok(())
}

async fn set_order_status(
    state: &AppState,
    id: Uuid,
    status: &str,
) -> AppResult<crate::entity::orders::Model> {
    let existing = Orders::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: OrderActive = existing.into();
    active.status = Set(status.to_string());
    active.updated_at = Set(Utc::now().into());
    Ok(active.update(&state.orm).await?)
}

async fn adjust_stock(
    state: &AppState,
    id: Uuid,
    delta: i32,
) -> AppResult<crate::entity::products::Model> {
    let txn = state.orm.begin().await?;
    let product = Products::find_by_id(id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;

    let new_stock = bulk::adjusted_stock(product.stock, delta)?;

    let mut active: ProductActive = product.into();
    active.stock = Set(new_stock);
    active.updated_at = Set(Utc::now().into());
    let updated = active.update(&txn).await?;

    txn.commit().await?;
    Ok(updated)
}
