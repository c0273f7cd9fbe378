use chrono::Utc;
use sea_orm::sea_query::{Expr, LockType};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, Condition, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::orders::{CheckoutRequest, OrderList, OrderWithItems, PayOrderRequest},
    entity::{
        order_items::{ActiveModel as OrderItemActive, Column as OrderItemCol, Entity as OrderItems},
        orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders},
        products::{Column as ProdCol, Entity as Products},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Order, OrderItem},
    response::{ApiResponse, Meta},
    routes::params::{OrderListQuery, SortOrder},
    state::AppState,
    store::{Cart, CartItem},
};

pub async fn list_orders(
    state: &AppState,
    user: &AuthUser,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    let (page, limit, offset) = query.pagination().normalize();
    let mut condition = Condition::all().add(OrderCol::UserId.eq(user.user_id));
    if let Some(status) = query.status.as_ref().filter(|s| !s.is_empty()) {
        condition = condition.add(OrderCol::Status.eq(status.clone()));
    }

    let sort_order = query.sort_order.unwrap_or(SortOrder::Desc);

    let mut finder = Orders::find().filter(condition);
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
        "Ok",
        OrderList { items: orders },
        Some(meta),
    ))
}

/// Turns the user's cart into an order. Every line is re-checked against
/// the locked product row and charged at the current price. The cart lines
/// that were ordered are removed only after the transaction commits.
pub async fn checkout(
    state: &AppState,
    user: &AuthUser,
    payload: CheckoutRequest,
) -> AppResult<ApiResponse<OrderWithItems>> {
    let address = payload.address.trim().to_string();
    let payment_method = payload.payment_method.trim().to_lowercase();
    if address.is_empty() {
        return Err(AppError::BadRequest("address is required".into()));
    }
    if payment_method.is_empty() {
        return Err(AppError::BadRequest("payment_method is required".into()));
    }

    let store = state
        .carts
        .find(user.user_id)
        .await
        .ok_or_else(|| AppError::BadRequest("Cart is empty".into()))?;
    let lines: Vec<CartItem> = store.read(|cart| cart.items().to_vec()).await;
    if lines.is_empty() {
        return Err(AppError::BadRequest("Cart is empty".into()));
    }

    let txn = state.orm.begin().await?;

    struct PricedLine {
        product_id: Uuid,
        name: String,
        quantity: i32,
        price: i64,
    }

    let mut priced = Vec::with_capacity(lines.len());
    let mut total_amount: i64 = 0;
    let mut total_savings: i64 = 0;
    for line in &lines {
        let product = Products::find_by_id(line.id)
            .lock(LockType::Update)
            .one(&txn)
            .await?;
        let product = match product {
            Some(p) if p.is_active => p,
            _ => {
                return Err(AppError::BadRequest(format!(
                    "{} is no longer available",
                    line.name
                )));
            }
        };
        if product.stock < line.quantity {
            return Err(AppError::BadRequest(format!(
                "Insufficient stock for {}",
                product.name
            )));
        }
        let quantity = i64::from(line.quantity);
        total_amount += product.price * quantity;
        if let Some(original) = product.original_price.filter(|o| *o > product.price) {
            total_savings += (original - product.price) * quantity;
        }
        priced.push(PricedLine {
            product_id: product.id,
            name: product.name,
            quantity: line.quantity,
            price: product.price,
        });
    }

    let order_id = Uuid::new_v4();
    let order = OrderActive {
        id: Set(order_id),
        user_id: Set(user.user_id),
        total_amount: Set(total_amount),
        total_savings: Set(total_savings),
        status: Set("pending".into()),
        payment_status: Set("unpaid".into()),
        invoice_number: Set(build_invoice_number(order_id)),
        shipping_address: Set(address),
        payment_method: Set(payment_method),
        paid_at: Set(None),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&txn)
    .await?;

    let mut order_items: Vec<OrderItem> = Vec::with_capacity(priced.len());
    for line in priced {
        let item = OrderItemActive {
            id: Set(Uuid::new_v4()),
            order_id: Set(order.id),
            product_id: Set(line.product_id),
            product_name: Set(line.name),
            quantity: Set(line.quantity),
            price: Set(line.price),
            created_at: NotSet,
        }
        .insert(&txn)
        .await?;

        order_items.push(OrderItem::from(item));

        Products::update_many()
            .col_expr(ProdCol::Stock, Expr::col(ProdCol::Stock).sub(line.quantity))
            .col_expr(ProdCol::UpdatedAt, Expr::value(Utc::now()))
            .filter(ProdCol::Id.eq(line.product_id))
            .exec(&txn)
            .await?;
    }

    txn.commit().await?;

    let ordered: Vec<Uuid> = lines.iter().map(|line| line.id).collect();
    let cleared = store
        .update(|cart| {
            for id in &ordered {
                // The line may have been removed meanwhile.
                let _ = cart.remove(*id);
            }
            Ok(((), "Order placed".to_string()))
        })
        .await;
    if let Err(err) = cleared {
        tracing::warn!(error = %err, "failed to clear cart after checkout");
    }
    drop(store);
    state.carts.release(user.user_id, Cart::is_empty).await;

    audit::record(
        state,
        user.user_id,
        "checkout",
        "orders",
        serde_json::json!({ "order_id": order.id, "total_amount": total_amount }),
    )
    .await;

    tracing::info!(order_id = %order.id, user_id = %user.user_id, total_amount, "order placed");

    Ok(ApiResponse::success(
        "Checkout success",
        OrderWithItems::new(Order::from(order), order_items),
        Some(Meta::empty()),
    ))
}

pub async fn pay_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: PayOrderRequest,
) -> AppResult<ApiResponse<OrderWithItems>> {
    let txn = state.orm.begin().await?;

    let order = Orders::find()
        .filter(
            Condition::all()
                .add(OrderCol::UserId.eq(user.user_id))
                .add(OrderCol::Id.eq(id)),
        )
        .lock(LockType::Update)
        .one(&txn)
        .await?;
    let order = match order {
        Some(o) => o,
        None => return Err(AppError::NotFound),
    };

    if order.invoice_number != payload.invoice_number {
        return Err(AppError::BadRequest("Invoice number does not match".into()));
    }
    if order.payment_status == "paid" {
        return Err(AppError::BadRequest("Order already paid".into()));
    }
    if order.status == "cancelled" {
        return Err(AppError::BadRequest("Order is cancelled".into()));
    }

    let mut active: OrderActive = order.into();
    active.payment_status = Set("paid".into());
    active.status = Set("paid".into());
    active.paid_at = Set(Some(Utc::now().into()));
    active.updated_at = Set(Utc::now().into());
    let order = active.update(&txn).await?;

    let items = OrderItems::find()
        .filter(OrderItemCol::OrderId.eq(order.id))
        .all(&txn)
        .await?
        .into_iter()
        .map(OrderItem::from)
        .collect();

    txn.commit().await?;

    audit::record(
        state,
        user.user_id,
        "order_paid",
        "orders",
        serde_json::json!({ "order_id": order.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Payment recorded",
        OrderWithItems::new(Order::from(order), items),
        Some(Meta::empty()),
    ))
}

pub async fn get_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<OrderWithItems>> {
    let order = Orders::find()
        .filter(
            Condition::all()
                .add(OrderCol::UserId.eq(user.user_id))
                .add(OrderCol::Id.eq(id)),
        )
        .one(&state.orm)
        .await?;
    let order = match order {
        Some(o) => o,
        None => return Err(AppError::NotFound),
    };

    let items = order_items_of(state, order.id).await?;

    Ok(ApiResponse::success(
        "OK",
        OrderWithItems::new(Order::from(order), items),
        Some(Meta::empty()),
    ))
}

pub async fn order_items_of(state: &AppState, order_id: Uuid) -> AppResult<Vec<OrderItem>> {
    let items = OrderItems::find()
        .filter(OrderItemCol::OrderId.eq(order_id))
        .order_by_asc(OrderItemCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(OrderItem::from)
        .collect();
    Ok(items)
}

fn build_invoice_number(order_id: Uuid) -> String {
    let date = Utc::now().format("%Y%m%d");
    let simple = order_id.simple().to_string();
    let short = simple.get(..8).unwrap_or(&simple);
    format!("INV-{}-{}", date, short.to_uppercase())
}
