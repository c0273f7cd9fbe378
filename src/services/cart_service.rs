use uuid::Uuid;

use crate::{
    audit,
    dto::cart::{AddToCartRequest, CartMutation, CartView, UpdateCartItemRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    response::{ApiResponse, Meta},
    services::product_service,
    state::AppState,
    store::Cart,
};

pub async fn view_cart(state: &AppState, user: &AuthUser) -> ApiResponse<CartView> {
    let view = match state.carts.find(user.user_id).await {
        Some(store) => store.read(|cart| CartView::from(cart)).await,
        None => CartView::from(&Cart::new()),
    };
    ApiResponse::success("OK", view, Some(Meta::empty()))
}

/// Adds the product at its current price. Adding a product that is already
/// in the cart raises the quantity of the existing line.
pub async fn add_to_cart(
    state: &AppState,
    user: &AuthUser,
    payload: AddToCartRequest,
) -> AppResult<ApiResponse<CartMutation>> {
    let quantity = payload.quantity.unwrap_or(1);
    let card = product_service::load_card(state, payload.product_id).await?;
    let item = card.to_cart_item(quantity);

    let store = state.carts.get(user.user_id).await;
    let ((line, cart), toast) = store
        .update(|cart| {
            let line = cart.add(item)?;
            let message = format!("{} added to cart", line.name);
            Ok(((line, CartView::from(&*cart)), message))
        })
        .await?;

    audit::record(
        state,
        user.user_id,
        "cart_add",
        "cart",
        serde_json::json!({ "product_id": line.id, "quantity": line.quantity }),
    )
    .await;

    Ok(ApiResponse::success(
        "OK",
        CartMutation { cart, toast },
        Some(Meta::empty()),
    ))
}

pub async fn update_quantity(
    state: &AppState,
    user: &AuthUser,
    product_id: Uuid,
    payload: UpdateCartItemRequest,
) -> AppResult<ApiResponse<CartMutation>> {
    let store = state.carts.get(user.user_id).await;
    let (cart, toast) = store
        .update(|cart| {
            let line = cart.update_quantity(product_id, payload.quantity)?;
            let message = format!("{} quantity set to {}", line.name, line.quantity);
            Ok((CartView::from(&*cart), message))
        })
        .await?;

    audit::record(
        state,
        user.user_id,
        "cart_update_quantity",
        "cart",
        serde_json::json!({ "product_id": product_id, "quantity": payload.quantity }),
    )
    .await;

    Ok(ApiResponse::success(
        "OK",
        CartMutation { cart, toast },
        Some(Meta::empty()),
    ))
}

pub async fn remove_from_cart(
    state: &AppState,
    user: &AuthUser,
    product_id: Uuid,
) -> AppResult<ApiResponse<CartMutation>> {
    let store = state.carts.get(user.user_id).await;
    let (cart, toast) = store
        .update(|cart| {
            let removed = cart.remove(product_id)?;
            let message = format!("{} removed from cart", removed.name);
            Ok((CartView::from(&*cart), message))
        })
        .await?;
    drop(store);
    state.carts.release(user.user_id, Cart::is_empty).await;

    audit::record(
        state,
        user.user_id,
        "cart_remove",
        "cart",
        serde_json::json!({ "product_id": product_id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Removed from cart",
        CartMutation { cart, toast },
        Some(Meta::empty()),
    ))
}

pub async fn clear_cart(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<CartMutation>> {
    let store = state.carts.get(user.user_id).await;
    let ((cart, removed), toast) = store
        .update(|cart| {
            let removed = cart.clear().len();
            let message = format!("Removed {removed} item(s) from cart");
            Ok(((CartView::from(&*cart), removed), message))
        })
        .await?;
    drop(store);
    state.carts.release(user.user_id, Cart::is_empty).await;

    audit::record(
        state,
        user.user_id,
        "cart_clear",
        "cart",
        serde_json::json!({ "removed_lines": removed }),
    )
    .await;

    Ok(ApiResponse::success(
        "Cart cleared",
        CartMutation { cart, toast },
        Some(Meta::empty()),
    ))
}
