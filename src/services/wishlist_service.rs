use uuid::Uuid;

use crate::{
    audit,
    dto::{
        cart::CartView,
        wishlist::{AddToWishlistRequest, MoveToCartResponse, WishlistMutation, WishlistView},
    },
    error::AppResult,
    middleware::auth::AuthUser,
    response::{ApiResponse, Meta},
    services::product_service,
    state::AppState,
    store::{StoreError, Wishlist},
};

pub async fn view_wishlist(state: &AppState, user: &AuthUser) -> ApiResponse<WishlistView> {
    let view = match state.wishlists.find(user.user_id).await {
        Some(store) => store.read(|wishlist| WishlistView::from(wishlist)).await,
        None => WishlistView::from(&Wishlist::new()),
    };
    ApiResponse::success("OK", view, Some(Meta::empty()))
}

pub async fn add_to_wishlist(
    state: &AppState,
    user: &AuthUser,
    payload: AddToWishlistRequest,
) -> AppResult<ApiResponse<WishlistMutation>> {
    let card = product_service::load_card(state, payload.product_id).await?;
    let item = card.to_wishlist_item();

    let store = state.wishlists.get(user.user_id).await;
    let (wishlist, toast) = store
        .update(|wishlist| {
            let name = item.name.clone();
            let message = if wishlist.add(item) {
                format!("{name} added to wishlist")
            } else {
                format!("{name} is already in your wishlist")
            };
            Ok((WishlistView::from(&*wishlist), message))
        })
        .await?;

    audit::record(
        state,
        user.user_id,
        "wishlist_add",
        "wishlist",
        serde_json::json!({ "product_id": payload.product_id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Added to wishlist",
        WishlistMutation { wishlist, toast },
        Some(Meta::empty()),
    ))
}

pub async fn remove_from_wishlist(
    state: &AppState,
    user: &AuthUser,
    product_id: Uuid,
) -> AppResult<ApiResponse<WishlistMutation>> {
    let store = state.wishlists.get(user.user_id).await;
    let (wishlist, toast) = store
        .update(|wishlist| {
            let removed = wishlist.remove(product_id)?;
            let message = format!("{} removed from wishlist", removed.name);
            Ok((WishlistView::from(&*wishlist), message))
        })
        .await?;
    drop(store);
    state.wishlists.release(user.user_id, Wishlist::is_empty).await;

    audit::record(
        state,
        user.user_id,
        "wishlist_remove",
        "wishlist",
        serde_json::json!({ "product_id": product_id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Removed from wishlist",
        WishlistMutation { wishlist, toast },
        Some(Meta::empty()),
    ))
}

/// Adds one unit of a wishlisted product to the cart and drops it from the
/// wishlist. The wishlist is left untouched when the cart rejects the item.
pub async fn move_to_cart(
    state: &AppState,
    user: &AuthUser,
    product_id: Uuid,
) -> AppResult<ApiResponse<MoveToCartResponse>> {
    let wishlists = match state.wishlists.find(user.user_id).await {
        Some(store) if store.read(|w| w.contains(product_id)).await => store,
        _ => return Err(StoreError::NotFound(product_id).into()),
    };

    let card = product_service::load_card(state, product_id).await?;
    let carts = state.carts.get(user.user_id).await;
    let (cart, _) = carts
        .update(|cart| {
            let line = cart.add(card.to_cart_item(1))?;
            let message = format!("{} added to cart", line.name);
            Ok((CartView::from(&*cart), message))
        })
        .await?;

    let (wishlist, toast) = wishlists
        .update(|wishlist| {
            let removed = wishlist.remove(product_id)?;
            let message = format!("{} moved to cart", removed.name);
            Ok((WishlistView::from(&*wishlist), message))
        })
        .await?;
    drop(wishlists);
    state.wishlists.release(user.user_id, Wishlist::is_empty).await;

    audit::record(
        state,
        user.user_id,
        "wishlist_move_to_cart",
        "wishlist",
        serde_json::json!({ "product_id": product_id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Moved to cart",
        MoveToCartResponse {
            wishlist,
            cart,
            toast,
        },
        Some(Meta::empty()),
    ))
}
