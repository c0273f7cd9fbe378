use axum::{
    Json, Router,
    http::{StatusCode, Uri},
    routing::get,
};
use tower::limit::ConcurrencyLimitLayer;
use tower_http::limit::RequestBodyLimitLayer;

use crate::{response::ApiResponse, state::AppState};

pub mod admin;
pub mod auth;
pub mod cart;
pub mod categories;
pub mod collections;
pub mod doc;
pub mod health;
pub mod orders;
pub mod params;
pub mod products;
pub mod wishlist;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/categories", categories::router())
        .nest("/products", products::router())
        .nest("/collections", collections::router())
        .nest("/cart", cart::router())
        .nest("/wishlist", wishlist::router())
        .nest("/orders", orders::router())
        .nest("/admin", admin::router())
}

/// Full application router: health, API, docs and the JSON 404 fallback,
/// with the body size and concurrency limits from the configuration.
pub fn create_app(state: AppState) -> Router {
    let body_limit = state.config.body_limit_bytes;
    let concurrency_limit = state.config.concurrency_limit;

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", create_api_router())
        .merge(doc::scalar_docs())
        .fallback(not_found)
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(ConcurrencyLimitLayer::new(concurrency_limit))
        .with_state(state)
}

async fn not_found(uri: Uri) -> (StatusCode, Json<ApiResponse<()>>) {
    let body = ApiResponse::failure("Not Found", format!("no route for {}", uri.path()));
    (StatusCode::NOT_FOUND, Json(body))
}
