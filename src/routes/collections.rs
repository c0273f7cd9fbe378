use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};

use crate::{
    dto::catalog::{CollectionList, CollectionPage},
    error::AppResult,
    response::ApiResponse,
    routes::params::CollectionQuery,
    services::catalog_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_collections))
        .route("/{slug}", get(collection_page))
}

#[utoipa::path(
    get,
    path = "/api/collections",
    responses(
        (status = 200, description = "Category pages", body = ApiResponse<CollectionList>)
    ),
    tag = "Collections"
)]
pub async fn list_collections() -> Json<ApiResponse<CollectionList>> {
    Json(catalog_service::list_collections())
}

#[utoipa::path(
    get,
    path = "/api/collections/{slug}",
    params(
        ("slug" = String, Path, description = "Page slug, e.g. garden-planters"),
        ("min_price" = Option<i64>, Query, description = "Minimum price"),
        ("max_price" = Option<i64>, Query, description = "Maximum price"),
        ("size" = Option<String>, Query, description = "Comma separated sizes"),
        ("in_stock" = Option<bool>, Query, description = "Only products in stock"),
        ("sort" = Option<String>, Query, description = "featured, price_asc, price_desc, name, newest")
    ),
    responses(
        (status = 200, description = "Product cards of the page", body = ApiResponse<CollectionPage>),
        (status = 404, description = "Unknown page")
    ),
    tag = "Collections"
)]
pub async fn collection_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<CollectionQuery>,
) -> AppResult<Json<ApiResponse<CollectionPage>>> {
    let resp = catalog_service::collection_page(&state, &slug, query).await?;
    Ok(Json(resp))
}
