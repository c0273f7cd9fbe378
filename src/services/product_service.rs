use std::collections::HashMap;

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, Condition, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    audit,
    catalog::ProductCard,
    dto::products::{CreateProductRequest, ProductList, UpdateProductRequest},
    entity::{
        categories::{Column as CategoryCol, Entity as Categories},
        products::{ActiveModel, Column, Entity as Products, Model as ProductModel},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::Product,
    response::{ApiResponse, Meta},
    routes::params::{ProductQuery, ProductSortBy, SortOrder},
    services::category_service,
    slug::resolve_slug,
    state::AppState,
};

pub async fn list_products(
    state: &AppState,
    user: Option<&AuthUser>,
    query: ProductQuery,
) -> AppResult<ApiResponse<ProductList>> {
    let (page, limit, offset) = query.pagination().normalize();
    let mut condition = Condition::all();

    if query.include_inactive.unwrap_or(false) {
        match user {
            Some(user) => ensure_admin(user)?,
            None => return Err(AppError::Unauthorized("Missing Authorization header".into())),
        }
    } else {
        condition = condition.add(Column::IsActive.eq(true));
    }

    if let Some(search) = query.q.as_ref().filter(|s| !s.trim().is_empty()) {
        let pattern = format!("%{}%", search.trim());
        condition = condition.add(
            Condition::any()
                .add(Expr::col(Column::Name).ilike(pattern.clone()))
                .add(Expr::col(Column::Description).ilike(pattern)),
        );
    }

    if let Some(slug) = query.category.as_ref().filter(|s| !s.is_empty()) {
        match category_service::find_by_slug(state, slug).await? {
            Some(category) => condition = condition.add(Column::CategoryId.eq(category.id)),
            None => {
                let meta = Meta::new(page, limit, 0);
                return Ok(ApiResponse::success(
                    "Products",
                    ProductList { items: Vec::new() },
                    Some(meta),
                ));
            }
        }
    }

    if let Some(tag) = query.tag.as_ref().filter(|s| !s.is_empty()) {
        condition = condition.add(Column::Tag.eq(tag.to_lowercase()));
    }

    if let Some(size) = query.size.as_ref().filter(|s| !s.is_empty()) {
        condition = condition.add(Expr::col(Column::Size).ilike(size.clone()));
    }

    if let Some(min_price) = query.min_price {
        condition = condition.add(Column::Price.gte(min_price));
    }

    if let Some(max_price) = query.max_price {
        condition = condition.add(Column::Price.lte(max_price));
    }

    let sort_by = query.sort_by.unwrap_or(ProductSortBy::CreatedAt);
    let sort_order = query.sort_order.unwrap_or(SortOrder::Desc);
    let sort_col = match sort_by {
        ProductSortBy::CreatedAt => Column::CreatedAt,
        ProductSortBy::Price => Column::Price,
        ProductSortBy::Name => Column::Name,
        ProductSortBy::Stock => Column::Stock,
    };

    let mut finder = Products::find().filter(condition);
    finder = match sort_order {
        SortOrder::Asc => finder.order_by_asc(sort_col),
        SortOrder::Desc => finder.order_by_desc(sort_col),
    };

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
    Ok(ApiResponse::success("Products", ProductList { items }, Some(meta)))
}

pub async fn get_product(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Product>> {
    let result = Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(Product::from);
    let result = match result {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success("Product", result, None))
}

pub async fn get_product_card_by_slug(
    state: &AppState,
    slug: &str,
) -> AppResult<ApiResponse<ProductCard>> {
    let product = Products::find()
        .filter(Column::Slug.eq(slug))
        .filter(Column::IsActive.eq(true))
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    let card = to_cards(state, vec![product])
        .await?
        .pop()
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Product", card, None))
}

pub async fn create_product(
    state: &AppState,
    user: &AuthUser,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    ensure_admin(user)?;
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::BadRequest("name must not be empty".into()));
    }
    validate_pricing(payload.price, payload.original_price)?;
    if payload.stock < 0 {
        return Err(AppError::BadRequest("stock must not be negative".into()));
    }
    let slug = resolve_slug(payload.slug.as_deref(), &name)
        .ok_or_else(|| AppError::BadRequest("Invalid slug".into()))?;
    ensure_slug_free(state, &slug, None).await?;
    if let Some(category_id) = payload.category_id {
        ensure_category_exists(state, category_id).await?;
    }

    let product = ActiveModel {
        id: Set(Uuid::new_v4()),
        category_id: Set(payload.category_id),
        name: Set(name),
        slug: Set(slug),
        description: Set(payload.description),
        price: Set(payload.price),
        original_price: Set(payload.original_price),
        image: Set(payload.image),
        size: Set(payload.size.map(|s| s.trim().to_lowercase())),
        tag: Set(payload.tag.map(|t| t.trim().to_lowercase())),
        stock: Set(payload.stock),
        is_active: Set(payload.is_active.unwrap_or(true)),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        state,
        user.user_id,
        "product_create",
        "products",
        serde_json::json!({ "product_id": product.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Product created",
        Product::from(product),
        Some(Meta::empty()),
    ))
}

pub async fn update_product(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    ensure_admin(user)?;
    let existing = Products::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };

    let price = payload.price.unwrap_or(existing.price);
    let original_price = payload.original_price.unwrap_or(existing.original_price);
    validate_pricing(price, original_price)?;

    let mut active: ActiveModel = existing.into();
    if let Some(name) = payload.name {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::BadRequest("name must not be empty".into()));
        }
        active.name = Set(name);
    }
    if let Some(slug) = payload.slug {
        let slug = resolve_slug(Some(slug.as_str()), "")
            .ok_or_else(|| AppError::BadRequest("Invalid slug".into()))?;
        ensure_slug_free(state, &slug, Some(id)).await?;
        active.slug = Set(slug);
    }
    if let Some(description) = payload.description {
        active.description = Set(Some(description));
    }
    if let Some(category_id) = payload.category_id {
        ensure_category_exists(state, category_id).await?;
        active.category_id = Set(Some(category_id));
    }
    if let Some(image) = payload.image {
        active.image = Set(Some(image));
    }
    if let Some(size) = payload.size {
        active.size = Set(Some(size.trim().to_lowercase()));
    }
    if let Some(tag) = payload.tag {
        active.tag = Set(Some(tag.trim().to_lowercase()));
    }
    if let Some(stock) = payload.stock {
        if stock < 0 {
            return Err(AppError::BadRequest("stock must not be negative".into()));
        }
        active.stock = Set(stock);
    }
    if let Some(is_active) = payload.is_active {
        active.is_active = Set(is_active);
    }
    active.price = Set(price);
    active.original_price = Set(original_price);
    active.updated_at = Set(Utc::now().into());

    let product = active.update(&state.orm).await?;

    audit::record(
        state,
        user.user_id,
        "product_update",
        "products",
        serde_json::json!({ "product_id": product.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Updated",
        Product::from(product),
        Some(Meta::empty()),
    ))
}

pub async fn delete_product(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    let result = Products::delete_by_id(id).exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        state,
        user.user_id,
        "product_delete",
        "products",
        serde_json::json!({ "product_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

/// Card for an active product; used when a customer picks a product for
/// their cart or wishlist.
pub async fn load_card(state: &AppState, id: Uuid) -> AppResult<ProductCard> {
    let product = Products::find_by_id(id)
        .filter(Column::IsActive.eq(true))
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::BadRequest("Product not found".into()))?;
    to_cards(state, vec![product])
        .await?
        .pop()
        .ok_or_else(|| AppError::BadRequest("Product not found".into()))
}

/// Maps product rows to cards, resolving each category id to its slug.
pub async fn to_cards(state: &AppState, products: Vec<ProductModel>) -> AppResult<Vec<ProductCard>> {
    let mut category_ids: Vec<Uuid> = products.iter().filter_map(|p| p.category_id).collect();
    category_ids.sort();
    category_ids.dedup();

    let slugs: HashMap<Uuid, String> = if category_ids.is_empty() {
        HashMap::new()
    } else {
        Categories::find()
            .filter(CategoryCol::Id.is_in(category_ids))
            .all(&state.orm)
            .await?
            .into_iter()
            .map(|c| (c.id, c.slug))
            .collect()
    };

    let max_per_line = state.config.cart_max_per_line;
    Ok(products
        .into_iter()
        .map(|product| {
            let category = product.category_id.and_then(|id| slugs.get(&id).cloned());
            ProductCard::from_product(Product::from(product), category, max_per_line)
        })
        .collect())
}

pub fn validate_pricing(price: i64, original_price: Option<i64>) -> AppResult<()> {
    if price < 0 {
        return Err(AppError::BadRequest("price must not be negative".into()));
    }
    if original_price.is_some_and(|original| original < price) {
        return Err(AppError::BadRequest(
            "original_price must not be below price".into(),
        ));
    }
    Ok(())
}

pub async fn ensure_category_exists(state: &AppState, id: Uuid) -> AppResult<()> {
    let exists = Categories::find_by_id(id).one(&state.orm).await?;
    if exists.is_none() {
        return Err(AppError::BadRequest("Category not found".into()));
    }
    Ok(())
}

async fn ensure_slug_free(state: &AppState, slug: &str, except: Option<Uuid>) -> AppResult<()> {
    let existing = Products::find()
        .filter(Column::Slug.eq(slug))
        .one(&state.orm)
        .await?;
    match existing {
        Some(p) if Some(p.id) != except => Err(AppError::BadRequest(format!(
            "slug '{slug}' is already in use"
        ))),
        _ => Ok(()),
    }
}
