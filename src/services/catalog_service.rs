use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

use crate::{
    catalog::{CATEGORY_PAGES, PageSelector, find_page},
    dto::catalog::{CollectionInfo, CollectionList, CollectionPage},
    entity::products::{Column, Entity as Products},
    error::{AppError, AppResult},
    response::{ApiResponse, Meta},
    routes::params::CollectionQuery,
    services::{category_service, product_service},
    state::AppState,
};

pub fn list_collections() -> ApiResponse<CollectionList> {
    let items: Vec<CollectionInfo> = CATEGORY_PAGES.iter().map(CollectionInfo::from).collect();
    let total = items.len() as i64;
    ApiResponse::success(
        "Collections",
        CollectionList { items },
        Some(Meta::new(1, total, total)),
    )
}

/// Fetches every active product of the page, then narrows the fetched
/// cards with the price/size/stock filter and sorts them.
pub async fn collection_page(
    state: &AppState,
    slug: &str,
    query: CollectionQuery,
) -> AppResult<ApiResponse<CollectionPage>> {
    let page = find_page(slug).ok_or(AppError::NotFound)?;

    let finder = Products::find()
        .filter(Column::IsActive.eq(true))
        .order_by_desc(Column::CreatedAt);

    let rows = match page.selector {
        PageSelector::Category(category_slug) => {
            match category_service::find_by_slug(state, category_slug).await? {
                Some(category) => {
                    finder
                        .filter(Column::CategoryId.eq(category.id))
                        .all(&state.orm)
                        .await?
                }
                None => {
                    tracing::warn!(
                        page = page.slug,
                        category = category_slug,
                        "category page has no backing category"
                    );
                    Vec::new()
                }
            }
        }
        PageSelector::Tag(tag) => finder.filter(Column::Tag.eq(tag)).all(&state.orm).await?,
    };

    let cards = product_service::to_cards(state, rows).await?;
    let fetched = cards.len();
    let mut items = query.filter().apply(cards);
    query.sort().apply(&mut items);

    let total = items.len() as i64;
    let data = CollectionPage {
        collection: CollectionInfo::from(page),
        items,
        fetched,
    };
    Ok(ApiResponse::success(page.title, data, Some(Meta::new(1, total, total))))
}
