use serde::Serialize;
use utoipa::ToSchema;

use crate::catalog::{CategoryPage, PageSelector, ProductCard};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CollectionInfo {
    pub slug: String,
    pub title: String,
    pub subtitle: String,
    /// `category` or `tag`.
    pub kind: String,
    pub value: String,
}

impl From<&CategoryPage> for CollectionInfo {
    fn from(page: &CategoryPage) -> Self {
        let (kind, value) = match page.selector {
            PageSelector::Category(slug) => ("category", slug),
            PageSelector::Tag(tag) => ("tag", tag),
        };
        Self {
            slug: page.slug.to_string(),
            title: page.title.to_string(),
            subtitle: page.subtitle.to_string(),
            kind: kind.to_string(),
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct CollectionList {
    #[schema(value_type = Vec<CollectionInfo>)]
    pub items: Vec<CollectionInfo>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CollectionPage {
    pub collection: CollectionInfo,
    pub items: Vec<ProductCard>,
    /// Cards fetched before the price/size filter ran.
    pub fetched: usize,
}
