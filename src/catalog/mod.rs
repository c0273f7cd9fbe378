//! Storefront listings: the category page table, the product card view
//! model and the in-memory filter applied to fetched cards.

pub mod filter;
pub mod pages;
pub mod view;

pub use filter::{CardSort, ProductFilter};
pub use pages::{CATEGORY_PAGES, CategoryPage, PageSelector, find_page};
pub use view::ProductCard;
