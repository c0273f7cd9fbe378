pub mod analytics;
pub mod auth;
pub mod bulk;
pub mod cart;
pub mod catalog;
pub mod categories;
pub mod orders;
pub mod products;
pub mod wishlist;
