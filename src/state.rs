use std::sync::Arc;

use crate::{
    config::AppConfig,
    db::{DbPool, OrmConn, orm_from_pool},
    store::{CartRegistry, WishlistRegistry},
};

const STORE_EVENT_CAPACITY: usize = 256;

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub config: Arc<AppConfig>,
    pub carts: Arc<CartRegistry>,
    pub wishlists: Arc<WishlistRegistry>,
}

impl AppState {
    pub fn new(pool: DbPool, config: AppConfig) -> Self {
        let orm = orm_from_pool(&pool);
        Self {
            pool,
            orm,
            config: Arc::new(config),
            carts: Arc::new(CartRegistry::new(STORE_EVENT_CAPACITY)),
            wishlists: Arc::new(WishlistRegistry::new(STORE_EVENT_CAPACITY)),
        }
    }
}
