//! Per-user cart and wishlist state.
//!
//! Each user owns one [`Store`] per collection kind. A store serializes
//! mutations behind an async lock and publishes a [`Toast`] for every
//! outcome on a broadcast channel shared by the whole [`StoreRegistry`].

use std::{collections::HashMap, sync::Arc};

use serde::Serialize;
use thiserror::Error;
use tokio::sync::{RwLock, broadcast};
use utoipa::ToSchema;
use uuid::Uuid;

pub mod cart;
pub mod wishlist;

pub use cart::{Cart, CartItem};
pub use wishlist::{Wishlist, WishlistItem};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("item {0} is not in the collection")]
    NotFound(Uuid),

    #[error("quantity must be at least 1")]
    QuantityBelowMinimum,

    #[error("quantity {requested} exceeds the maximum of {max}")]
    QuantityAboveMaximum { requested: i32, max: i32 },

    #[error("{0} is out of stock")]
    OutOfStock(String),
}

#[derive(Debug, Clone, Copy, Serialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ToastLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StoreEvent {
    pub owner: Uuid,
    pub toast: Toast,
}

pub struct Store<S> {
    owner: Uuid,
    state: RwLock<S>,
    events: broadcast::Sender<StoreEvent>,
}

impl<S: Clone> Store<S> {
    fn new(owner: Uuid, state: S, events: broadcast::Sender<StoreEvent>) -> Self {
        Self {
            owner,
            state: RwLock::new(state),
            events,
        }
    }

    pub fn owner(&self) -> Uuid {
        self.owner
    }

    pub async fn snapshot(&self) -> S {
        self.state.read().await.clone()
    }

    pub async fn read<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        let state = self.state.read().await;
        f(&*state)
    }

    /// Applies `f` under the write lock. `f` returns the value to hand back
    /// and the message of the success toast. Mutations must validate before
    /// touching the state so a rejected call leaves it unchanged.
    pub async fn update<R>(
        &self,
        f: impl FnOnce(&mut S) -> Result<(R, String), StoreError>,
    ) -> Result<(R, Toast), StoreError> {
        let outcome = {
            let mut state = self.state.write().await;
            f(&mut *state)
        };
        match outcome {
            Ok((value, message)) => {
                let toast = Toast::success(message);
                self.publish(toast.clone());
                Ok((value, toast))
            }
            Err(err) => {
                self.publish(Toast::error(err.to_string()));
                Err(err)
            }
        }
    }

    fn publish(&self, toast: Toast) {
        // No subscribers is fine.
        let _ = self.events.send(StoreEvent {
            owner: self.owner,
            toast,
        });
    }
}

pub struct StoreRegistry<S> {
    stores: RwLock<HashMap<Uuid, Arc<Store<S>>>>,
    events: broadcast::Sender<StoreEvent>,
}

impl<S: Clone + Default> StoreRegistry<S> {
    pub fn new(capacity: usize) -> Self {
        let (events, _) = broadcast::channel(capacity.max(1));
        Self {
            stores: RwLock::new(HashMap::new()),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    /// Returns the store of `owner`, creating an empty one on first access.
    /// Empty stores are dropped again through [`StoreRegistry::release`], so
    /// the map holds only users with items.
    pub async fn get(&self, owner: Uuid) -> Arc<Store<S>> {
        if let Some(store) = self.stores.read().await.get(&owner) {
            return store.clone();
        }
        let mut stores = self.stores.write().await;
        stores
            .entry(owner)
            .or_insert_with(|| Arc::new(Store::new(owner, S::default(), self.events.clone())))
            .clone()
    }

    /// Returns the store of `owner` without creating one.
    pub async fn find(&self, owner: Uuid) -> Option<Arc<Store<S>>> {
        self.stores.read().await.get(&owner).cloned()
    }

    /// Drops the store of `owner` when `is_idle` holds for its state and no
    /// handle to it is held outside the registry. Returns whether it was
    /// dropped. Callers release their own handle first.
    pub async fn release(&self, owner: Uuid, is_idle: impl FnOnce(&S) -> bool) -> bool {
        let mut stores = self.stores.write().await;
        let Some(store) = stores.get(&owner) else {
            return false;
        };
        if Arc::strong_count(store) > 1 {
            return false;
        }
        let idle = match store.state.try_read() {
            Ok(state) => is_idle(&*state),
            Err(_) => false,
        };
        if idle {
            stores.remove(&owner);
        }
        idle
    }

    pub async fn len(&self) -> usize {
        self.stores.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.stores.read().await.is_empty()
    }
}

pub type CartRegistry = StoreRegistry<Cart>;
pub type WishlistRegistry = StoreRegistry<Wishlist>;

/// Logs every store notice until the channel closes.
pub async fn log_events(mut rx: broadcast::Receiver<StoreEvent>, kind: &'static str) {
    loop {
        match rx.recv().await {
            Ok(event) => match event.toast.level {
                ToastLevel::Success => tracing::debug!(
                    store = kind,
                    owner = %event.owner,
                    message = %event.toast.message,
                    "store updated"
                ),
                ToastLevel::Error => tracing::warn!(
                    store = kind,
                    owner = %event.owner,
                    message = %event.toast.message,
                    "store update rejected"
                ),
            },
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(store = kind, skipped, "store event subscriber lagged");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}
