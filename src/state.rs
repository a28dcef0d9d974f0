use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::{
    config::Environment,
    error::AppResult,
    notify::{LogNotifier, Notifier},
    realtime::hub::OrderHub,
    store::{Backend, Catalog, OrderStore},
};

#[derive(Clone)]
pub struct AppState {
    pub orders: Arc<OrderStore>,
    pub catalog: Catalog,
    pub hub: OrderHub,
    pub notifier: Arc<dyn Notifier>,
    pub environment: Environment,
    /// Cancelled when the process starts shutting down; realtime sessions close on it.
    pub shutdown: CancellationToken,
}

impl AppState {
    pub async fn new(backend: Backend, environment: Environment) -> AppResult<Self> {
        let hub = OrderHub::new();
        let orders = OrderStore::open(backend.clone(), hub.clone()).await?;
        Ok(Self {
            orders: Arc::new(orders),
            catalog: Catalog::new(backend),
            hub,
            notifier: Arc::new(LogNotifier),
            environment,
            shutdown: CancellationToken::new(),
        })
    }

    /// Seeded in-memory state, as used by tests and local demos.
    pub async fn in_memory() -> AppResult<Self> {
        Self::new(Backend::memory(), Environment::Development).await
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }
}
