//! Storage for orders and reference data.
//!
//! The active order set always lives in memory inside [`OrderStore`]; the
//! [`Backend`] decides where everything is persisted: process memory, or a
//! SQLite database through SeaORM.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::{
    config::StorageMode,
    db::{create_orm_conn, run_migrations},
    error::AppResult,
    models::{Order, OrderStatus},
};

pub mod catalog;
pub mod memory;
pub mod orders;
pub mod seed;
pub mod sql;

pub use catalog::Catalog;
pub use memory::MemoryBackend;
pub use orders::{OrderFilter, OrderStore, StatusChange};

#[derive(Clone)]
pub enum Backend {
    Memory(Arc<MemoryBackend>),
    Sql(DatabaseConnection),
}

impl Backend {
    pub fn memory() -> Self {
        Backend::Memory(Arc::new(MemoryBackend::seeded()))
    }

    pub async fn connect(mode: &StorageMode) -> anyhow::Result<Self> {
        match mode {
            StorageMode::Memory => Ok(Self::memory()),
            StorageMode::Sqlite(url) => {
                let conn = create_orm_conn(url).await?;
                run_migrations(&conn).await?;
                Ok(Backend::Sql(conn))
            }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Backend::Memory(_) => "memory",
            Backend::Sql(_) => "sqlite",
        }
    }

    pub async fn insert_order(&self, order: &Order) -> AppResult<()> {
        match self {
            Backend::Memory(mem) => {
                mem.insert_order(order).await;
                Ok(())
            }
            Backend::Sql(db) => sql::insert_order(db, order).await,
        }
    }

    /// Returns `false` when no stored order has this id.
    pub async fn update_order_status(
        &self,
        id: &str,
        status: OrderStatus,
        updated_at: DateTime<Utc>,
    ) -> AppResult<bool> {
        match self {
            Backend::Memory(mem) => Ok(mem.update_order_status(id, status, updated_at).await),
            Backend::Sql(db) => sql::update_order_status(db, id, status, updated_at).await,
        }
    }

    pub async fn active_orders(&self) -> AppResult<Vec<Order>> {
        match self {
            Backend::Memory(mem) => Ok(mem.active_orders().await),
            Backend::Sql(db) => sql::active_orders(db).await,
        }
    }

    pub async fn delivered_orders_since(&self, cutoff: DateTime<Utc>) -> AppResult<Vec<Order>> {
        match self {
            Backend::Memory(mem) => Ok(mem.delivered_orders_since(cutoff).await),
            Backend::Sql(db) => sql::delivered_orders_since(db, cutoff).await,
        }
    }

    pub async fn close(&self) {
        if let Backend::Sql(db) = self {
            db.get_sqlite_connection_pool().close().await;
        }
    }
}
