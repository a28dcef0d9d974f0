use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use crate::{
    error::AppResult,
    models::{MenuItem, RestaurantConfig, Table},
    store::{Backend, sql},
};

/// Menu items, tables and the restaurant configuration.
#[derive(Clone)]
pub struct Catalog {
    backend: Backend,
    table_writes: Arc<Mutex<()>>,
}

impl Catalog {
    pub fn new(backend: Backend) -> Self {
        Self {
            backend,
            table_writes: Arc::new(Mutex::new(())),
        }
    }

    /// Serializes table writes so a number check and the write that follows
    /// it cannot interleave with another writer.
    pub async fn lock_tables(&self) -> MutexGuard<'_, ()> {
        self.table_writes.lock().await
    }

    pub async fn list_menu(&self, include_unavailable: bool) -> AppResult<Vec<MenuItem>> {
        match &self.backend {
            Backend::Memory(mem) => Ok(mem.list_menu(include_unavailable).await),
            Backend::Sql(db) => sql::list_menu(db, include_unavailable).await,
        }
    }

    pub async fn get_menu_item(&self, id: &str) -> AppResult<Option<MenuItem>> {
        match &self.backend {
            Backend::Memory(mem) => Ok(mem.get_menu_item(id).await),
            Backend::Sql(db) => sql::get_menu_item(db, id).await,
        }
    }

    pub async fn insert_menu_item(&self, item: &MenuItem) -> AppResult<()> {
        match &self.backend {
            Backend::Memory(mem) => {
                mem.insert_menu_item(item).await;
                Ok(())
            }
            Backend::Sql(db) => sql::insert_menu_item(db, item).await,
        }
    }

    pub async fn update_menu_item(&self, item: &MenuItem) -> AppResult<bool> {
        match &self.backend {
            Backend::Memory(mem) => Ok(mem.update_menu_item(item).await),
            Backend::Sql(db) => sql::update_menu_item(db, item).await,
        }
    }

    pub async fn delete_menu_item(&self, id: &str) -> AppResult<bool> {
        match &self.backend {
            Backend::Memory(mem) => Ok(mem.delete_menu_item(id).await),
            Backend::Sql(db) => sql::delete_menu_item(db, id).await,
        }
    }

    /// Tables ordered by number.
    pub async fn list_tables(&self) -> AppResult<Vec<Table>> {
        match &self.backend {
            Backend::Memory(mem) => Ok(mem.list_tables().await),
            Backend::Sql(db) => sql::list_tables(db).await,
        }
    }

    pub async fn get_table(&self, id: &str) -> AppResult<Option<Table>> {
        match &self.backend {
            Backend::Memory(mem) => Ok(mem.get_table(id).await),
            Backend::Sql(db) => sql::get_table(db, id).await,
        }
    }

    pub async fn find_table_by_number(&self, number: u32) -> AppResult<Option<Table>> {
        match &self.backend {
            Backend::Memory(mem) => Ok(mem.find_table_by_number(number).await),
            Backend::Sql(db) => sql::find_table_by_number(db, number).await,
        }
    }

    pub async fn insert_table(&self, table: &Table) -> AppResult<()> {
        match &self.backend {
            Backend::Memory(mem) => {
                mem.insert_table(table).await;
                Ok(())
            }
            Backend::Sql(db) => sql::insert_table(db, table).await,
        }
    }

    pub async fn update_table(&self, table: &Table) -> AppResult<bool> {
        match &self.backend {
            Backend::Memory(mem) => Ok(mem.update_table(table).await),
            Backend::Sql(db) => sql::update_table(db, table).await,
        }
    }

    pub async fn delete_table(&self, id: &str) -> AppResult<bool> {
        match &self.backend {
            Backend::Memory(mem) => Ok(mem.delete_table(id).await),
            Backend::Sql(db) => sql::delete_table(db, id).await,
        }
    }

    pub async fn config(&self) -> AppResult<RestaurantConfig> {
        match &self.backend {
            Backend::Memory(mem) => Ok(mem.config().await),
            Backend::Sql(db) => sql::config(db).await,
        }
    }

    pub async fn save_config(&self, config: &RestaurantConfig) -> AppResult<()> {
        match &self.backend {
            Backend::Memory(mem) => {
                mem.save_config(config).await;
                Ok(())
            }
            Backend::Sql(db) => sql::save_config(db, config).await,
        }
    }
}
