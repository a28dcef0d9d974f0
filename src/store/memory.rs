use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::{
    models::{MenuItem, Order, OrderStatus, RestaurantConfig, Table},
    store::seed,
};

/// Process-local storage. Keeps every order ever placed so delivered orders
/// stay available to analytics after they leave the active set.
pub struct MemoryBackend {
    orders: RwLock<Vec<Order>>,
    menu: RwLock<Vec<MenuItem>>,
    tables: RwLock<Vec<Table>>,
    config: RwLock<RestaurantConfig>,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::seeded()
    }
}

impl MemoryBackend {
    pub fn seeded() -> Self {
        Self {
            orders: RwLock::new(Vec::new()),
            menu: RwLock::new(seed::default_menu()),
            tables: RwLock::new(seed::default_tables()),
            config: RwLock::new(seed::default_config()),
        }
    }

    pub async fn insert_order(&self, order: &Order) {
        self.orders.write().await.push(order.clone());
    }

    pub async fn update_order_status(
        &self,
        id: &str,
        status: OrderStatus,
        updated_at: DateTime<Utc>,
    ) -> bool {
        let mut orders = self.orders.write().await;
        match orders.iter_mut().find(|order| order.id == id) {
            Some(order) => {
                order.status = status;
                order.updated_at = updated_at;
                true
            }
            None => false,
        }
    }

    pub async fn active_orders(&self) -> Vec<Order> {
        self.orders
            .read()
            .await
            .iter()
            .filter(|order| order.status.is_active())
            .cloned()
            .collect()
    }

    pub async fn delivered_orders_since(&self, cutoff: DateTime<Utc>) -> Vec<Order> {
        self.orders
            .read()
            .await
            .iter()
            .filter(|order| order.status == OrderStatus::Delivered && order.timestamp >= cutoff)
            .cloned()
            .collect()
    }

    pub async fn list_menu(&self, include_unavailable: bool) -> Vec<MenuItem> {
        let mut items: Vec<MenuItem> = self
            .menu
            .read()
            .await
            .iter()
            .filter(|item| include_unavailable || item.available)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.category.cmp(&b.category).then_with(|| a.name.cmp(&b.name)));
        items
    }

    pub async fn get_menu_item(&self, id: &str) -> Option<MenuItem> {
        self.menu.read().await.iter().find(|item| item.id == id).cloned()
    }

    pub async fn insert_menu_item(&self, item: &MenuItem) {
        self.menu.write().await.push(item.clone());
    }

    pub async fn update_menu_item(&self, item: &MenuItem) -> bool {
        let mut menu = self.menu.write().await;
        match menu.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => {
                *existing = item.clone();
                true
            }
            None => false,
        }
    }

    pub async fn delete_menu_item(&self, id: &str) -> bool {
        let mut menu = self.menu.write().await;
        let before = menu.len();
        menu.retain(|item| item.id != id);
        menu.len() != before
    }

    pub async fn list_tables(&self) -> Vec<Table> {
        let mut tables = self.tables.read().await.clone();
        tables.sort_by_key(|table| table.number);
        tables
    }

    pub async fn find_table_by_number(&self, number: u32) -> Option<Table> {
        self.tables
            .read()
            .await
            .iter()
            .find(|table| table.number == number)
            .cloned()
    }

    pub async fn get_table(&self, id: &str) -> Option<Table> {
        self.tables.read().await.iter().find(|table| table.id == id).cloned()
    }

    pub async fn insert_table(&self, table: &Table) {
        self.tables.write().await.push(table.clone());
    }

    pub async fn update_table(&self, table: &Table) -> bool {
        let mut tables = self.tables.write().await;
        match tables.iter_mut().find(|existing| existing.id == table.id) {
            Some(existing) => {
                *existing = table.clone();
                true
            }
            None => false,
        }
    }

    pub async fn delete_table(&self, id: &str) -> bool {
        let mut tables = self.tables.write().await;
        let before = tables.len();
        tables.retain(|table| table.id != id);
        tables.len() != before
    }

    pub async fn config(&self) -> RestaurantConfig {
        self.config.read().await.clone()
    }

    pub async fn save_config(&self, config: &RestaurantConfig) {
        *self.config.write().await = config.clone();
    }
}
