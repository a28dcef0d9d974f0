use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{NewOrder, Order, OrderStatus},
    realtime::hub::OrderHub,
    store::Backend,
    workflow::{Transition, check_transition},
};

#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    /// `None` returns every matching order.
    pub limit: Option<usize>,
    pub offset: usize,
}

#[derive(Debug, Clone)]
pub struct StatusChange {
    /// The order as it stands after the change, including when it was just evicted.
    pub order: Order,
    pub transition: Transition,
}

/// Owner of the active order set.
///
/// Every mutation holds the set's lock across the persistence write and the
/// broadcast, so creations and status changes are applied and announced one
/// at a time in arrival order.
pub struct OrderStore {
    active: Mutex<Vec<Order>>,
    backend: Backend,
    hub: OrderHub,
}

impl OrderStore {
    /// Rebuild the active set from whatever the backend already holds.
    pub async fn open(backend: Backend, hub: OrderHub) -> AppResult<Self> {
        let mut active = backend.active_orders().await?;
        active.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        tracing::debug!(backend = backend.kind(), restored = active.len(), "order store opened");
        Ok(Self {
            active: Mutex::new(active),
            backend,
            hub,
        })
    }

    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    pub async fn create(&self, new_order: NewOrder) -> AppResult<Order> {
        let mut active = self.active.lock().await;
        let now = Utc::now();
        let order = Order {
            id: Uuid::new_v4().simple().to_string(),
            table_number: new_order.table_number,
            items: new_order.items,
            total: new_order.total,
            status: OrderStatus::Pending,
            timestamp: now,
            updated_at: now,
            customer_notes: new_order.customer_notes,
        };
        self.backend.insert_order(&order).await?;
        active.insert(0, order.clone());
        self.hub.publish_created(&order);
        Ok(order)
    }

    /// Active orders, newest first, with the number of matches before paging.
    pub async fn list(&self, filter: &OrderFilter) -> (Vec<Order>, usize) {
        let active = self.active.lock().await;
        let matching: Vec<&Order> = active
            .iter()
            .filter(|order| filter.status.is_none_or(|status| order.status == status))
            .collect();
        let total = matching.len();
        let page = matching
            .into_iter()
            .skip(filter.offset)
            .take(filter.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect();
        (page, total)
    }

    pub async fn snapshot(&self) -> Vec<Order> {
        self.active.lock().await.clone()
    }

    pub async fn get(&self, id: &str) -> Option<Order> {
        self.active
            .lock()
            .await
            .iter()
            .find(|order| order.id == id)
            .cloned()
    }

    /// Move an active order to `status`.
    ///
    /// Unknown or already delivered ids are `NotFound`; backward moves are a
    /// `Conflict`. Re-sending the current status succeeds without touching storage.
    pub async fn set_status(&self, id: &str, status: OrderStatus) -> AppResult<StatusChange> {
        let mut active = self.active.lock().await;
        let index = active
            .iter()
            .position(|order| order.id == id)
            .ok_or(AppError::NotFound)?;

        let transition = check_transition(active[index].status, status)?;
        if transition == Transition::Unchanged {
            return Ok(StatusChange {
                order: active[index].clone(),
                transition,
            });
        }

        let now = Utc::now();
        if !self.backend.update_order_status(id, status, now).await? {
            return Err(AppError::Internal(anyhow::anyhow!(
                "order {id} is active but missing from storage"
            )));
        }

        let order = &mut active[index];
        order.status = status;
        order.updated_at = now;
        let order = order.clone();
        if transition.evicts() {
            active.remove(index);
        }

        self.hub.publish_status(&order);
        if transition.notifies_table() {
            self.hub.publish_ready(&order);
        }

        Ok(StatusChange { order, transition })
    }

    pub async fn delivered_since(&self, cutoff: DateTime<Utc>) -> AppResult<Vec<Order>> {
        self.backend.delivered_orders_since(cutoff).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OrderItem;

    fn new_order(table_number: u32) -> NewOrder {
        NewOrder {
            table_number,
            items: vec![OrderItem {
                id: Some("2".into()),
                name: "Pizza Margherita".into(),
                price: 14.5,
                quantity: 1,
                notes: None,
            }],
            total: 14.5,
            customer_notes: None,
        }
    }

    #[tokio::test]
    async fn create_assigns_identity_and_lists_newest_first() {
        let store = OrderStore::open(Backend::memory(), OrderHub::new()).await.unwrap();
        let before = Utc::now();
        let first = store.create(new_order(1)).await.unwrap();
        let second = store.create(new_order(2)).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(first.status, OrderStatus::Pending);
        assert!(first.timestamp >= before);

        let (orders, total) = store.list(&OrderFilter::default()).await;
        assert_eq!(total, 2);
        assert_eq!(orders[0].id, second.id);
        assert_eq!(orders[1].id, first.id);
    }

    #[tokio::test]
    async fn list_filters_then_pages() {
        let store = OrderStore::open(Backend::memory(), OrderHub::new()).await.unwrap();
        for table in 1..=5 {
            store.create(new_order(table)).await.unwrap();
        }
        let (all, _) = store.list(&OrderFilter::default()).await;
        store
            .set_status(&all[0].id, OrderStatus::Preparing)
            .await
            .unwrap();

        let pending = OrderFilter {
            status: Some(OrderStatus::Pending),
            limit: Some(2),
            offset: 1,
        };
        let (page, total) = store.list(&pending).await;
        assert_eq!(total, 4);
        assert_eq!(page.len(), 2);
        assert!(page.iter().all(|o| o.status == OrderStatus::Pending));
        assert_eq!(page[0].table_number, 3);
    }

    #[tokio::test]
    async fn delivered_orders_leave_the_active_set_but_stay_in_history() {
        let store = OrderStore::open(Backend::memory(), OrderHub::new()).await.unwrap();
        let order = store.create(new_order(7)).await.unwrap();

        let change = store
            .set_status(&order.id, OrderStatus::Delivered)
            .await
            .unwrap();
        assert!(change.transition.evicts());
        assert_eq!(change.order.status, OrderStatus::Delivered);

        assert!(store.get(&order.id).await.is_none());
        assert!(store.snapshot().await.is_empty());
        assert!(matches!(
            store.set_status(&order.id, OrderStatus::Delivered).await,
            Err(AppError::NotFound)
        ));

        let history = store.delivered_since(order.timestamp).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, order.id);
    }

    #[tokio::test]
    async fn backward_and_unknown_updates_are_rejected() {
        let store = OrderStore::open(Backend::memory(), OrderHub::new()).await.unwrap();
        let order = store.create(new_order(1)).await.unwrap();
        store.set_status(&order.id, OrderStatus::Ready).await.unwrap();

        assert!(matches!(
            store.set_status(&order.id, OrderStatus::Pending).await,
            Err(AppError::Conflict(_))
        ));
        assert!(matches!(
            store.set_status("missing", OrderStatus::Ready).await,
            Err(AppError::NotFound)
        ));

        let same = store.set_status(&order.id, OrderStatus::Ready).await.unwrap();
        assert_eq!(same.transition, Transition::Unchanged);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn broadcasts_follow_the_order_changes_were_applied() {
        use crate::realtime::events::ServerEvent;
        use std::sync::Arc;

        let hub = OrderHub::new();
        let mut rx = hub.subscribe();
        let store = Arc::new(OrderStore::open(Backend::memory(), hub).await.unwrap());

        let mut ids = Vec::new();
        for table in 1..=8 {
            ids.push(store.create(new_order(table)).await.unwrap().id);
        }

        let mut tasks = Vec::new();
        for id in &ids {
            for status in [OrderStatus::Preparing, OrderStatus::Ready, OrderStatus::Delivered] {
                let store = store.clone();
                let id = id.clone();
                tasks.push(tokio::spawn(async move {
                    let _ = store.set_status(&id, status).await;
                }));
            }
        }
        for task in tasks {
            task.await.unwrap();
        }

        let mut last_rank = std::collections::HashMap::new();
        let mut created = 0;
        while let Ok(event) = rx.try_recv() {
            match event {
                ServerEvent::NewOrder(_) => created += 1,
                ServerEvent::OrderStatusUpdate { order_id, status, .. } => {
                    let previous = last_rank.insert(order_id, status.rank()).unwrap_or(0);
                    assert!(status.rank() > previous);
                }
                ServerEvent::OrderReady { order_id, .. } => {
                    assert_eq!(last_rank.get(&order_id), Some(&OrderStatus::Ready.rank()));
                }
                other => panic!("unexpected event {other:?}"),
            }
        }
        assert_eq!(created, ids.len());
        assert_eq!(last_rank.len(), ids.len());
    }
}
