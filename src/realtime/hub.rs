//! Fan-out of order events to every connected session.
//!
//! ```text
//! OrderStore (create / set_status, under its lock)
//!       │ ServerEvent
//!       ▼
//!   OrderHub ── broadcast::Sender ──┬──► ws session (kitchen display)
//!                                   ├──► ws session (table 3)
//!                                   └──► HubFeed (in-process client)
//! ```

use tokio::sync::broadcast;

use crate::{models::Order, realtime::events::ServerEvent};

/// Buffer for bursts; a session that falls further behind is resynchronized
/// with a full snapshot.
const BROADCAST_CAPACITY: usize = 256;

#[derive(Clone)]
pub struct OrderHub {
    tx: broadcast::Sender<ServerEvent>,
}

impl Default for OrderHub {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderHub {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ServerEvent> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    pub fn publish_created(&self, order: &Order) {
        self.publish(ServerEvent::NewOrder(order.clone()));
    }

    pub fn publish_status(&self, order: &Order) {
        self.publish(ServerEvent::OrderStatusUpdate {
            order_id: order.id.clone(),
            status: order.status,
            table_number: order.table_number,
        });
    }

    pub fn publish_ready(&self, order: &Order) {
        self.publish(ServerEvent::OrderReady {
            order_id: order.id.clone(),
            table_number: order.table_number,
        });
    }

    fn publish(&self, event: ServerEvent) {
        // No subscribers is not an error: nobody is watching right now.
        let _ = self.tx.send(event);
    }
}

/// Whether a session should receive `event`.
///
/// Table-addressed events only reach sessions that joined that table; all
/// other events go to everyone.
pub fn should_deliver(event: &ServerEvent, joined_table: Option<u32>) -> bool {
    match event {
        ServerEvent::OrderReady { table_number, .. } => joined_table == Some(*table_number),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OrderItem, OrderStatus};
    use chrono::Utc;

    fn order() -> Order {
        let now = Utc::now();
        Order {
            id: "o-1".into(),
            table_number: 3,
            items: vec![OrderItem {
                id: None,
                name: "Tacos de Pollo".into(),
                price: 11.25,
                quantity: 2,
                notes: None,
            }],
            total: 22.5,
            status: OrderStatus::Ready,
            timestamp: now,
            updated_at: now,
            customer_notes: None,
        }
    }

    #[tokio::test]
    async fn every_subscriber_sees_each_event() {
        let hub = OrderHub::new();
        let mut kitchen = hub.subscribe();
        let mut table = hub.subscribe();
        assert_eq!(hub.subscriber_count(), 2);

        hub.publish_status(&order());

        for rx in [&mut kitchen, &mut table] {
            match rx.recv().await.unwrap() {
                ServerEvent::OrderStatusUpdate { order_id, status, .. } => {
                    assert_eq!(order_id, "o-1");
                    assert_eq!(status, OrderStatus::Ready);
                }
                other => panic!("unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn ready_notice_only_reaches_its_table() {
        let event = ServerEvent::OrderReady {
            order_id: "o-1".into(),
            table_number: 3,
        };
        assert!(should_deliver(&event, Some(3)));
        assert!(!should_deliver(&event, Some(4)));
        assert!(!should_deliver(&event, None));
        assert!(should_deliver(&ServerEvent::NewOrder(order()), None));
    }
}
