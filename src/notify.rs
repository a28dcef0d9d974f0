use crate::models::{Order, OrderStatus};

/// Side-channel alerts raised by the order workflow (kitchen chime, table
/// pager, push notification). Injected into [`crate::state::AppState`].
pub trait Notifier: Send + Sync {
    fn order_placed(&self, order: &Order);

    fn status_changed(&self, order: &Order, previous: OrderStatus);

    /// The order is waiting at the pass for its table.
    fn order_ready(&self, order: &Order);
}

/// Emits every alert as a structured log event.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn order_placed(&self, order: &Order) {
        tracing::info!(
            order_id = %order.id,
            table = order.table_number,
            items = order.items.len(),
            total = order.total,
            "new order received"
        );
    }

    fn status_changed(&self, order: &Order, previous: OrderStatus) {
        tracing::info!(
            order_id = %order.id,
            from = %previous,
            to = %order.status,
            "order status updated"
        );
    }

    fn order_ready(&self, order: &Order) {
        tracing::info!(order_id = %order.id, table = order.table_number, "order ready for table");
    }
}
