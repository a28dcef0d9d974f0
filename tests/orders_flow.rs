use std::sync::{Arc, Mutex};

use table_order::{
    dto::orders::{CreateOrderRequest, UpdateOrderStatusRequest},
    error::AppError,
    models::{Order, OrderItem, OrderStatus},
    notify::Notifier,
    routes::params::OrderListQuery,
    services::order_service,
    state::AppState,
    workflow::Transition,
};

#[derive(Default)]
struct RecordingNotifier {
    events: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn order_placed(&self, order: &Order) {
        self.events.lock().unwrap().push(format!("placed table={}", order.table_number));
    }

    fn status_changed(&self, order: &Order, previous: OrderStatus) {
        self.events
            .lock()
            .unwrap()
            .push(format!("{previous}->{}", order.status));
    }

    fn order_ready(&self, order: &Order) {
        self.events.lock().unwrap().push(format!("ready table={}", order.table_number));
    }
}

fn pizza(quantity: u32) -> OrderItem {
    OrderItem {
        id: Some("2".into()),
        name: "Pizza Margherita".into(),
        price: 14.50,
        quantity,
        notes: None,
    }
}

async fn active_with(state: &AppState, status: OrderStatus) -> Vec<Order> {
    let query = OrderListQuery {
        status: Some(status),
        ..Default::default()
    };
    order_service::list_orders(state, query)
        .await
        .unwrap()
        .data
        .unwrap()
        .items
}

// Table places an order, the kitchen moves it to preparing, then delivers it.
#[tokio::test]
async fn order_moves_through_the_kitchen_and_leaves_the_active_list() -> anyhow::Result<()> {
    let notifier = Arc::new(RecordingNotifier::default());
    let state = AppState::in_memory().await?.with_notifier(notifier.clone());

    let order = order_service::place_order(
        &state,
        CreateOrderRequest {
            table_number: 3,
            items: vec![pizza(1)],
            total: Some(14.50),
            customer_notes: None,
        },
    )
    .await?;
    assert!(!order.id.is_empty());
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.total, 14.50);

    let change = order_service::update_order_status(
        &state,
        UpdateOrderStatusRequest {
            order_id: order.id.clone(),
            status: OrderStatus::Preparing,
        },
    )
    .await?;
    assert_eq!(change.order.status, OrderStatus::Preparing);
    assert!(active_with(&state, OrderStatus::Pending).await.is_empty());
    let preparing = active_with(&state, OrderStatus::Preparing).await;
    assert_eq!(preparing.len(), 1);
    assert_eq!(preparing[0].id, order.id);

    order_service::update_order_status(
        &state,
        UpdateOrderStatusRequest {
            order_id: order.id.clone(),
            status: OrderStatus::Delivered,
        },
    )
    .await?;
    for status in OrderStatus::ALL {
        assert!(active_with(&state, status).await.is_empty());
    }
    let all = order_service::list_orders(&state, OrderListQuery::default()).await?;
    assert_eq!(all.meta.unwrap().total, Some(0));

    assert_eq!(
        notifier.events(),
        vec!["placed table=3", "pending->preparing", "preparing->delivered"]
    );
    Ok(())
}

#[tokio::test]
async fn total_is_derived_from_items_and_items_are_kept_verbatim() -> anyhow::Result<()> {
    let state = AppState::in_memory().await?;
    let mut item = pizza(2);
    item.notes = Some("extra albahaca".into());

    let placed = order_service::place_order(
        &state,
        CreateOrderRequest {
            table_number: 1,
            items: vec![item.clone()],
            total: Some(99.0),
            customer_notes: Some("  cumpleaños  ".into()),
        },
    )
    .await?;

    let stored = order_service::get_order(&state, &placed.id).await?.data.unwrap();
    assert_eq!(stored.total, 29.00);
    assert_eq!(stored.items, vec![item]);
    assert_eq!(stored.customer_notes.as_deref(), Some("cumpleaños"));
    Ok(())
}

#[tokio::test]
async fn ready_alerts_the_table_and_backward_moves_are_refused() -> anyhow::Result<()> {
    let notifier = Arc::new(RecordingNotifier::default());
    let state = AppState::in_memory().await?.with_notifier(notifier.clone());
    let order = order_service::place_order(
        &state,
        CreateOrderRequest {
            table_number: 6,
            items: vec![pizza(1)],
            total: None,
            customer_notes: None,
        },
    )
    .await?;

    let ready = UpdateOrderStatusRequest {
        order_id: order.id.clone(),
        status: OrderStatus::Ready,
    };
    let change = order_service::update_order_status(&state, ready.clone()).await?;
    assert!(change.transition.notifies_table());

    // Re-sending the same status changes nothing and alerts nobody.
    let again = order_service::update_order_status(&state, ready).await?;
    assert_eq!(again.transition, Transition::Unchanged);

    let backward = order_service::update_order_status(
        &state,
        UpdateOrderStatusRequest {
            order_id: order.id.clone(),
            status: OrderStatus::Preparing,
        },
    )
    .await;
    assert!(matches!(backward, Err(AppError::Conflict(_))));

    let missing = order_service::update_order_status(
        &state,
        UpdateOrderStatusRequest {
            order_id: "does-not-exist".into(),
            status: OrderStatus::Ready,
        },
    )
    .await;
    assert!(matches!(missing, Err(AppError::NotFound)));

    assert_eq!(
        notifier.events(),
        vec!["placed table=6", "pending->ready", "ready table=6"]
    );
    Ok(())
}
