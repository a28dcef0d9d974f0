use std::time::Duration;

use table_order::{
    client::{Cart, ClientError, ConnectionState, FeedUpdate, LocalOrders, OrderApi, OrderFeed, PollingFeed},
    models::OrderStatus,
    routes::app,
    state::AppState,
    store::seed::default_menu,
};

async fn spawn_server() -> String {
    let state = AppState::in_memory().await.unwrap();
    let router = app(state, &[]);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn cart_with_pizza() -> Cart {
    let menu = default_menu();
    let pizza = menu.iter().find(|item| item.name == "Pizza Margherita").unwrap();
    let mut cart = Cart::new();
    cart.add(pizza);
    cart.add(pizza);
    cart
}

#[tokio::test]
async fn checkout_clears_the_cart_once_acknowledged() {
    let api = OrderApi::new(spawn_server().await);
    let mut cart = cart_with_pizza();

    let order = api.checkout(&mut cart, 3, None).await.unwrap();
    assert!(cart.is_empty());
    assert_eq!(order.total, 29.0);
    assert_eq!(order.status, OrderStatus::Pending);

    let pending = api.list_orders(Some(OrderStatus::Pending)).await.unwrap();
    assert_eq!(pending.len(), 1);

    let updated = api.update_status(&order.id, OrderStatus::Ready).await.unwrap();
    assert_eq!(updated.status, OrderStatus::Ready);
    assert!(api.list_orders(Some(OrderStatus::Pending)).await.unwrap().is_empty());

    let err = api
        .update_status(&order.id, OrderStatus::Preparing)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Api { status, .. } if status.as_u16() == 409));

    assert!(matches!(
        api.checkout(&mut Cart::new(), 3, None).await,
        Err(ClientError::EmptyCart)
    ));
}

#[tokio::test]
async fn failed_checkout_keeps_the_cart() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = OrderApi::new(format!("http://{addr}"));
    let mut cart = cart_with_pizza();
    let before = cart.clone();

    let err = api.checkout(&mut cart, 3, None).await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
    assert_eq!(cart, before);

    let api = OrderApi::new(spawn_server().await);
    let err = api.checkout(&mut cart, 0, None).await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status, .. } if status.as_u16() == 400));
    assert_eq!(cart, before);
}

#[tokio::test]
async fn polling_feed_follows_server_changes() {
    let base_url = spawn_server().await;
    let api = OrderApi::new(base_url.clone());
    let mut feed = PollingFeed::new(OrderApi::new(base_url), Duration::from_millis(50));
    let mut local = LocalOrders::default();

    let first = feed.next_update().await.unwrap();
    assert_eq!(first, FeedUpdate::Snapshot(vec![]));
    assert_eq!(feed.connection_state(), ConnectionState::Connected);
    local.apply(first);

    let order = api.checkout(&mut cart_with_pizza(), 8, None).await.unwrap();
    let created = feed.next_update().await.unwrap();
    assert_eq!(created, FeedUpdate::Created(order.clone()));
    local.apply(created);

    // Steps taken between two polls collapse into the latest state.
    api.update_status(&order.id, OrderStatus::Preparing).await.unwrap();
    api.update_status(&order.id, OrderStatus::Delivered).await.unwrap();
    loop {
        let update = feed.next_update().await.unwrap();
        let done = update == FeedUpdate::Removed { order_id: order.id.clone() };
        assert!(
            done || matches!(&update, FeedUpdate::StatusChanged { status: OrderStatus::Preparing, .. }),
            "unexpected update {update:?}"
        );
        local.apply(update);
        if done {
            break;
        }
    }
    assert!(local.orders().is_empty());
}
