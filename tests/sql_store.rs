use chrono::{Duration, Utc};
use table_order::{
    config::{Environment, StorageMode},
    dto::{orders::CreateOrderRequest, tables::CreateTableRequest},
    error::AppError,
    models::{NewOrder, OrderItem, OrderStatus, TableStatus},
    realtime::OrderHub,
    services::{order_service, table_service},
    state::AppState,
    store::{Backend, Catalog, OrderFilter, OrderStore, seed},
};

async fn sqlite_backend() -> Backend {
    Backend::connect(&StorageMode::Sqlite("sqlite::memory:".into()))
        .await
        .unwrap()
}

fn new_order(table_number: u32, quantity: u32) -> NewOrder {
    let items = vec![OrderItem {
        id: Some("2".into()),
        name: "Pizza Margherita".into(),
        price: 14.50,
        quantity,
        notes: Some("bien hecha".into()),
    }];
    NewOrder {
        table_number,
        total: table_order::models::items_total(&items),
        items,
        customer_notes: None,
    }
}

#[tokio::test]
async fn reopened_store_restores_only_undelivered_orders() {
    let backend = sqlite_backend().await;
    assert_eq!(backend.kind(), "sqlite");

    let store = OrderStore::open(backend.clone(), OrderHub::new()).await.unwrap();
    let kept = store.create(new_order(1, 2)).await.unwrap();
    let served = store.create(new_order(2, 1)).await.unwrap();
    store
        .set_status(&kept.id, OrderStatus::Preparing)
        .await
        .unwrap();
    store
        .set_status(&served.id, OrderStatus::Delivered)
        .await
        .unwrap();

    let reopened = OrderStore::open(backend.clone(), OrderHub::new()).await.unwrap();
    let (active, total) = reopened.list(&OrderFilter::default()).await;
    assert_eq!(total, 1);
    assert_eq!(active[0].id, kept.id);
    assert_eq!(active[0].status, OrderStatus::Preparing);
    assert_eq!(active[0].items, kept.items);
    assert_eq!(active[0].total, 29.0);

    let history = reopened
        .delivered_since(Utc::now() - Duration::days(1))
        .await
        .unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id, served.id);
    assert_eq!(history[0].status, OrderStatus::Delivered);

    backend.close().await;
}

#[tokio::test]
async fn catalog_round_trips_menu_tables_and_config() {
    let backend = sqlite_backend().await;
    let catalog = Catalog::new(backend.clone());

    assert!(catalog.list_menu(true).await.unwrap().is_empty());
    for item in seed::default_menu() {
        catalog.insert_menu_item(&item).await.unwrap();
    }
    let mut hidden = seed::default_menu().remove(0);
    hidden.available = false;
    assert!(catalog.update_menu_item(&hidden).await.unwrap());

    let available = catalog.list_menu(false).await.unwrap();
    let everything = catalog.list_menu(true).await.unwrap();
    assert_eq!(everything.len(), available.len() + 1);
    let stored = catalog.get_menu_item(&hidden.id).await.unwrap().unwrap();
    assert_eq!(stored.allergens, hidden.allergens);

    for table in seed::default_tables() {
        catalog.insert_table(&table).await.unwrap();
    }
    let mut table = catalog.find_table_by_number(1).await.unwrap().unwrap();
    table.status = TableStatus::Occupied;
    assert!(catalog.update_table(&table).await.unwrap());
    assert_eq!(
        catalog.get_table(&table.id).await.unwrap().unwrap().status,
        TableStatus::Occupied
    );
    assert!(catalog.delete_table(&table.id).await.unwrap());
    assert!(!catalog.delete_table(&table.id).await.unwrap());

    let mut config = catalog.config().await.unwrap();
    assert_eq!(config, seed::default_config());
    config.currency = "EUR".into();
    catalog.save_config(&config).await.unwrap();
    catalog.save_config(&config).await.unwrap();
    assert_eq!(catalog.config().await.unwrap().currency, "EUR");

    backend.close().await;
}

fn table_request(number: u32) -> CreateTableRequest {
    CreateTableRequest {
        number,
        capacity: 4,
        location: "Terraza".into(),
        status: None,
        qr_code: None,
        notes: None,
    }
}

#[tokio::test]
async fn numbers_beyond_the_column_range_are_bad_requests() {
    let backend = sqlite_backend().await;
    let state = AppState::new(backend.clone(), Environment::Development)
        .await
        .unwrap();

    let result = order_service::place_order(
        &state,
        CreateOrderRequest {
            table_number: 3_000_000_000,
            items: new_order(1, 1).items,
            total: None,
            customer_notes: None,
        },
    )
    .await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));
    assert!(state.orders.snapshot().await.is_empty());

    let result = table_service::create_table(&state, table_request(3_000_000_000)).await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    let mut oversized = table_request(7);
    oversized.capacity = u32::MAX;
    let result = table_service::create_table(&state, oversized).await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    backend.close().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_duplicate_tables_yield_one_conflict() {
    let backend = sqlite_backend().await;
    let state = AppState::new(backend.clone(), Environment::Development)
        .await
        .unwrap();

    let (first, second) = tokio::join!(
        table_service::create_table(&state, table_request(42)),
        table_service::create_table(&state, table_request(42)),
    );
    let conflicts = [&first, &second]
        .iter()
        .filter(|result| matches!(result, Err(AppError::Conflict(_))))
        .count();
    assert_eq!(conflicts, 1);
    assert!(first.is_ok() || second.is_ok());

    let tables = state.catalog.list_tables().await.unwrap();
    assert_eq!(tables.iter().filter(|t| t.number == 42).count(), 1);

    backend.close().await;
}

#[tokio::test]
async fn duplicate_number_written_directly_is_a_conflict() {
    let backend = sqlite_backend().await;
    let catalog = Catalog::new(backend.clone());

    let mut tables = seed::default_tables();
    let first = tables.remove(0);
    catalog.insert_table(&first).await.unwrap();

    let mut clash = tables.remove(0);
    clash.number = first.number;
    assert!(matches!(
        catalog.insert_table(&clash).await,
        Err(AppError::Conflict(_))
    ));

    backend.close().await;
}
