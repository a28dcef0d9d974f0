use crate::{
    dto::orders::{CreateOrderRequest, OrderList, UpdateOrderStatusRequest},
    error::{AppError, AppResult},
    models::{NewOrder, Order, items_total},
    response::{ApiResponse, Meta},
    routes::params::OrderListQuery,
    state::AppState,
    store::StatusChange,
    workflow::Transition,
};

/// Amounts closer than half a cent are the same total.
const TOTAL_TOLERANCE: f64 = 0.005;

/// Table numbers are stored as signed 32-bit integers.
pub const MAX_TABLE_NUMBER: u32 = i32::MAX as u32;

/// Check a submitted order and turn it into something the store accepts.
pub fn validate_order(payload: CreateOrderRequest) -> AppResult<NewOrder> {
    if payload.table_number == 0 || payload.table_number > MAX_TABLE_NUMBER {
        return Err(AppError::BadRequest("tableNumber must be a positive integer".into()));
    }
    if payload.items.is_empty() {
        return Err(AppError::BadRequest("Order has no items".into()));
    }
    for item in &payload.items {
        if item.name.trim().is_empty() {
            return Err(AppError::BadRequest("Every item needs a name".into()));
        }
        if item.quantity == 0 {
            return Err(AppError::BadRequest(format!(
                "Invalid quantity for {}",
                item.name
            )));
        }
        if !item.price.is_finite() || item.price < 0.0 {
            return Err(AppError::BadRequest(format!("Invalid price for {}", item.name)));
        }
    }

    let total = items_total(&payload.items);
    if !total.is_finite() {
        return Err(AppError::BadRequest("Order total is out of range".into()));
    }
    if let Some(submitted) = payload.total
        && (submitted - total).abs() >= TOTAL_TOLERANCE
    {
        tracing::warn!(
            table = payload.table_number,
            submitted,
            computed = total,
            "submitted total does not match items, using computed total"
        );
    }

    let customer_notes = payload
        .customer_notes
        .map(|notes| notes.trim().to_string())
        .filter(|notes| !notes.is_empty());

    Ok(NewOrder {
        table_number: payload.table_number,
        items: payload.items,
        total,
        customer_notes,
    })
}

/// Store a new order. The store announces it to every connected party.
pub async fn place_order(state: &AppState, payload: CreateOrderRequest) -> AppResult<Order> {
    let new_order = validate_order(payload)?;
    let order = state.orders.create(new_order).await?;

    state.notifier.order_placed(&order);

    Ok(order)
}

pub async fn list_orders(
    state: &AppState,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    let filter = query.normalize();
    let (orders, total) = state.orders.list(&filter).await;

    let limit = filter.limit.unwrap_or(total);
    let meta = Meta::new(limit, filter.offset, total);
    Ok(ApiResponse::success(
        "Orders",
        OrderList { items: orders },
        Some(meta),
    ))
}

pub async fn get_order(state: &AppState, id: &str) -> AppResult<ApiResponse<Order>> {
    let order = match state.orders.get(id).await {
        Some(o) => o,
        None => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success("Order", order, Some(Meta::empty())))
}

/// Apply a kitchen status change and run its side effects.
pub async fn update_order_status(
    state: &AppState,
    payload: UpdateOrderStatusRequest,
) -> AppResult<StatusChange> {
    let change = state
        .orders
        .set_status(&payload.order_id, payload.status)
        .await?;

    if let Transition::Advanced { from, .. } = change.transition {
        state.notifier.status_changed(&change.order, from);
        if change.transition.notifies_table() {
            state.notifier.order_ready(&change.order);
        }
    }

    Ok(change)
}
