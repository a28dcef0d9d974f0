use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::orders::{CreateOrderRequest, OrderList, StatusUpdated, UpdateOrderStatusRequest},
    error::AppResult,
    models::Order,
    response::{ApiResponse, Meta},
    routes::{
        extract::{AppJson, AppQuery},
        params::OrderListQuery,
    },
    services::order_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_orders).post(create_order).put(update_order_status),
        )
        .route("/{id}", get(get_order))
}

#[utoipa::path(
    get,
    path = "/api/orders",
    params(
        ("status" = Option<String>, Query, description = "pending, preparing, ready or delivered"),
        ("limit" = Option<usize>, Query, description = "Page size, at most 500"),
        ("offset" = Option<usize>, Query, description = "Orders to skip, default 0"),
    ),
    responses(
        (status = 200, description = "Active orders, newest first", body = ApiResponse<OrderList>),
        (status = 400, description = "Unknown status filter"),
    ),
    tag = "Orders"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<OrderListQuery>,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let res = order_service::list_orders(&state, query).await?;
    Ok(Json(res))
}

#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order placed", body = ApiResponse<Order>),
        (status = 400, description = "Invalid order"),
    ),
    tag = "Orders"
)]
pub async fn create_order(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateOrderRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Order>>)> {
    let order = order_service::place_order(&state, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "Order created",
            order,
            Some(Meta::empty()),
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/api/orders",
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Status applied", body = ApiResponse<StatusUpdated>),
        (status = 404, description = "Order not found or already delivered"),
        (status = 409, description = "Status would move backwards"),
    ),
    tag = "Orders"
)]
pub async fn update_order_status(
    State(state): State<AppState>,
    AppJson(payload): AppJson<UpdateOrderStatusRequest>,
) -> AppResult<Json<ApiResponse<StatusUpdated>>> {
    let change = order_service::update_order_status(&state, payload).await?;
    let data = StatusUpdated {
        success: true,
        order: change.order,
    };
    Ok(Json(ApiResponse::success(
        "Order status updated",
        data,
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    params(("id" = String, Path, description = "Order id")),
    responses(
        (status = 200, description = "Active order", body = ApiResponse<Order>),
        (status = 404, description = "Order not found or already delivered"),
    ),
    tag = "Orders"
)]
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let res = order_service::get_order(&state, &id).await?;
    Ok(Json(res))
}
