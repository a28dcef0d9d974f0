use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::menu::{CreateMenuItemRequest, MenuList, UpdateMenuItemRequest},
    error::AppResult,
    models::MenuItem,
    response::ApiResponse,
    routes::{
        extract::{AppJson, AppQuery},
        params::MenuQuery,
    },
    services::menu_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_menu).post(create_menu_item))
        .route(
            "/{id}",
            get(get_menu_item)
                .put(update_menu_item)
                .delete(delete_menu_item),
        )
}

#[utoipa::path(
    get,
    path = "/api/menu",
    params(
        ("include_unavailable" = Option<bool>, Query, description = "Also list items marked unavailable"),
    ),
    responses(
        (status = 200, description = "Menu sorted by category then name", body = ApiResponse<MenuList>)
    ),
    tag = "Menu"
)]
pub async fn list_menu(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<MenuQuery>,
) -> AppResult<Json<ApiResponse<MenuList>>> {
    let res =
        menu_service::list_menu(&state, query.include_unavailable.unwrap_or(false)).await?;
    Ok(Json(res))
}

#[utoipa::path(
    get,
    path = "/api/menu/{id}",
    params(("id" = String, Path, description = "Menu item id")),
    responses(
        (status = 200, description = "Menu item", body = ApiResponse<MenuItem>),
        (status = 404, description = "Menu item not found"),
    ),
    tag = "Menu"
)]
pub async fn get_menu_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<MenuItem>>> {
    Ok(Json(menu_service::get_menu_item(&state, &id).await?))
}

#[utoipa::path(
    post,
    path = "/api/menu",
    request_body = CreateMenuItemRequest,
    responses(
        (status = 201, description = "Menu item created", body = ApiResponse<MenuItem>),
        (status = 400, description = "Invalid menu item"),
    ),
    tag = "Menu"
)]
pub async fn create_menu_item(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateMenuItemRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<MenuItem>>)> {
    let res = menu_service::create_menu_item(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(res)))
}

#[utoipa::path(
    put,
    path = "/api/menu/{id}",
    params(("id" = String, Path, description = "Menu item id")),
    request_body = UpdateMenuItemRequest,
    responses(
        (status = 200, description = "Menu item updated", body = ApiResponse<MenuItem>),
        (status = 404, description = "Menu item not found"),
    ),
    tag = "Menu"
)]
pub async fn update_menu_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<UpdateMenuItemRequest>,
) -> AppResult<Json<ApiResponse<MenuItem>>> {
    Ok(Json(
        menu_service::update_menu_item(&state, &id, payload).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/menu/{id}",
    params(("id" = String, Path, description = "Menu item id")),
    responses(
        (status = 200, description = "Menu item deleted"),
        (status = 404, description = "Menu item not found"),
    ),
    tag = "Menu"
)]
pub async fn delete_menu_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    Ok(Json(menu_service::delete_menu_item(&state, &id).await?))
}
