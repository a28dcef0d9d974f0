use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};

use crate::{
    dto::tables::{CreateTableRequest, TableList, UpdateTableRequest},
    error::AppResult,
    models::Table,
    response::ApiResponse,
    routes::extract::AppJson,
    services::table_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tables).post(create_table))
        .route("/{id}", put(update_table).delete(delete_table))
}

#[utoipa::path(
    get,
    path = "/api/tables",
    responses(
        (status = 200, description = "Tables ordered by number", body = ApiResponse<TableList>)
    ),
    tag = "Tables"
)]
pub async fn list_tables(State(state): State<AppState>) -> AppResult<Json<ApiResponse<TableList>>> {
    Ok(Json(table_service::list_tables(&state).await?))
}

#[utoipa::path(
    post,
    path = "/api/tables",
    request_body = CreateTableRequest,
    responses(
        (status = 201, description = "Table created", body = ApiResponse<Table>),
        (status = 400, description = "Invalid table"),
        (status = 409, description = "Table number already in use"),
    ),
    tag = "Tables"
)]
pub async fn create_table(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateTableRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Table>>)> {
    let res = table_service::create_table(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(res)))
}

#[utoipa::path(
    put,
    path = "/api/tables/{id}",
    params(("id" = String, Path, description = "Table id")),
    request_body = UpdateTableRequest,
    responses(
        (status = 200, description = "Table updated", body = ApiResponse<Table>),
        (status = 404, description = "Table not found"),
        (status = 409, description = "Table number already in use"),
    ),
    tag = "Tables"
)]
pub async fn update_table(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<UpdateTableRequest>,
) -> AppResult<Json<ApiResponse<Table>>> {
    Ok(Json(table_service::update_table(&state, &id, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/tables/{id}",
    params(("id" = String, Path, description = "Table id")),
    responses(
        (status = 200, description = "Table deleted"),
        (status = 404, description = "Table not found"),
    ),
    tag = "Tables"
)]
pub async fn delete_table(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    Ok(Json(table_service::delete_table(&state, &id).await?))
}
