use uuid::Uuid;

use crate::{
    dto::tables::{CreateTableRequest, TableList, UpdateTableRequest},
    error::{AppError, AppResult},
    models::{Table, TableStatus},
    response::{ApiResponse, Meta},
    services::order_service::MAX_TABLE_NUMBER,
    state::AppState,
};

pub async fn list_tables(state: &AppState) -> AppResult<ApiResponse<TableList>> {
    let items = state.catalog.list_tables().await?;
    Ok(ApiResponse::success(
        "Tables",
        TableList { items },
        Some(Meta::empty()),
    ))
}

pub async fn create_table(
    state: &AppState,
    payload: CreateTableRequest,
) -> AppResult<ApiResponse<Table>> {
    validate(payload.number, payload.capacity)?;
    let _guard = state.catalog.lock_tables().await;
    ensure_number_free(state, payload.number, None).await?;

    let table = Table {
        id: Uuid::new_v4().simple().to_string(),
        number: payload.number,
        capacity: payload.capacity,
        location: payload.location,
        status: payload.status.unwrap_or(TableStatus::Available),
        qr_code: payload.qr_code,
        notes: payload.notes,
    };
    state.catalog.insert_table(&table).await?;
    tracing::info!(table_id = %table.id, number = table.number, "table created");

    Ok(ApiResponse::success(
        "Table created",
        table,
        Some(Meta::empty()),
    ))
}

pub async fn update_table(
    state: &AppState,
    id: &str,
    payload: UpdateTableRequest,
) -> AppResult<ApiResponse<Table>> {
    let _guard = state.catalog.lock_tables().await;
    let mut table = match state.catalog.get_table(id).await? {
        Some(t) => t,
        None => return Err(AppError::NotFound),
    };

    if let Some(number) = payload.number
        && number != table.number
    {
        ensure_number_free(state, number, Some(id)).await?;
        table.number = number;
    }
    if let Some(capacity) = payload.capacity {
        table.capacity = capacity;
    }
    if let Some(location) = payload.location {
        table.location = location;
    }
    if let Some(status) = payload.status {
        table.status = status;
    }
    if let Some(qr_code) = payload.qr_code {
        table.qr_code = Some(qr_code);
    }
    if let Some(notes) = payload.notes {
        table.notes = Some(notes);
    }
    validate(table.number, table.capacity)?;

    if !state.catalog.update_table(&table).await? {
        return Err(AppError::NotFound);
    }
    Ok(ApiResponse::success("Updated", table, Some(Meta::empty())))
}

pub async fn delete_table(
    state: &AppState,
    id: &str,
) -> AppResult<ApiResponse<serde_json::Value>> {
    if !state.catalog.delete_table(id).await? {
        return Err(AppError::NotFound);
    }
    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

fn validate(number: u32, capacity: u32) -> AppResult<()> {
    if number == 0 || number > MAX_TABLE_NUMBER {
        return Err(AppError::BadRequest("table number must be positive".into()));
    }
    if capacity == 0 || capacity > MAX_TABLE_NUMBER {
        return Err(AppError::BadRequest("capacity must be positive".into()));
    }
    Ok(())
}

async fn ensure_number_free(state: &AppState, number: u32, except_id: Option<&str>) -> AppResult<()> {
    match state.catalog.find_table_by_number(number).await? {
        Some(existing) if Some(existing.id.as_str()) != except_id => Err(AppError::Conflict(
            format!("table number {number} already exists"),
        )),
        _ => Ok(()),
    }
}
