use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::config::UpdateConfigRequest,
    error::AppResult,
    models::RestaurantConfig,
    response::ApiResponse,
    routes::extract::AppJson,
    services::config_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_config).put(update_config))
}

#[utoipa::path(
    get,
    path = "/api/config",
    responses(
        (status = 200, description = "Restaurant branding and contact details", body = ApiResponse<RestaurantConfig>)
    ),
    tag = "Config"
)]
pub async fn get_config(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<RestaurantConfig>>> {
    Ok(Json(config_service::get_config(&state).await?))
}

#[utoipa::path(
    put,
    path = "/api/config",
    request_body = UpdateConfigRequest,
    responses(
        (status = 200, description = "Configuration saved", body = ApiResponse<RestaurantConfig>),
        (status = 400, description = "Invalid color, currency or language"),
    ),
    tag = "Config"
)]
pub async fn update_config(
    State(state): State<AppState>,
    AppJson(payload): AppJson<UpdateConfigRequest>,
) -> AppResult<Json<ApiResponse<RestaurantConfig>>> {
    Ok(Json(config_service::update_config(&state, payload).await?))
}
