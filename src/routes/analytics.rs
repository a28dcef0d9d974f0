use axum::{
    Json, Router,
    extract::State,
    routing::get,
};

use crate::{
    dto::analytics::{AnalyticsQuery, AnalyticsReport},
    error::AppResult,
    response::ApiResponse,
    routes::extract::AppQuery,
    services::analytics_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_analytics))
}

#[utoipa::path(
    get,
    path = "/api/analytics",
    params(
        ("days" = Option<i64>, Query, description = "Trailing window in days, default 7, at most 365"),
    ),
    responses(
        (status = 200, description = "Sales summary over delivered orders", body = ApiResponse<AnalyticsReport>)
    ),
    tag = "Analytics"
)]
pub async fn get_analytics(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<AnalyticsQuery>,
) -> AppResult<Json<ApiResponse<AnalyticsReport>>> {
    Ok(Json(analytics_service::analytics(&state, query).await?))
}
