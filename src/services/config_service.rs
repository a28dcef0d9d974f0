use crate::{
    dto::config::UpdateConfigRequest,
    error::{AppError, AppResult},
    models::RestaurantConfig,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn get_config(state: &AppState) -> AppResult<ApiResponse<RestaurantConfig>> {
    let config = state.catalog.config().await?;
    Ok(ApiResponse::success("Config", config, Some(Meta::empty())))
}

pub async fn update_config(
    state: &AppState,
    payload: UpdateConfigRequest,
) -> AppResult<ApiResponse<RestaurantConfig>> {
    let mut config = state.catalog.config().await?;

    if let Some(name) = payload.name {
        if name.trim().is_empty() {
            return Err(AppError::BadRequest("name must not be empty".into()));
        }
        config.name = name.trim().to_string();
    }
    if let Some(logo) = payload.logo {
        config.logo = Some(logo).filter(|l| !l.is_empty());
    }
    if let Some(color) = payload.primary_color {
        config.primary_color = parse_color(color)?;
    }
    if let Some(color) = payload.secondary_color {
        config.secondary_color = parse_color(color)?;
    }
    if let Some(currency) = payload.currency {
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(AppError::BadRequest("currency must be a 3-letter code".into()));
        }
        config.currency = currency.to_ascii_uppercase();
    }
    if let Some(language) = payload.language {
        if !matches!(language.as_str(), "es" | "en") {
            return Err(AppError::BadRequest("language must be `es` or `en`".into()));
        }
        config.language = language;
    }
    if let Some(phone) = payload.phone {
        config.phone = Some(phone);
    }
    if let Some(address) = payload.address {
        config.address = Some(address);
    }
    if let Some(email) = payload.email {
        config.email = Some(email);
    }

    state.catalog.save_config(&config).await?;
    tracing::info!(name = %config.name, "restaurant config updated");

    Ok(ApiResponse::success("Config updated", config, Some(Meta::empty())))
}

fn parse_color(color: String) -> AppResult<String> {
    let hex = color.strip_prefix('#').unwrap_or_default();
    if matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        Ok(color)
    } else {
        Err(AppError::BadRequest(format!("invalid color `{color}`")))
    }
}
