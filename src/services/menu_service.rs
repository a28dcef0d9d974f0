use uuid::Uuid;

use crate::{
    dto::menu::{CreateMenuItemRequest, MenuList, UpdateMenuItemRequest},
    error::{AppError, AppResult},
    models::MenuItem,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn list_menu(
    state: &AppState,
    include_unavailable: bool,
) -> AppResult<ApiResponse<MenuList>> {
    let items = state.catalog.list_menu(include_unavailable).await?;
    Ok(ApiResponse::success(
        "Menu",
        MenuList { items },
        Some(Meta::empty()),
    ))
}

pub async fn get_menu_item(state: &AppState, id: &str) -> AppResult<ApiResponse<MenuItem>> {
    let item = match state.catalog.get_menu_item(id).await? {
        Some(item) => item,
        None => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success("Menu item", item, None))
}

pub async fn create_menu_item(
    state: &AppState,
    payload: CreateMenuItemRequest,
) -> AppResult<ApiResponse<MenuItem>> {
    validate_fields(&payload.name, payload.price, &payload.category)?;
    let item = MenuItem {
        id: Uuid::new_v4().simple().to_string(),
        name: payload.name.trim().to_string(),
        description: payload.description,
        price: payload.price,
        category: payload.category.trim().to_string(),
        image: payload.image,
        available: payload.available,
        ingredients: payload.ingredients,
        allergens: payload.allergens,
    };
    state.catalog.insert_menu_item(&item).await?;
    tracing::info!(menu_item_id = %item.id, name = %item.name, "menu item created");

    Ok(ApiResponse::success(
        "Menu item created",
        item,
        Some(Meta::empty()),
    ))
}

/// Partial update; toggling `available` is how an item is taken off the menu.
pub async fn update_menu_item(
    state: &AppState,
    id: &str,
    payload: UpdateMenuItemRequest,
) -> AppResult<ApiResponse<MenuItem>> {
    let mut item = match state.catalog.get_menu_item(id).await? {
        Some(item) => item,
        None => return Err(AppError::NotFound),
    };

    if let Some(name) = payload.name {
        item.name = name.trim().to_string();
    }
    if let Some(description) = payload.description {
        item.description = description;
    }
    if let Some(price) = payload.price {
        item.price = price;
    }
    if let Some(category) = payload.category {
        item.category = category.trim().to_string();
    }
    if let Some(image) = payload.image {
        item.image = image;
    }
    if let Some(available) = payload.available {
        item.available = available;
    }
    if let Some(ingredients) = payload.ingredients {
        item.ingredients = Some(ingredients);
    }
    if let Some(allergens) = payload.allergens {
        item.allergens = allergens;
    }
    validate_fields(&item.name, item.price, &item.category)?;

    if !state.catalog.update_menu_item(&item).await? {
        return Err(AppError::NotFound);
    }
    Ok(ApiResponse::success("Updated", item, Some(Meta::empty())))
}

pub async fn delete_menu_item(
    state: &AppState,
    id: &str,
) -> AppResult<ApiResponse<serde_json::Value>> {
    if !state.catalog.delete_menu_item(id).await? {
        return Err(AppError::NotFound);
    }
    tracing::info!(menu_item_id = %id, "menu item deleted");
    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

fn validate_fields(name: &str, price: f64, category: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::BadRequest("name is required".into()));
    }
    if category.trim().is_empty() {
        return Err(AppError::BadRequest("category is required".into()));
    }
    if !price.is_finite() || price < 0.0 {
        return Err(AppError::BadRequest("price must be zero or more".into()));
    }
    Ok(())
}
