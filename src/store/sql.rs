use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set, SqlErr, sea_query::Expr,
};

use crate::{
    entity::{
        menu_items::{
            ActiveModel as MenuItemActive, Column as MenuCol, Entity as MenuItems,
            Model as MenuItemModel,
        },
        orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, Model as OrderModel},
        restaurant_config::{ActiveModel as ConfigActive, Entity as RestaurantConfigs, Model as ConfigModel},
        restaurant_tables::{
            ActiveModel as TableActive, Column as TableCol, Entity as RestaurantTables,
            Model as TableModel,
        },
    },
    error::{AppError, AppResult},
    models::{MenuItem, Order, OrderStatus, RestaurantConfig, Table},
    store::seed,
};

const CONFIG_ROW_ID: i32 = 1;

pub async fn insert_order(db: &DatabaseConnection, order: &Order) -> AppResult<()> {
    let active = OrderActive {
        id: Set(order.id.clone()),
        table_number: Set(to_i32(order.table_number)?),
        items_json: Set(serde_json::to_string(&order.items).map_err(anyhow::Error::from)?),
        total: Set(order.total),
        status: Set(order.status.as_str().to_string()),
        customer_notes: Set(order.customer_notes.clone()),
        created_at: Set(order.timestamp),
        updated_at: Set(order.updated_at),
    };
    Orders::insert(active).exec_without_returning(db).await?;
    Ok(())
}

pub async fn update_order_status(
    db: &DatabaseConnection,
    id: &str,
    status: OrderStatus,
    updated_at: DateTime<Utc>,
) -> AppResult<bool> {
    let result = Orders::update_many()
        .col_expr(OrderCol::Status, Expr::value(status.as_str()))
        .col_expr(OrderCol::UpdatedAt, Expr::value(updated_at))
        .filter(OrderCol::Id.eq(id))
        .exec(db)
        .await?;
    Ok(result.rows_affected > 0)
}

pub async fn active_orders(db: &DatabaseConnection) -> AppResult<Vec<Order>> {
    Orders::find()
        .filter(OrderCol::Status.ne(OrderStatus::Delivered.as_str()))
        .order_by_desc(OrderCol::CreatedAt)
        .all(db)
        .await?
        .into_iter()
        .map(order_from_entity)
        .collect()
}

pub async fn delivered_orders_since(
    db: &DatabaseConnection,
    cutoff: DateTime<Utc>,
) -> AppResult<Vec<Order>> {
    Orders::find()
        .filter(OrderCol::Status.eq(OrderStatus::Delivered.as_str()))
        .filter(OrderCol::CreatedAt.gte(cutoff))
        .order_by_asc(OrderCol::CreatedAt)
        .all(db)
        .await?
        .into_iter()
        .map(order_from_entity)
        .collect()
}

pub async fn list_menu(db: &DatabaseConnection, include_unavailable: bool) -> AppResult<Vec<MenuItem>> {
    let mut finder = MenuItems::find();
    if !include_unavailable {
        finder = finder.filter(MenuCol::Available.eq(true));
    }
    finder
        .order_by_asc(MenuCol::Category)
        .order_by_asc(MenuCol::Name)
        .all(db)
        .await?
        .into_iter()
        .map(menu_item_from_entity)
        .collect()
}

pub async fn get_menu_item(db: &DatabaseConnection, id: &str) -> AppResult<Option<MenuItem>> {
    MenuItems::find_by_id(id.to_owned())
        .one(db)
        .await?
        .map(menu_item_from_entity)
        .transpose()
}

pub async fn insert_menu_item(db: &DatabaseConnection, item: &MenuItem) -> AppResult<()> {
    MenuItems::insert(menu_item_to_active(item)?)
        .exec_without_returning(db)
        .await?;
    Ok(())
}

pub async fn update_menu_item(db: &DatabaseConnection, item: &MenuItem) -> AppResult<bool> {
    if MenuItems::find_by_id(item.id.clone()).one(db).await?.is_none() {
        return Ok(false);
    }
    menu_item_to_active(item)?.update(db).await?;
    Ok(true)
}

pub async fn delete_menu_item(db: &DatabaseConnection, id: &str) -> AppResult<bool> {
    let result = MenuItems::delete_by_id(id.to_owned()).exec(db).await?;
    Ok(result.rows_affected > 0)
}

pub async fn list_tables(db: &DatabaseConnection) -> AppResult<Vec<Table>> {
    RestaurantTables::find()
        .order_by_asc(TableCol::Number)
        .all(db)
        .await?
        .into_iter()
        .map(table_from_entity)
        .collect()
}

pub async fn get_table(db: &DatabaseConnection, id: &str) -> AppResult<Option<Table>> {
    RestaurantTables::find_by_id(id.to_owned())
        .one(db)
        .await?
        .map(table_from_entity)
        .transpose()
}

pub async fn find_table_by_number(db: &DatabaseConnection, number: u32) -> AppResult<Option<Table>> {
    RestaurantTables::find()
        .filter(TableCol::Number.eq(to_i32(number)?))
        .one(db)
        .await?
        .map(table_from_entity)
        .transpose()
}

pub async fn insert_table(db: &DatabaseConnection, table: &Table) -> AppResult<()> {
    RestaurantTables::insert(table_to_active(table)?)
        .exec_without_returning(db)
        .await
        .map_err(|err| table_number_taken(err, table.number))?;
    Ok(())
}

pub async fn update_table(db: &DatabaseConnection, table: &Table) -> AppResult<bool> {
    if RestaurantTables::find_by_id(table.id.clone()).one(db).await?.is_none() {
        return Ok(false);
    }
    table_to_active(table)?
        .update(db)
        .await
        .map_err(|err| table_number_taken(err, table.number))?;
    Ok(true)
}

/// Another connection claimed the number between our check and the write.
fn table_number_taken(err: DbErr, number: u32) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::Conflict(format!("table number {number} already exists"))
        }
        _ => AppError::OrmError(err),
    }
}

pub async fn delete_table(db: &DatabaseConnection, id: &str) -> AppResult<bool> {
    let result = RestaurantTables::delete_by_id(id.to_owned()).exec(db).await?;
    Ok(result.rows_affected > 0)
}

/// The stored configuration, or the defaults when the row was never written.
pub async fn config(db: &DatabaseConnection) -> AppResult<RestaurantConfig> {
    let row = RestaurantConfigs::find_by_id(CONFIG_ROW_ID).one(db).await?;
    Ok(row.map(config_from_entity).unwrap_or_else(seed::default_config))
}

pub async fn save_config(db: &DatabaseConnection, config: &RestaurantConfig) -> AppResult<()> {
    let exists = RestaurantConfigs::find_by_id(CONFIG_ROW_ID).one(db).await?.is_some();
    let active = ConfigActive {
        id: Set(CONFIG_ROW_ID),
        name: Set(config.name.clone()),
        logo: Set(config.logo.clone()),
        primary_color: Set(config.primary_color.clone()),
        secondary_color: Set(config.secondary_color.clone()),
        currency: Set(config.currency.clone()),
        language: Set(config.language.clone()),
        phone: Set(config.phone.clone()),
        address: Set(config.address.clone()),
        email: Set(config.email.clone()),
        updated_at: Set(Utc::now()),
    };
    if exists {
        active.update(db).await?;
    } else {
        RestaurantConfigs::insert(active)
            .exec_without_returning(db)
            .await?;
    }
    Ok(())
}

fn to_i32(value: u32) -> AppResult<i32> {
    Ok(i32::try_from(value).map_err(anyhow::Error::from)?)
}

fn to_u32(value: i32) -> AppResult<u32> {
    Ok(u32::try_from(value).map_err(anyhow::Error::from)?)
}

fn order_from_entity(model: OrderModel) -> AppResult<Order> {
    Ok(Order {
        items: serde_json::from_str(&model.items_json).map_err(anyhow::Error::from)?,
        status: model.status.parse().map_err(anyhow::Error::msg)?,
        table_number: to_u32(model.table_number)?,
        id: model.id,
        total: model.total,
        timestamp: model.created_at,
        updated_at: model.updated_at,
        customer_notes: model.customer_notes,
    })
}

fn menu_item_from_entity(model: MenuItemModel) -> AppResult<MenuItem> {
    let ingredients = model
        .ingredients
        .as_deref()
        .map(serde_json::from_str::<Vec<String>>)
        .transpose()
        .map_err(anyhow::Error::from)?;
    Ok(MenuItem {
        allergens: serde_json::from_str(&model.allergens).map_err(anyhow::Error::from)?,
        ingredients,
        id: model.id,
        name: model.name,
        description: model.description,
        price: model.price,
        category: model.category,
        image: model.image,
        available: model.available,
    })
}

fn menu_item_to_active(item: &MenuItem) -> AppResult<MenuItemActive> {
    let ingredients = item
        .ingredients
        .as_ref()
        .map(serde_json::to_string)
        .transpose()
        .map_err(anyhow::Error::from)?;
    Ok(MenuItemActive {
        id: Set(item.id.clone()),
        name: Set(item.name.clone()),
        description: Set(item.description.clone()),
        price: Set(item.price),
        category: Set(item.category.clone()),
        image: Set(item.image.clone()),
        available: Set(item.available),
        ingredients: Set(ingredients),
        allergens: Set(serde_json::to_string(&item.allergens).map_err(anyhow::Error::from)?),
    })
}

fn table_from_entity(model: TableModel) -> AppResult<Table> {
    Ok(Table {
        number: to_u32(model.number)?,
        capacity: to_u32(model.capacity)?,
        status: model.status.parse().map_err(anyhow::Error::msg)?,
        id: model.id,
        location: model.location,
        qr_code: model.qr_code,
        notes: model.notes,
    })
}

fn table_to_active(table: &Table) -> AppResult<TableActive> {
    Ok(TableActive {
        id: Set(table.id.clone()),
        number: Set(to_i32(table.number)?),
        capacity: Set(to_i32(table.capacity)?),
        location: Set(table.location.clone()),
        status: Set(table.status.as_str().to_string()),
        qr_code: Set(table.qr_code.clone()),
        notes: Set(table.notes.clone()),
    })
}

fn config_from_entity(model: ConfigModel) -> RestaurantConfig {
    RestaurantConfig {
        name: model.name,
        logo: model.logo,
        primary_color: model.primary_color,
        secondary_color: model.secondary_color,
        currency: model.currency,
        language: model.language,
        phone: model.phone,
        address: model.address,
        email: model.email,
    }
}
