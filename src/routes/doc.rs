use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        analytics::{AnalyticsReport, DailyRevenue, HourlyBucket, PopularItem},
        config::UpdateConfigRequest,
        menu::{CreateMenuItemRequest, MenuList, UpdateMenuItemRequest},
        orders::{CreateOrderRequest, OrderList, StatusUpdated, UpdateOrderStatusRequest},
        tables::{CreateTableRequest, TableList, UpdateTableRequest},
    },
    models::{MenuItem, Order, OrderItem, OrderStatus, RestaurantConfig, Table, TableStatus},
    response::{ApiResponse, Meta},
    routes::{analytics, config, health, menu, orders, tables},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        config::get_config,
        config::update_config,
        menu::list_menu,
        menu::get_menu_item,
        menu::create_menu_item,
        menu::update_menu_item,
        menu::delete_menu_item,
        orders::list_orders,
        orders::create_order,
        orders::update_order_status,
        orders::get_order,
        tables::list_tables,
        tables::create_table,
        tables::update_table,
        tables::delete_table,
        analytics::get_analytics
    ),
    components(
        schemas(
            Order,
            OrderItem,
            OrderStatus,
            MenuItem,
            Table,
            TableStatus,
            RestaurantConfig,
            CreateOrderRequest,
            UpdateOrderStatusRequest,
            StatusUpdated,
            OrderList,
            CreateMenuItemRequest,
            UpdateMenuItemRequest,
            MenuList,
            CreateTableRequest,
            UpdateTableRequest,
            TableList,
            UpdateConfigRequest,
            AnalyticsReport,
            PopularItem,
            HourlyBucket,
            DailyRevenue,
            health::HealthData,
            Meta,
            ApiResponse<Order>,
            ApiResponse<OrderList>,
            ApiResponse<StatusUpdated>,
            ApiResponse<MenuList>,
            ApiResponse<TableList>,
            ApiResponse<RestaurantConfig>,
            ApiResponse<AnalyticsReport>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Orders", description = "Order placement and kitchen workflow"),
        (name = "Menu", description = "Menu endpoints"),
        (name = "Tables", description = "Table endpoints"),
        (name = "Config", description = "Restaurant configuration"),
        (name = "Analytics", description = "Sales analytics"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_api_route_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/health",
            "/api/config",
            "/api/menu",
            "/api/menu/{id}",
            "/api/orders",
            "/api/orders/{id}",
            "/api/tables",
            "/api/tables/{id}",
            "/api/analytics",
        ] {
            assert!(doc.paths.paths.contains_key(path), "{path} missing");
        }
    }
}
