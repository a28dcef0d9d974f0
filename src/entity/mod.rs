pub mod menu_items;
pub mod orders;
pub mod restaurant_config;
pub mod restaurant_tables;

pub use menu_items::Entity as MenuItems;
pub use orders::Entity as Orders;
pub use restaurant_config::Entity as RestaurantConfigs;
pub use restaurant_tables::Entity as RestaurantTables;
