use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lifecycle of an order, from placement to hand-over at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Preparing,
    Ready,
    Delivered,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Delivered,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Delivered => "delivered",
        }
    }

    pub fn is_active(&self) -> bool {
        *self != OrderStatus::Delivered
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown order status `{s}`"))
    }
}

/// A line of an order as the customer submitted it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Menu item id, when the line came from the menu.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl OrderItem {
    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub table_number: u32,
    pub items: Vec<OrderItem>,
    pub total: f64,
    pub status: OrderStatus,
    pub timestamp: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_notes: Option<String>,
}

/// An order accepted for storage; identity, timestamps and status are assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub table_number: u32,
    pub items: Vec<OrderItem>,
    pub total: f64,
    pub customer_notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub image: String,
    pub available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<String>>,
    #[serde(default)]
    pub allergens: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TableStatus {
    Available,
    Occupied,
    Reserved,
    Maintenance,
}

impl TableStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableStatus::Available => "available",
            TableStatus::Occupied => "occupied",
            TableStatus::Reserved => "reserved",
            TableStatus::Maintenance => "maintenance",
        }
    }
}

impl std::str::FromStr for TableStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(TableStatus::Available),
            "occupied" => Ok(TableStatus::Occupied),
            "reserved" => Ok(TableStatus::Reserved),
            "maintenance" => Ok(TableStatus::Maintenance),
            other => Err(format!("unknown table status `{other}`")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub id: String,
    pub number: u32,
    pub capacity: u32,
    pub location: String,
    pub status: TableStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qr_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

// `/api/config` has always been served with snake_case keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RestaurantConfig {
    pub name: String,
    pub logo: Option<String>,
    pub primary_color: String,
    pub secondary_color: String,
    pub currency: String,
    pub language: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
}

pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

pub fn items_total(items: &[OrderItem]) -> f64 {
    round_cents(items.iter().map(OrderItem::subtotal).sum())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, price: f64, quantity: u32) -> OrderItem {
        OrderItem {
            id: None,
            name: name.into(),
            price,
            quantity,
            notes: None,
        }
    }

    #[test]
    fn total_is_rounded_to_cents() {
        let items = vec![item("Hamburguesa", 12.99, 1), item("Ensalada", 10.99, 1)];
        assert_eq!(items_total(&items), 23.98);
        assert_eq!(items_total(&[item("Pizza Margherita", 14.50, 2)]), 29.0);
    }

    #[test]
    fn status_parses_only_known_values() {
        assert_eq!("ready".parse::<OrderStatus>(), Ok(OrderStatus::Ready));
        assert!("cancelled".parse::<OrderStatus>().is_err());
        assert!(!OrderStatus::Delivered.is_active());
    }

    #[test]
    fn order_serializes_with_camel_case_keys() {
        let now = Utc::now();
        let order = Order {
            id: "abc".into(),
            table_number: 3,
            items: vec![item("Pizza Margherita", 14.5, 1)],
            total: 14.5,
            status: OrderStatus::Pending,
            timestamp: now,
            updated_at: now,
            customer_notes: None,
        };
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["tableNumber"], 3);
        assert_eq!(json["status"], "pending");
        assert!(json.get("customerNotes").is_none());
    }
}
