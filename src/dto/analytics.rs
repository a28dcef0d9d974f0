use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct AnalyticsQuery {
    pub days: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PopularItem {
    pub name: String,
    pub count: u64,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HourlyBucket {
    pub hour: u32,
    pub orders: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyRevenue {
    pub date: String,
    pub revenue: f64,
    pub orders: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub days: i64,
    pub total_orders: u64,
    pub total_revenue: f64,
    pub average_order_value: f64,
    /// Minutes from placement to delivery; `None` with no delivered orders.
    pub average_preparation_minutes: Option<f64>,
    pub popular_items: Vec<PopularItem>,
    pub hourly_distribution: Vec<HourlyBucket>,
    pub daily_revenue: Vec<DailyRevenue>,
}
