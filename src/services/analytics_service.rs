use std::collections::HashMap;

use chrono::{DateTime, Duration, NaiveTime, TimeZone, Timelike, Utc};

use crate::{
    dto::analytics::{AnalyticsQuery, AnalyticsReport, DailyRevenue, HourlyBucket, PopularItem},
    error::AppResult,
    models::{Order, OrderStatus, round_cents},
    response::{ApiResponse, Meta},
    state::AppState,
};

const DEFAULT_DAYS: i64 = 7;
const MAX_DAYS: i64 = 365;
const POPULAR_ITEMS: usize = 5;

pub async fn analytics(
    state: &AppState,
    query: AnalyticsQuery,
) -> AppResult<ApiResponse<AnalyticsReport>> {
    let days = query.days.unwrap_or(DEFAULT_DAYS).clamp(1, MAX_DAYS);
    let now = Utc::now();
    let delivered = state.orders.delivered_since(window_start(now, days)).await?;
    let report = summarize(&delivered, now, days);
    Ok(ApiResponse::success("Analytics", report, Some(Meta::empty())))
}

/// Midnight (UTC) `days` days before `now`.
pub fn window_start(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    let day = (now - Duration::days(days)).date_naive();
    Utc.from_utc_datetime(&day.and_time(NaiveTime::MIN))
}

/// Aggregate delivered orders placed inside the trailing window.
pub fn summarize(orders: &[Order], now: DateTime<Utc>, days: i64) -> AnalyticsReport {
    let start = window_start(now, days);
    let delivered: Vec<&Order> = orders
        .iter()
        .filter(|o| o.status == OrderStatus::Delivered && o.timestamp >= start && o.timestamp <= now)
        .collect();

    let total_orders = delivered.len() as u64;
    let total_revenue = round_cents(delivered.iter().map(|o| o.total).sum());
    let average_order_value = if total_orders > 0 {
        round_cents(total_revenue / total_orders as f64)
    } else {
        0.0
    };

    let average_preparation_minutes = (!delivered.is_empty()).then(|| {
        let minutes: f64 = delivered
            .iter()
            .map(|o| (o.updated_at - o.timestamp).num_seconds() as f64 / 60.0)
            .sum();
        round_cents(minutes / delivered.len() as f64)
    });

    let mut per_item: HashMap<&str, (u64, f64)> = HashMap::new();
    for order in &delivered {
        for item in &order.items {
            let entry = per_item.entry(item.name.as_str()).or_default();
            entry.0 += u64::from(item.quantity);
            entry.1 += item.subtotal();
        }
    }
    let mut popular_items: Vec<PopularItem> = per_item
        .into_iter()
        .map(|(name, (count, revenue))| PopularItem {
            name: name.to_string(),
            count,
            revenue: round_cents(revenue),
        })
        .collect();
    popular_items.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    popular_items.truncate(POPULAR_ITEMS);

    let mut hourly = [0u64; 24];
    for order in &delivered {
        hourly[order.timestamp.hour() as usize] += 1;
    }
    let hourly_distribution = hourly
        .iter()
        .enumerate()
        .map(|(hour, &orders)| HourlyBucket {
            hour: hour as u32,
            orders,
        })
        .collect();

    let daily_revenue = (0..days)
        .map(|i| {
            let day = (now - Duration::days(days - 1 - i)).date_naive();
            let day_orders: Vec<&&Order> = delivered
                .iter()
                .filter(|o| o.timestamp.date_naive() == day)
                .collect();
            DailyRevenue {
                date: day.format("%Y-%m-%d").to_string(),
                revenue: round_cents(day_orders.iter().map(|o| o.total).sum()),
                orders: day_orders.len() as u64,
            }
        })
        .collect();

    AnalyticsReport {
        days,
        total_orders,
        total_revenue,
        average_order_value,
        average_preparation_minutes,
        popular_items,
        hourly_distribution,
        daily_revenue,
    }
}
