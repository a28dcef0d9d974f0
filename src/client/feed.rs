//! Live view of the active orders for kitchen and table screens.
//!
//! Two interchangeable transports produce the same [`FeedUpdate`]s:
//! [`PollingFeed`] re-reads the order list over HTTP and diffs it, while
//! [`HubFeed`] listens to the in-process broadcast hub.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::broadcast;
use tokio::time::{Interval, MissedTickBehavior};

use crate::{
    client::api::OrderApi,
    models::{Order, OrderStatus},
    realtime::{events::ServerEvent, hub::OrderHub},
    state::AppState,
    store::OrderStore,
};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// `ORDER_POLL_INTERVAL_MS`, or [`DEFAULT_POLL_INTERVAL`] when unset or invalid.
pub fn poll_interval_from_env() -> Duration {
    parse_poll_interval(std::env::var("ORDER_POLL_INTERVAL_MS").ok().as_deref())
}

fn parse_poll_interval(raw: Option<&str>) -> Duration {
    raw.and_then(|ms| ms.trim().parse::<u64>().ok())
        .filter(|ms| *ms > 0)
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_POLL_INTERVAL)
}

#[derive(Debug, Clone, PartialEq)]
pub enum FeedUpdate {
    /// Replace everything held locally.
    Snapshot(Vec<Order>),
    Created(Order),
    StatusChanged { order_id: String, status: OrderStatus },
    /// The order left the active set.
    Removed { order_id: String },
}

impl FeedUpdate {
    pub fn from_event(event: &ServerEvent) -> Option<Self> {
        match event {
            ServerEvent::OrdersHistory(orders) => Some(FeedUpdate::Snapshot(orders.clone())),
            ServerEvent::NewOrder(order) => Some(FeedUpdate::Created(order.clone())),
            ServerEvent::OrderStatusUpdate {
                order_id, status, ..
            } => Some(FeedUpdate::StatusChanged {
                order_id: order_id.clone(),
                status: *status,
            }),
            ServerEvent::OrderReady { .. } | ServerEvent::OrderError { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connected,
    Disconnected,
}

/// Changes that turn `previous` into `current`.
///
/// New orders come out oldest first. Only the latest status of an order is
/// visible, so intermediate steps between two polls are not reported.
pub fn diff(previous: &[Order], current: &[Order]) -> Vec<FeedUpdate> {
    let before: HashMap<&str, OrderStatus> = previous
        .iter()
        .map(|order| (order.id.as_str(), order.status))
        .collect();
    let after: HashMap<&str, OrderStatus> = current
        .iter()
        .map(|order| (order.id.as_str(), order.status))
        .collect();

    let mut updates = Vec::new();
    for order in current.iter().rev() {
        match before.get(order.id.as_str()) {
            None => updates.push(FeedUpdate::Created(order.clone())),
            Some(status) if *status != order.status => updates.push(FeedUpdate::StatusChanged {
                order_id: order.id.clone(),
                status: order.status,
            }),
            Some(_) => {}
        }
    }
    for order in previous {
        if !after.contains_key(order.id.as_str()) {
            updates.push(FeedUpdate::Removed {
                order_id: order.id.clone(),
            });
        }
    }
    updates
}

/// Client-side copy of the active orders, newest first.
#[derive(Debug, Clone, Default)]
pub struct LocalOrders {
    orders: Vec<Order>,
}

impl LocalOrders {
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn get(&self, order_id: &str) -> Option<&Order> {
        self.orders.iter().find(|order| order.id == order_id)
    }

    pub fn by_status(&self, status: OrderStatus) -> impl Iterator<Item = &Order> {
        self.orders.iter().filter(move |order| order.status == status)
    }

    pub fn apply(&mut self, update: FeedUpdate) {
        match update {
            FeedUpdate::Snapshot(orders) => self.orders = orders,
            FeedUpdate::Created(order) => {
                if self.get(&order.id).is_none() {
                    self.orders.insert(0, order);
                }
            }
            FeedUpdate::StatusChanged { order_id, status } => {
                if status == OrderStatus::Delivered {
                    self.orders.retain(|order| order.id != order_id);
                } else if let Some(order) = self.orders.iter_mut().find(|o| o.id == order_id) {
                    // Statuses only move forward; an older update arriving late is stale.
                    if status.rank() >= order.status.rank() {
                        order.status = status;
                    }
                }
            }
            FeedUpdate::Removed { order_id } => self.orders.retain(|order| order.id != order_id),
        }
    }
}

#[async_trait]
pub trait OrderFeed: Send {
    /// Wait for the next change. `None` means the feed has ended for good.
    async fn next_update(&mut self) -> Option<FeedUpdate>;

    fn connection_state(&self) -> ConnectionState;
}

/// Re-reads the active orders on a fixed interval.
pub struct PollingFeed {
    api: OrderApi,
    interval: Interval,
    previous: Vec<Order>,
    pending: VecDeque<FeedUpdate>,
    state: ConnectionState,
}

impl PollingFeed {
    pub fn new(api: OrderApi, every: Duration) -> Self {
        let mut interval = tokio::time::interval(every);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self {
            api,
            interval,
            previous: Vec::new(),
            pending: VecDeque::new(),
            state: ConnectionState::Disconnected,
        }
    }

    pub fn from_env(api: OrderApi) -> Self {
        Self::new(api, poll_interval_from_env())
    }

    async fn poll(&mut self) {
        match self.api.list_orders(None).await {
            Ok(current) => {
                if self.state == ConnectionState::Disconnected {
                    tracing::debug!(orders = current.len(), "order feed connected");
                    self.pending.push_back(FeedUpdate::Snapshot(current.clone()));
                } else {
                    self.pending.extend(diff(&self.previous, &current));
                }
                self.state = ConnectionState::Connected;
                self.previous = current;
            }
            Err(err) => {
                if self.state == ConnectionState::Connected {
                    tracing::warn!(error = %err, "order feed lost connection");
                }
                self.state = ConnectionState::Disconnected;
            }
        }
    }
}

#[async_trait]
impl OrderFeed for PollingFeed {
    async fn next_update(&mut self) -> Option<FeedUpdate> {
        loop {
            if let Some(update) = self.pending.pop_front() {
                return Some(update);
            }
            self.interval.tick().await;
            self.poll().await;
        }
    }

    fn connection_state(&self) -> ConnectionState {
        self.state
    }
}

/// Pushes hub events from the same process, starting with a snapshot.
pub struct HubFeed {
    orders: Arc<OrderStore>,
    hub: OrderHub,
    rx: broadcast::Receiver<ServerEvent>,
    pending: VecDeque<FeedUpdate>,
    state: ConnectionState,
}

impl HubFeed {
    pub async fn connect(state: &AppState) -> Self {
        // Subscribe first so nothing between the snapshot and the first event is lost.
        let rx = state.hub.subscribe();
        let snapshot = state.orders.snapshot().await;
        Self {
            orders: state.orders.clone(),
            hub: state.hub.clone(),
            rx,
            pending: VecDeque::from([FeedUpdate::Snapshot(snapshot)]),
            state: ConnectionState::Connected,
        }
    }
}

#[async_trait]
impl OrderFeed for HubFeed {
    async fn next_update(&mut self) -> Option<FeedUpdate> {
        loop {
            if let Some(update) = self.pending.pop_front() {
                return Some(update);
            }
            if self.state == ConnectionState::Disconnected {
                return None;
            }
            match self.rx.recv().await {
                Ok(event) => {
                    if let Some(update) = FeedUpdate::from_event(&event) {
                        return Some(update);
                    }
                }
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    tracing::warn!(missed, "order feed lagged, resyncing");
                    self.rx = self.hub.subscribe();
                    let snapshot = self.orders.snapshot().await;
                    return Some(FeedUpdate::Snapshot(snapshot));
                }
                Err(broadcast::error::RecvError::Closed) => {
                    self.state = ConnectionState::Disconnected;
                }
            }
        }
    }

    fn connection_state(&self) -> ConnectionState {
        self.state
    }
}
