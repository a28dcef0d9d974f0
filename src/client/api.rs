//! HTTP client for the order API, as used by the table tablet and the kitchen screen.

use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::{
    client::cart::Cart,
    dto::orders::{CreateOrderRequest, OrderList, StatusUpdated, UpdateOrderStatusRequest},
    models::{Order, OrderStatus},
    response::ApiResponse,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server answered {status}: {message}")]
    Api { status: StatusCode, message: String },

    #[error("server answered without data")]
    MissingData,

    #[error("cart is empty")]
    EmptyCart,
}

#[derive(Debug, Clone)]
pub struct OrderApi {
    http: reqwest::Client,
    base_url: String,
}

impl OrderApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub async fn submit_order(&self, order: &CreateOrderRequest) -> Result<Order, ClientError> {
        let resp = self
            .http
            .post(format!("{}/api/orders", self.base_url))
            .json(order)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;
        read_data(resp).await
    }

    /// Active orders, newest first, optionally narrowed to one status.
    pub async fn list_orders(&self, status: Option<OrderStatus>) -> Result<Vec<Order>, ClientError> {
        let mut req = self.http.get(format!("{}/api/orders", self.base_url));
        if let Some(status) = status {
            req = req.query(&[("status", status.as_str())]);
        }
        let resp = req.timeout(REQUEST_TIMEOUT).send().await?;
        let list: OrderList = read_data(resp).await?;
        Ok(list.items)
    }

    pub async fn update_status(
        &self,
        order_id: &str,
        status: OrderStatus,
    ) -> Result<Order, ClientError> {
        let body = UpdateOrderStatusRequest {
            order_id: order_id.to_string(),
            status,
        };
        let resp = self
            .http
            .put(format!("{}/api/orders", self.base_url))
            .json(&body)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;
        let updated: StatusUpdated = read_data(resp).await?;
        Ok(updated.order)
    }

    /// Submit the cart for `table_number`. The cart is emptied only once the
    /// server has acknowledged the order; on any failure it is left as it was.
    pub async fn checkout(
        &self,
        cart: &mut Cart,
        table_number: u32,
        customer_notes: Option<String>,
    ) -> Result<Order, ClientError> {
        if cart.is_empty() {
            return Err(ClientError::EmptyCart);
        }
        let request = cart.to_request(table_number, customer_notes);
        match self.submit_order(&request).await {
            Ok(order) => {
                cart.clear();
                tracing::info!(order_id = %order.id, table = table_number, "order submitted");
                Ok(order)
            }
            Err(err) => {
                tracing::warn!(table = table_number, error = %err, "order submission failed, cart kept");
                Err(err)
            }
        }
    }
}

async fn read_data<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
    let status = resp.status();
    if !status.is_success() {
        let message = match resp.json::<ApiResponse<serde_json::Value>>().await {
            Ok(body) => body.message,
            Err(_) => status.canonical_reason().unwrap_or("error").to_string(),
        };
        return Err(ClientError::Api { status, message });
    }
    let body: ApiResponse<T> = resp.json().await?;
    body.data.ok_or(ClientError::MissingData)
}
