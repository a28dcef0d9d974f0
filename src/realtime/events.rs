//! Wire format of the realtime channel: `{"event": <name>, "data": <payload>}`.

use serde::{Deserialize, Serialize};

use crate::{
    dto::orders::{CreateOrderRequest, UpdateOrderStatusRequest},
    models::{Order, OrderStatus},
};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientEvent {
    #[serde(alias = "submitOrder")]
    PlaceOrder(CreateOrderRequest),
    UpdateOrderStatus(UpdateOrderStatusRequest),
    #[serde(rename_all = "camelCase")]
    JoinTable { table_number: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerEvent {
    /// Active-order snapshot, sent on connect and after a resync.
    OrdersHistory(Vec<Order>),
    NewOrder(Order),
    #[serde(rename_all = "camelCase")]
    OrderStatusUpdate {
        order_id: String,
        status: OrderStatus,
        table_number: u32,
    },
    #[serde(rename_all = "camelCase")]
    OrderReady { order_id: String, table_number: u32 },
    OrderError { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_order_is_accepted_as_place_order() {
        let raw = r#"{"event":"submitOrder","data":{"tableNumber":3,"items":[{"id":"2","name":"Pizza Margherita","price":14.5,"quantity":1}],"total":14.5}}"#;
        let event: ClientEvent = serde_json::from_str(raw).unwrap();
        match event {
            ClientEvent::PlaceOrder(payload) => {
                assert_eq!(payload.table_number, 3);
                assert_eq!(payload.items.len(), 1);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        let raw = r#"{"event":"updateOrderStatus","data":{"orderId":"x","status":"cancelled"}}"#;
        assert!(serde_json::from_str::<ClientEvent>(raw).is_err());
    }

    #[test]
    fn server_events_use_camel_case_names() {
        let event = ServerEvent::OrderStatusUpdate {
            order_id: "abc".into(),
            status: OrderStatus::Ready,
            table_number: 4,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "orderStatusUpdate");
        assert_eq!(json["data"]["orderId"], "abc");
        assert_eq!(json["data"]["status"], "ready");
    }
}
