//! Realtime channel endpoint.
//!
//! GET /ws (WebSocket upgrade)
//!
//! - Server → client: `ordersHistory` on connect, then `newOrder`,
//!   `orderStatusUpdate`, `orderReady` (joined table only) and `orderError`
//!   (replies to this client's own failed commands).
//! - Client → server: `placeOrder` / `submitOrder`, `updateOrderStatus`, `joinTable`.

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use tokio::sync::broadcast;
use tokio::time::Duration;
use uuid::Uuid;

use crate::{
    error::AppError,
    realtime::{
        events::{ClientEvent, ServerEvent},
        hub::should_deliver,
    },
    services::order_service,
    state::AppState,
};

const PING_INTERVAL: Duration = Duration::from_secs(30);

/// Per-connection state.
#[derive(Debug, Default)]
pub struct Session {
    /// Table whose `orderReady` notices this connection receives.
    pub joined_table: Option<u32>,
}

pub async fn ws_handler(State(state): State<AppState>, ws: WebSocketUpgrade) -> impl IntoResponse {
    ws.on_upgrade(move |socket| run_session(socket, state))
}

async fn run_session(socket: WebSocket, state: AppState) {
    let (mut sink, mut stream) = socket.split();
    let session_id = Uuid::new_v4().simple().to_string();
    let mut session = Session::default();

    // Subscribe before taking the snapshot so no event falls between the two.
    let mut hub_rx = state.hub.subscribe();
    tracing::info!(session = %session_id, clients = state.hub.subscriber_count(), "realtime client connected");

    if send_event(&mut sink, &snapshot_event(&state).await).await.is_err() {
        return;
    }

    let mut ping_interval = tokio::time::interval(PING_INTERVAL);
    ping_interval.tick().await; // first tick fires immediately

    loop {
        tokio::select! {
            _ = state.shutdown.cancelled() => {
                let _ = sink.send(Message::Close(None)).await;
                break;
            }

            _ = ping_interval.tick() => {
                if sink.send(Message::Ping(Vec::new().into())).await.is_err() {
                    break;
                }
            }

            event = hub_rx.recv() => {
                match event {
                    Ok(event) => {
                        if should_deliver(&event, session.joined_table)
                            && send_event(&mut sink, &event).await.is_err()
                        {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(missed)) => {
                        tracing::warn!(session = %session_id, missed, "realtime client lagged, resending snapshot");
                        hub_rx = state.hub.subscribe();
                        if send_event(&mut sink, &snapshot_event(&state).await).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }

            msg = stream.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let reply = match serde_json::from_str::<ClientEvent>(text.as_str()) {
                            Ok(event) => handle_client_event(&state, &mut session, event).await,
                            Err(err) => Some(ServerEvent::OrderError {
                                message: format!("Bad Request {err}"),
                            }),
                        };
                        if let Some(reply) = reply
                            && send_event(&mut sink, &reply).await.is_err()
                        {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(_)) => break,
                    _ => {}
                }
            }
        }
    }

    tracing::info!(session = %session_id, "realtime client disconnected");
}

/// The active-order snapshot a client receives when it (re)connects.
pub async fn snapshot_event(state: &AppState) -> ServerEvent {
    ServerEvent::OrdersHistory(state.orders.snapshot().await)
}

/// Run one client command. Successful commands are answered through the
/// broadcast; only failures produce a direct reply.
pub async fn handle_client_event(
    state: &AppState,
    session: &mut Session,
    event: ClientEvent,
) -> Option<ServerEvent> {
    let result = match event {
        ClientEvent::PlaceOrder(payload) => order_service::place_order(state, payload)
            .await
            .map(|_| ()),
        ClientEvent::UpdateOrderStatus(payload) => {
            order_service::update_order_status(state, payload)
                .await
                .map(|_| ())
        }
        ClientEvent::JoinTable { table_number } => {
            session.joined_table = Some(table_number);
            Ok(())
        }
    };
    result.err().map(error_event)
}

fn error_event(err: AppError) -> ServerEvent {
    tracing::debug!(error = %err, "realtime command failed");
    ServerEvent::OrderError {
        message: err.to_string(),
    }
}

async fn send_event<S>(sink: &mut S, event: &ServerEvent) -> Result<(), ()>
where
    S: futures::Sink<Message, Error = axum::Error> + Unpin,
{
    let json = serde_json::to_string(event).map_err(|_| ())?;
    sink.send(Message::Text(json.into())).await.map_err(|_| ())
}
