//! `WebSocket` handlers for live status-change streams.
//!
//! Clients connect to `GET /ws/lifts` or `GET /ws/trails` and receive one
//! JSON text frame per changed entity, carrying its post-change state.
//! Only changes made after the connection is established are delivered.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::StreamExt;
use serde::Serialize;
use snowtooth_core::{Entity, StatusStream};
use snowtooth_types::{Lift, Trail};
use tracing::{debug, warn};

use crate::state::AppState;

/// Stream lift status changes.
///
/// # Route
///
/// `GET /ws/lifts`
pub async fn ws_lifts(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let stream = state.resort.subscribe::<Lift>();
    ws.on_upgrade(move |socket| handle_ws(socket, stream))
}

/// Stream trail status changes.
///
/// # Route
///
/// `GET /ws/trails`
pub async fn ws_trails(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let stream = state.resort.subscribe::<Trail>();
    ws.on_upgrade(move |socket| handle_ws(socket, stream))
}

/// Forward each changed entity as a text frame until either side closes.
///
/// Dropping `stream` on return unregisters the subscription.
async fn handle_ws<E>(mut socket: WebSocket, mut stream: StatusStream<E>)
where
    E: Entity + Serialize,
{
    debug!(kind = %E::KIND, "WebSocket client connected");

    loop {
        tokio::select! {
            changed = stream.next() => {
                let Some(entity) = changed else {
                    debug!("Status stream closed, shutting down WebSocket");
                    return;
                };
                let json = match serde_json::to_string(&entity) {
                    Ok(j) => j,
                    Err(e) => {
                        warn!(id = %entity.id(), "Failed to serialize status change: {e}");
                        continue;
                    }
                };
                if socket.send(Message::Text(json.into())).await.is_err() {
                    debug!("WebSocket client disconnected (send failed)");
                    return;
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => {
                        debug!("WebSocket client disconnected");
                        return;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            debug!("WebSocket client disconnected (pong failed)");
                            return;
                        }
                    }
                    Some(Err(e)) => {
                        debug!("WebSocket error: {e}");
                        return;
                    }
                    _ => {}
                }
            }
        }
    }
}
