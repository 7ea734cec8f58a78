//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::ConnectionId,
    infrastructure::dto::{DecodeError, decode_action},
    ui::state::AppState,
    usecase::{GatewayError, SessionGateway},
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// This function handles the outbound message flow: snapshots queued by the hub
/// (via rx channel) are sent to this client's WebSocket connection in order.
///
/// # Arguments
///
/// * `rx` - Channel receiver fed by the hub
/// * `sender` - WebSocket sink to send messages to this client
///
/// # Returns
///
/// A `JoinHandle` for the spawned task
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

/// Decode one frame at the connection boundary and hand it to the hub.
///
/// Malformed frames and invalid payloads are logged and dropped; only a
/// stopped hub is reported back to the caller.
fn submit_frame(
    gateway: &dyn SessionGateway,
    id: ConnectionId,
    raw: &str,
) -> Result<(), GatewayError> {
    match decode_action(raw) {
        Ok(action) => gateway.submit(id, action),
        Err(DecodeError::Malformed(e)) => {
            tracing::warn!("Error parsing message from '{}': {}", id, e);
            Ok(())
        }
        Err(e @ DecodeError::InvalidPayload { .. }) => {
            tracing::warn!("Dropping message from '{}': {}", id, e);
            Ok(())
        }
    }
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (sender, mut receiver) = socket.split();

    // The hub queues the current snapshot on tx before connect returns,
    // so it is the first frame this client receives.
    let (tx, rx) = mpsc::unbounded_channel();
    let id = match state.gateway.connect(tx).await {
        Ok(id) => id,
        Err(e) => {
            tracing::error!("Failed to register connection: {}", e);
            return;
        }
    };

    let mut send_task = pusher_loop(rx, sender);

    let gateway = state.gateway.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error on '{}': {}", id, e);
                    break;
                }
            };

            let result = match msg {
                Message::Text(text) => submit_frame(gateway.as_ref(), id, text.as_str()),
                Message::Binary(data) => match std::str::from_utf8(&data) {
                    Ok(text) => submit_frame(gateway.as_ref(), id, text),
                    Err(_) => {
                        tracing::warn!("Ignoring non UTF-8 binary frame from '{}'", id);
                        Ok(())
                    }
                },
                Message::Ping(_) => {
                    // Ping/pong is handled automatically by the WebSocket protocol
                    tracing::debug!("Received ping from '{}'", id);
                    Ok(())
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", id);
                    break;
                }
                _ => Ok(()),
            };

            if let Err(e) = result {
                tracing::error!("Stopping connection '{}': {}", id, e);
                break;
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    if let Err(e) = state.gateway.disconnect(id) {
        tracing::warn!("Failed to unregister connection '{}': {}", id, e);
    }
}
