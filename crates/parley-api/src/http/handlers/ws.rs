//! WebSocket handler for real-time conversation turns.
//!
//! The `/ws` endpoint upgrades an HTTP connection to a WebSocket. Once
//! connected, the handler:
//!
//! - **Receives turns:** Parses incoming text frames as [`ClientEvent`] and
//!   hands `sendMessageToAi` turns to the [`TurnEngine`] on a spawned task,
//!   so a slow generation never blocks the read loop.
//! - **Forwards events:** Every [`ServerEvent`] produced by running turns is
//!   pushed to the client as a JSON text frame through an unbounded channel.
//!
//! Malformed frames are logged and ignored; the connection stays open.
//! Multiple turns may be in flight at once and their `receive` /
//! `aiResponse` events interleave in completion order.

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use parley_core::turn::ChannelEmitter;
use parley_types::event::{ClientEvent, ServerEvent};

use crate::state::AppState;

/// Emitter that forwards turn events into the per-connection channel.
///
/// Sends are fire-and-forget: once the client disconnects the channel
/// closes and events are dropped, but the turn itself keeps running so
/// its messages still reach storage.
#[derive(Clone)]
struct WsEmitter {
    tx: mpsc::UnboundedSender<ServerEvent>,
}

impl ChannelEmitter for WsEmitter {
    async fn emit(&self, event: ServerEvent) {
        if self.tx.send(event).is_err() {
            tracing::debug!("Client disconnected, dropping turn event");
        }
    }
}

/// Upgrade an HTTP request to a WebSocket connection.
///
/// This is mounted at `/ws` in the router.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws_connection(socket, state))
}

/// Core WebSocket connection handler.
///
/// Uses `tokio::select!` to multiplex between events produced by running
/// turns and incoming WebSocket messages from the client. This keeps both
/// sender and receiver in a single task while spawned turns feed the
/// outbound channel concurrently.
async fn handle_ws_connection(socket: WebSocket, state: AppState) {
    let (mut ws_sender, mut ws_receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerEvent>();

    tracing::debug!("WebSocket connection opened");

    loop {
        tokio::select! {
            // --- Branch 1: Forward turn events to the WebSocket client ---
            Some(event) = rx.recv() => {
                match serde_json::to_string(&event) {
                    Ok(json) => {
                        if ws_sender.send(Message::Text(json.into())).await.is_err() {
                            // Client disconnected
                            break;
                        }
                    }
                    Err(err) => {
                        tracing::warn!("Failed to serialize ServerEvent: {err}");
                    }
                }
            }

            // --- Branch 2: Process frames from the WebSocket client ---
            msg_result = ws_receiver.next() => {
                match msg_result {
                    Some(Ok(Message::Text(text))) => {
                        process_frame(&text, &state, &tx);
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        // Client disconnected
                        break;
                    }
                    Some(Err(err)) => {
                        tracing::debug!("WebSocket receive error: {err}");
                        break;
                    }
                    // Ignore binary, ping, pong protocol frames (handled by axum/tungstenite)
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    tracing::debug!("WebSocket connection closed");
}

/// Parse a single inbound frame and dispatch it.
///
/// Turns are spawned so the read loop keeps servicing the connection
/// while generation is in flight.
fn process_frame(text: &str, state: &AppState, tx: &mpsc::UnboundedSender<ServerEvent>) {
    let event: ClientEvent = match serde_json::from_str(text) {
        Ok(event) => event,
        Err(err) => {
            tracing::warn!(
                raw = %text,
                error = %err,
                "Ignoring malformed WebSocket frame"
            );
            return;
        }
    };

    match event {
        ClientEvent::SendMessageToAi(turn) => {
            let engine = state.engine.clone();
            let emitter = WsEmitter { tx: tx.clone() };
            tokio::spawn(async move {
                engine.run_turn(turn, &emitter).await;
            });
        }
        ClientEvent::Ping => {
            if tx.send(ServerEvent::Pong).is_err() {
                tracing::debug!("Failed to queue pong (client disconnecting)");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_emit_delivers_to_open_channel() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let emitter = WsEmitter { tx };

        emitter.emit(ServerEvent::Pong).await;

        assert!(matches!(rx.recv().await, Some(ServerEvent::Pong)));
    }

    #[tokio::test]
    async fn test_emit_on_closed_channel_is_noop() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let emitter = WsEmitter { tx };

        // Fire-and-forget: the dropped receiver must not error or panic,
        // turns keep running after the client disconnects.
        emitter.emit(ServerEvent::Pong).await;
        emitter
            .emit(ServerEvent::Error {
                error: "late".to_string(),
            })
            .await;
    }
}
