//! WebSocket connection state machine.
//!
//! Handles the read/write loop for a single WebSocket connection,
//! dispatching incoming commands and forwarding the identified user's
//! notifications.

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;

use super::messages::{WsCommand, WsMessage, WsMessageType};
use super::session::ClientSession;
use crate::domain::{Dispatch, UserId};

/// Runs the read/write loop for a single WebSocket connection.
///
/// - Reads commands from the client and answers them.
/// - Forwards dispatches addressed to the identified user.
///
/// `verified` pre-binds the session to the identity of the upgrade request.
pub async fn run_connection(
    socket: WebSocket,
    mut dispatch_rx: broadcast::Receiver<Dispatch>,
    verified: Option<UserId>,
) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let mut session = ClientSession::with_verified(verified);

    loop {
        tokio::select! {
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let reply = handle_text_message(text.as_str(), &mut session);
                        if ws_tx.send(Message::text(reply.to_json())).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_)) | Err(_)) | None => break,
                    _ => {}
                }
            }
            dispatch = dispatch_rx.recv() => {
                match dispatch {
                    Ok(dispatch) => {
                        if session.matches(&dispatch) {
                            let msg = WsMessage::notification(&dispatch.notification);
                            if ws_tx.send(Message::text(msg.to_json())).await.is_err() {
                                break;
                            }
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(lagged = n, user = ?session.user(), "ws client lagged behind notification bus");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    tracing::debug!(user = ?session.user(), "ws connection closed");
}

/// Handles a text frame from the client and builds the reply.
fn handle_text_message(text: &str, session: &mut ClientSession) -> WsMessage {
    let Ok(msg) = serde_json::from_str::<WsMessage>(text) else {
        return WsMessage::error(String::new(), 400, "malformed JSON");
    };
    if msg.msg_type != WsMessageType::Command {
        return WsMessage::error(msg.id, 400, "expected a command message");
    }
    let Ok(command) = serde_json::from_value::<WsCommand>(msg.payload) else {
        return WsMessage::error(msg.id, 404, "unknown command");
    };

    match command {
        WsCommand::Identify { user_id } => match session.identify(user_id) {
            Ok(previous) => {
                if let Some(previous) = previous
                    && previous != user_id
                {
                    tracing::debug!(from = %previous, to = %user_id, "ws session re-identified");
                }
                tracing::debug!(user = %user_id, "ws session identified");
                WsMessage::response(msg.id, serde_json::json!({ "identified": user_id }))
            }
            Err(err) => {
                tracing::warn!(asserted = %user_id, error = %err, "ws identify refused");
                WsMessage::error(msg.id, 403, &err.to_string())
            }
        },
        WsCommand::Forget => {
            let forgotten = session.forget();
            WsMessage::response(msg.id, serde_json::json!({ "forgotten": forgotten }))
        }
        WsCommand::Ping => WsMessage::response(msg.id, serde_json::json!({ "pong": true })),
    }
}
