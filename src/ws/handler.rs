//! Axum WebSocket upgrade handler.

use axum::extract::State;
use axum::extract::ws::WebSocketUpgrade;
use axum::http::HeaderMap;
use axum::response::IntoResponse;

use super::connection::run_connection;
use crate::api::auth::verified_user;
use crate::app_state::AppState;
use crate::error::SlotError;

/// `GET /ws` — Upgrade HTTP connection to WebSocket.
///
/// When the upgrade request carries `X-User-Id`, the connection is bound to
/// that user and cannot identify as anyone else.
///
/// # Errors
///
/// Returns [`SlotError::Unauthenticated`] if `X-User-Id` is malformed.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, SlotError> {
    let verified = verified_user(&headers)?;
    let dispatch_rx = state.notification_bus.subscribe();
    Ok(ws.on_upgrade(move |socket| run_connection(socket, dispatch_rx, verified)))
}
