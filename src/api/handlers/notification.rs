//! Notification history handler.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::auth::AuthUser;
use crate::api::dto::{NotificationEntryDto, NotificationListResponse};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, SlotError};

/// Maximum number of journal rows returned per call.
const HISTORY_LIMIT: i64 = 100;

/// `GET /notifications` — Recent notifications addressed to the caller.
///
/// # Errors
///
/// Returns [`SlotError::PersistenceDisabled`] when no journal is configured.
#[utoipa::path(
    get,
    path = "/api/v1/notifications",
    tag = "Notifications",
    summary = "Notification history",
    description = "Returns the caller's 100 most recent notifications from the journal, newest first. Requires persistence to be enabled.",
    params(("x-user-id" = String, Header, description = "Verified caller id")),
    responses(
        (status = 200, description = "Notification history", body = NotificationListResponse),
        (status = 503, description = "Journal disabled", body = ErrorResponse),
    )
)]
pub async fn list_notifications(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> Result<impl IntoResponse, SlotError> {
    let journal = state.journal.as_ref().ok_or(SlotError::PersistenceDisabled)?;
    let entries = journal.load_for_recipient(caller, HISTORY_LIMIT).await?;
    Ok(Json(NotificationListResponse {
        data: entries.into_iter().map(NotificationEntryDto::from).collect(),
    }))
}

/// Notification routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/notifications", get(list_notifications))
}
