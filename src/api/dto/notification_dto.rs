//! Notification journal DTOs.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{NotificationKind, SwapRequestId};
use crate::persistence::JournalEntry;

/// One journaled notification.
#[derive(Debug, Serialize, ToSchema)]
pub struct NotificationEntryDto {
    /// Journal row identifier.
    pub id: i64,
    /// Notification category.
    pub kind: NotificationKind,
    /// Human-readable message.
    pub message: String,
    /// Swap request the notification concerns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<SwapRequestId>,
    /// Dispatch timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<JournalEntry> for NotificationEntryDto {
    fn from(entry: JournalEntry) -> Self {
        Self {
            id: entry.id,
            kind: entry.kind,
            message: entry.message,
            request_id: entry.request_id,
            created_at: entry.created_at,
        }
    }
}

/// Response body for `GET /notifications`.
#[derive(Debug, Serialize, ToSchema)]
pub struct NotificationListResponse {
    /// Notifications, newest first.
    pub data: Vec<NotificationEntryDto>,
}
