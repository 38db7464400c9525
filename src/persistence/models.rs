//! Database models for the notification journal.

use chrono::{DateTime, Utc};

use crate::domain::{NotificationKind, SwapRequestId, UserId};

/// A stored row from the `notifications` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalEntry {
    /// Auto-increment row ID.
    pub id: i64,
    /// User the notification was addressed to.
    pub recipient: UserId,
    /// Notification category.
    pub kind: NotificationKind,
    /// Human-readable text.
    pub message: String,
    /// Swap request the notification refers to.
    pub request_id: Option<SwapRequestId>,
    /// Dispatch timestamp.
    pub created_at: DateTime<Utc>,
}
