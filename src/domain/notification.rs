//! Notifications about swap negotiation progress and the capability that
//! delivers them.
//!
//! The orchestrator only ever sees [`Notifier`]. Which users are connected,
//! and over what transport, is decided at the process boundary.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{SwapRequestId, UserId};

/// What a notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// A new swap request awaits the recipient's response.
    Request,
    /// The recipient's swap request was accepted or rejected.
    Response,
    /// A pending request involving the recipient was cancelled by deletion.
    Cancelled,
}

impl NotificationKind {
    /// Returns the wire name (`"request"`, `"response"`, `"cancelled"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Request => "request",
            Self::Response => "response",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parses a wire name.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "request" => Some(Self::Request),
            "response" => Some(Self::Response),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload delivered to a single user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Notification {
    /// Notification category.
    pub kind: NotificationKind,
    /// Human-readable text.
    pub message: String,
    /// Request the notification refers to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<SwapRequestId>,
}

impl Notification {
    /// A new request arrived from `requester_name`.
    #[must_use]
    pub fn swap_requested(requester_name: &str, request_id: SwapRequestId) -> Self {
        Self {
            kind: NotificationKind::Request,
            message: format!("You have a new swap request from {requester_name}!"),
            request_id: Some(request_id),
        }
    }

    /// The request offering `offered_title` was answered.
    #[must_use]
    pub fn swap_answered(offered_title: &str, accepted: bool, request_id: SwapRequestId) -> Self {
        let outcome = if accepted { "accepted" } else { "rejected" };
        Self {
            kind: NotificationKind::Response,
            message: format!("Your swap for \"{offered_title}\" was {outcome}!"),
            request_id: Some(request_id),
        }
    }

    /// The request was cancelled because `deleted_title` was deleted.
    #[must_use]
    pub fn swap_cancelled(deleted_title: &str, request_id: SwapRequestId) -> Self {
        Self {
            kind: NotificationKind::Cancelled,
            message: format!(
                "A pending swap was cancelled because \"{deleted_title}\" was deleted."
            ),
            request_id: Some(request_id),
        }
    }
}

/// A notification addressed to one user, as carried by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    /// User the notification is for.
    pub recipient: UserId,
    /// The payload.
    pub notification: Notification,
    /// When the notification was dispatched.
    pub dispatched_at: DateTime<Utc>,
}

/// Best-effort delivery of a notification to a specific user.
///
/// Implementations must not block and must not report failure to the
/// caller: an undeliverable notification is dropped (and may be logged).
pub trait Notifier: Send + Sync + fmt::Debug {
    /// Delivers `notification` to `recipient` if they are reachable.
    fn notify(&self, recipient: UserId, notification: Notification);
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;

    use super::*;

    /// Notifier that records every call, for service tests.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingNotifier {
        sent: Mutex<Vec<(UserId, Notification)>>,
    }

    impl RecordingNotifier {
        pub(crate) fn sent(&self) -> Vec<(UserId, Notification)> {
            self.sent.lock().map(|s| s.clone()).unwrap_or_default()
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, recipient: UserId, notification: Notification) {
            if let Ok(mut sent) = self.sent.lock() {
                sent.push((recipient, notification));
            }
        }
    }

    #[test]
    fn response_message_names_outcome() {
        let id = SwapRequestId::new();
        let accepted = Notification::swap_answered("Standup", true, id);
        assert_eq!(accepted.kind, NotificationKind::Response);
        assert_eq!(accepted.message, "Your swap for \"Standup\" was accepted!");

        let rejected = Notification::swap_answered("Standup", false, id);
        assert!(rejected.message.ends_with("was rejected!"));
    }

    #[test]
    fn kind_wire_names_round_trip() {
        for kind in [
            NotificationKind::Request,
            NotificationKind::Response,
            NotificationKind::Cancelled,
        ] {
            assert_eq!(NotificationKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(NotificationKind::parse("other"), None);
    }

    #[test]
    fn serializes_kind_and_message() {
        let n = Notification::swap_requested("Ada", SwapRequestId::new());
        let json = serde_json::to_value(&n).unwrap_or_default();
        assert_eq!(json.get("kind").and_then(|v| v.as_str()), Some("request"));
        assert_eq!(
            json.get("message").and_then(|v| v.as_str()),
            Some("You have a new swap request from Ada!")
        );
    }
}
