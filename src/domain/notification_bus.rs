//! Broadcast channel for addressed notifications.
//!
//! [`NotificationBus`] wraps a [`tokio::sync::broadcast`] channel of
//! [`Dispatch`] values. Every WebSocket connection subscribes and forwards
//! only the dispatches addressed to its identified user; the optional
//! journal writer subscribes and records everything.

use chrono::Utc;
use tokio::sync::broadcast;

use super::notification::{Dispatch, Notification, Notifier};
use super::UserId;

/// Broadcast bus implementing [`Notifier`].
///
/// Sending never blocks. When the ring buffer is full, the oldest
/// dispatches are dropped for lagging receivers; with no receivers at all
/// the dispatch is dropped.
#[derive(Debug, Clone)]
pub struct NotificationBus {
    sender: broadcast::Sender<Dispatch>,
}

impl NotificationBus {
    /// Creates a new `NotificationBus` with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publishes a dispatch to all subscribers.
    ///
    /// Returns the number of receivers that received it.
    pub fn publish(&self, dispatch: Dispatch) -> usize {
        self.sender.send(dispatch).unwrap_or(0)
    }

    /// Creates a new receiver that will receive all future dispatches.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Dispatch> {
        self.sender.subscribe()
    }

    /// Returns the current number of active receivers.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Notifier for NotificationBus {
    fn notify(&self, recipient: UserId, notification: Notification) {
        let kind = notification.kind;
        let receivers = self.publish(Dispatch {
            recipient,
            notification,
            dispatched_at: Utc::now(),
        });
        tracing::debug!(%recipient, %kind, receivers, "notification dispatched");
    }
}
