//! Swap request aggregate.

use chrono::{DateTime, Utc};

use super::swap_status::{SwapDecision, SwapStatus, next_swap_status};
use super::{EventId, SwapRequestId, UserId};
use crate::error::SlotError;

/// A proposed pairwise exchange between two events owned by two users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapRequest {
    /// Unique request identifier.
    pub id: SwapRequestId,
    /// User who proposed the exchange.
    pub requester: UserId,
    /// Owner of the targeted event; the only user allowed to respond.
    pub receiver: UserId,
    /// Event offered by the requester.
    pub requester_slot: EventId,
    /// Event owned by the receiver that the requester wants.
    pub receiver_slot: EventId,
    status: SwapStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last status change.
    pub updated_at: DateTime<Utc>,
    /// Set once the request reaches a terminal status.
    pub responded_at: Option<DateTime<Utc>>,
}

impl SwapRequest {
    /// Creates a [`SwapStatus::Pending`] request.
    #[must_use]
    pub fn new(
        requester: UserId,
        receiver: UserId,
        requester_slot: EventId,
        receiver_slot: EventId,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: SwapRequestId::new(),
            requester,
            receiver,
            requester_slot,
            receiver_slot,
            status: SwapStatus::Pending,
            created_at: now,
            updated_at: now,
            responded_at: None,
        }
    }

    /// Current lifecycle status.
    #[must_use]
    pub const fn status(&self) -> SwapStatus {
        self.status
    }

    /// Returns `true` if `event_id` is one of the two referenced events.
    #[must_use]
    pub fn references(&self, event_id: EventId) -> bool {
        self.requester_slot == event_id || self.receiver_slot == event_id
    }

    /// Returns the participant on the other side from `user`.
    #[must_use]
    pub fn counterparty_of(&self, user: UserId) -> UserId {
        if self.requester == user {
            self.receiver
        } else {
            self.requester
        }
    }

    /// Resolves the request.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::AlreadyResponded`] if the request is already
    /// terminal; the request is left untouched.
    pub fn resolve(&mut self, decision: SwapDecision, now: DateTime<Utc>) -> Result<(), SlotError> {
        let next =
            next_swap_status(self.status, decision).ok_or(SlotError::AlreadyResponded {
                request_id: self.id,
                status: self.status,
            })?;
        self.status = next;
        self.updated_at = now;
        self.responded_at = Some(now);
        Ok(())
    }
}
