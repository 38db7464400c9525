//! Swap request lifecycle.
//!
//! A request is created [`SwapStatus::Pending`] and is resolved exactly once
//! into one of the terminal statuses. The only legal edges live in
//! [`next_swap_status`].

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::slot_status::SlotTrigger;

/// Status of a [`SwapRequest`](super::SwapRequest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SwapStatus {
    /// Awaiting the receiver's response.
    #[default]
    Pending,
    /// Receiver accepted; the two events exchanged owners.
    Accepted,
    /// Receiver rejected; both events returned to the market.
    Rejected,
    /// One of the referenced events was deleted while the request was
    /// pending.
    Cancelled,
}

/// How a pending request is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapDecision {
    /// The receiver accepts the exchange.
    Accept,
    /// The receiver declines the exchange.
    Reject,
    /// A participant deleted one of the referenced events.
    Cancel,
}

/// The request transition table. Terminal statuses have no outgoing edges.
#[must_use]
pub const fn next_swap_status(from: SwapStatus, decision: SwapDecision) -> Option<SwapStatus> {
    match (from, decision) {
        (SwapStatus::Pending, SwapDecision::Accept) => Some(SwapStatus::Accepted),
        (SwapStatus::Pending, SwapDecision::Reject) => Some(SwapStatus::Rejected),
        (SwapStatus::Pending, SwapDecision::Cancel) => Some(SwapStatus::Cancelled),
        _ => None,
    }
}

impl SwapStatus {
    /// Returns the canonical upper-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Accepted => "ACCEPTED",
            Self::Rejected => "REJECTED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Returns `true` once the request can no longer change.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl SwapDecision {
    /// Builds a decision from the receiver's accept flag.
    #[must_use]
    pub const fn from_accepted(accepted: bool) -> Self {
        if accepted { Self::Accept } else { Self::Reject }
    }

    /// The slot trigger applied to both referenced events for this outcome.
    #[must_use]
    pub const fn slot_trigger(self) -> SlotTrigger {
        match self {
            Self::Accept => SlotTrigger::Accept,
            Self::Reject => SlotTrigger::Reject,
            Self::Cancel => SlotTrigger::Cancel,
        }
    }
}

impl fmt::Display for SwapStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
