//! Slot status state machine.
//!
//! An [`Event`](super::Event) is always in exactly one [`SlotStatus`]. Every
//! status change, whether requested by the owner or driven by the swap
//! lifecycle, goes through [`SlotStatus::apply`], which consults the single
//! transition table in [`next_status`].
//!
//! ```text
//!          OptIn              Propose
//!   BUSY ─────────▶ SWAPPABLE ───────▶ SWAP_PENDING
//!     ▲  ◀─────────     ▲                 │   │
//!     │    Withdraw     └── Reject/Cancel ┘   │
//!     └──────────────── Accept ───────────────┘
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::SlotError;

/// Availability of a calendar slot for exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlotStatus {
    /// Not offered for exchange. Initial status of every event.
    #[default]
    Busy,
    /// Offered by its owner on the exchange market.
    Swappable,
    /// Locked into exactly one in-flight swap request.
    SwapPending,
}

/// Something that causes a slot status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotTrigger {
    /// Owner opts the slot into the market.
    OptIn,
    /// Owner withdraws the slot from the market.
    Withdraw,
    /// A swap request referencing the slot was created.
    Propose,
    /// The swap request referencing the slot was accepted.
    Accept,
    /// The swap request referencing the slot was rejected.
    Reject,
    /// The swap request referencing the slot was cancelled because the
    /// counterpart event was deleted.
    Cancel,
}

/// The slot transition table. Returns `None` for every illegal pair.
#[must_use]
pub const fn next_status(from: SlotStatus, trigger: SlotTrigger) -> Option<SlotStatus> {
    match (from, trigger) {
        (SlotStatus::Busy, SlotTrigger::OptIn) => Some(SlotStatus::Swappable),
        (SlotStatus::Swappable, SlotTrigger::Withdraw) => Some(SlotStatus::Busy),
        (SlotStatus::Swappable, SlotTrigger::Propose) => Some(SlotStatus::SwapPending),
        (SlotStatus::SwapPending, SlotTrigger::Accept) => Some(SlotStatus::Busy),
        (SlotStatus::SwapPending, SlotTrigger::Reject | SlotTrigger::Cancel) => {
            Some(SlotStatus::Swappable)
        }
        _ => None,
    }
}

impl SlotStatus {
    /// Returns the canonical upper-case name (`"BUSY"`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Busy => "BUSY",
            Self::Swappable => "SWAPPABLE",
            Self::SwapPending => "SWAP_PENDING",
        }
    }

    /// Returns `true` if the slot may currently be offered or targeted in a
    /// new swap request.
    #[must_use]
    pub const fn is_swappable(self) -> bool {
        matches!(self, Self::Swappable)
    }

    /// Applies `trigger` and returns the resulting status.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::IllegalTransition`] if the table has no entry
    /// for `(self, trigger)`.
    pub fn apply(self, trigger: SlotTrigger) -> Result<Self, SlotError> {
        next_status(self, trigger).ok_or(SlotError::IllegalTransition {
            from: self,
            trigger,
        })
    }

    /// Maps an owner's request to move the slot to `target` onto a trigger.
    ///
    /// Returns `Ok(None)` when `target` equals the current status and the
    /// slot is not engaged in a swap (a no-op).
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::IllegalTransition`] when the owner asks for a
    /// status only the swap lifecycle may set, or for any change while the
    /// slot is [`SlotStatus::SwapPending`].
    pub fn owner_trigger(self, target: Self) -> Result<Option<SlotTrigger>, SlotError> {
        match (self, target) {
            (Self::Busy, Self::Busy) | (Self::Swappable, Self::Swappable) => Ok(None),
            (Self::Busy, Self::Swappable) => Ok(Some(SlotTrigger::OptIn)),
            (Self::Swappable, Self::Busy) => Ok(Some(SlotTrigger::Withdraw)),
            (Self::SwapPending, _) => Err(SlotError::IllegalTransition {
                from: self,
                trigger: SlotTrigger::Withdraw,
            }),
            (_, Self::SwapPending) => Err(SlotError::IllegalTransition {
                from: self,
                trigger: SlotTrigger::Propose,
            }),
        }
    }
}

impl fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SlotTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::OptIn => "opt_in",
            Self::Withdraw => "withdraw",
            Self::Propose => "propose",
            Self::Accept => "accept",
            Self::Reject => "reject",
            Self::Cancel => "cancel",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    const ALL_STATUSES: [SlotStatus; 3] =
        [SlotStatus::Busy, SlotStatus::Swappable, SlotStatus::SwapPending];
    const ALL_TRIGGERS: [SlotTrigger; 6] = [
        SlotTrigger::OptIn,
        SlotTrigger::Withdraw,
        SlotTrigger::Propose,
        SlotTrigger::Accept,
        SlotTrigger::Reject,
        SlotTrigger::Cancel,
    ];

    #[test]
    fn default_is_busy() {
        assert_eq!(SlotStatus::default(), SlotStatus::Busy);
    }

    #[test]
    fn table_has_exactly_six_legal_edges() {
        let legal = ALL_STATUSES
            .iter()
            .flat_map(|s| ALL_TRIGGERS.iter().map(move |t| next_status(*s, *t)))
            .filter(Option::is_some)
            .count();
        assert_eq!(legal, 6);
    }

    #[test]
    fn propose_only_from_swappable() {
        assert_eq!(
            SlotStatus::Swappable.apply(SlotTrigger::Propose).ok(),
            Some(SlotStatus::SwapPending)
        );
        assert!(SlotStatus::Busy.apply(SlotTrigger::Propose).is_err());
        assert!(SlotStatus::SwapPending.apply(SlotTrigger::Propose).is_err());
    }

    #[test]
    fn lifecycle_outcomes_leave_pending() {
        assert_eq!(
            SlotStatus::SwapPending.apply(SlotTrigger::Accept).ok(),
            Some(SlotStatus::Busy)
        );
        assert_eq!(
            SlotStatus::SwapPending.apply(SlotTrigger::Reject).ok(),
            Some(SlotStatus::Swappable)
        );
        assert_eq!(
            SlotStatus::SwapPending.apply(SlotTrigger::Cancel).ok(),
            Some(SlotStatus::Swappable)
        );
    }

    #[test]
    fn owner_cannot_leave_swap_pending() {
        assert!(SlotStatus::SwapPending.owner_trigger(SlotStatus::Busy).is_err());
        assert!(SlotStatus::SwapPending.owner_trigger(SlotStatus::Swappable).is_err());
        assert!(SlotStatus::SwapPending.owner_trigger(SlotStatus::SwapPending).is_err());
    }

    #[test]
    fn owner_cannot_set_swap_pending() {
        assert!(SlotStatus::Busy.owner_trigger(SlotStatus::SwapPending).is_err());
        assert!(SlotStatus::Swappable.owner_trigger(SlotStatus::SwapPending).is_err());
    }

    #[test]
    fn owner_toggles_market_membership() {
        assert_eq!(
            SlotStatus::Busy.owner_trigger(SlotStatus::Swappable).ok(),
            Some(Some(SlotTrigger::OptIn))
        );
        assert_eq!(
            SlotStatus::Swappable.owner_trigger(SlotStatus::Busy).ok(),
            Some(Some(SlotTrigger::Withdraw))
        );
        assert_eq!(SlotStatus::Busy.owner_trigger(SlotStatus::Busy).ok(), Some(None));
    }

    #[test]
    fn serializes_screaming_snake_case() {
        let Ok(json) = serde_json::to_string(&SlotStatus::SwapPending) else {
            panic!("serialization failed");
        };
        assert_eq!(json, "\"SWAP_PENDING\"");
        let Ok(parsed) = serde_json::from_str::<SlotStatus>("\"SWAPPABLE\"") else {
            panic!("deserialization failed");
        };
        assert_eq!(parsed, SlotStatus::Swappable);
    }
}
