//! Calendar event (slot) aggregate.

use chrono::{DateTime, Utc};

use super::slot_status::{SlotStatus, SlotTrigger};
use super::{EventId, UserId};
use crate::error::SlotError;

/// A user-owned calendar interval that may be offered for exchange.
///
/// `status` and `owner` are private: status only moves through
/// [`Event::transition`], and ownership only changes when a swap is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Unique event identifier (immutable after creation).
    pub id: EventId,
    owner: UserId,
    /// Human-readable title.
    pub title: String,
    /// Start of the interval.
    pub start_time: DateTime<Utc>,
    /// End of the interval, strictly after `start_time`.
    pub end_time: DateTime<Utc>,
    status: SlotStatus,
    version: u64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last committed write.
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Creates a new [`SlotStatus::Busy`] event owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::MissingField`] for a blank title and
    /// [`SlotError::InvalidTimeRange`] unless `start_time < end_time`.
    pub fn new(
        owner: UserId,
        title: &str,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<Self, SlotError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(SlotError::MissingField("title"));
        }
        validate_time_range(start_time, end_time)?;
        Ok(Self {
            id: EventId::new(),
            owner,
            title: title.to_string(),
            start_time,
            end_time,
            status: SlotStatus::Busy,
            version: 0,
            created_at: now,
            updated_at: now,
        })
    }

    /// Current owner.
    #[must_use]
    pub const fn owner(&self) -> UserId {
        self.owner
    }

    /// Current slot status.
    #[must_use]
    pub const fn status(&self) -> SlotStatus {
        self.status
    }

    /// Number of committed writes to this event.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Returns `true` if `user` owns this event.
    #[must_use]
    pub fn is_owned_by(&self, user: UserId) -> bool {
        self.owner == user
    }

    /// Moves the status through the slot transition table.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::IllegalTransition`] if `trigger` is not legal
    /// from the current status; the event is left untouched.
    pub fn transition(&mut self, trigger: SlotTrigger) -> Result<(), SlotError> {
        self.status = self.status.apply(trigger)?;
        Ok(())
    }

    /// Hands the event to a new owner. Only the swap orchestrator calls this.
    pub(crate) fn reassign(&mut self, new_owner: UserId) {
        self.owner = new_owner;
    }

    /// Records a committed write.
    pub(crate) fn stamp(&mut self, version: u64, at: DateTime<Utc>) {
        self.version = version;
        self.updated_at = at;
    }
}

/// Checks that an interval is non-empty.
///
/// # Errors
///
/// Returns [`SlotError::InvalidTimeRange`] unless `start < end`.
pub fn validate_time_range(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<(), SlotError> {
    if start < end {
        Ok(())
    } else {
        Err(SlotError::InvalidTimeRange { start, end })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
pub(crate) mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    pub(crate) fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        let Some(ts) = Utc.with_ymd_and_hms(2025, 3, 14, hour, minute, 0).single() else {
            panic!("valid timestamp");
        };
        ts
    }

    #[test]
    fn new_event_is_busy() {
        let Ok(event) = Event::new(UserId::new(), "Standup", at(10, 0), at(10, 30), Utc::now())
        else {
            panic!("event creation failed");
        };
        assert_eq!(event.status(), SlotStatus::Busy);
        assert_eq!(event.version(), 0);
    }

    #[test]
    fn title_is_trimmed_and_required() {
        let result = Event::new(UserId::new(), "   ", at(10, 0), at(10, 30), Utc::now());
        assert!(matches!(result, Err(SlotError::MissingField("title"))));

        let Ok(event) = Event::new(UserId::new(), " Review ", at(14, 0), at(14, 30), Utc::now())
        else {
            panic!("event creation failed");
        };
        assert_eq!(event.title, "Review");
    }

    #[test]
    fn rejects_empty_or_inverted_interval() {
        let start = at(10, 0);
        assert!(validate_time_range(start, start).is_err());
        assert!(validate_time_range(start, start - Duration::minutes(5)).is_err());
        assert!(validate_time_range(start, start + Duration::minutes(5)).is_ok());
    }

    #[test]
    fn illegal_transition_leaves_status_unchanged() {
        let Ok(mut event) = Event::new(UserId::new(), "Standup", at(10, 0), at(10, 30), Utc::now())
        else {
            panic!("event creation failed");
        };
        assert!(event.transition(SlotTrigger::Propose).is_err());
        assert_eq!(event.status(), SlotStatus::Busy);
        assert!(event.transition(SlotTrigger::OptIn).is_ok());
        assert_eq!(event.status(), SlotStatus::Swappable);
    }
}
