//! Event service: owner CRUD on calendar events and the swap market listing.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::event::validate_time_range;
use crate::domain::{
    Event, EventId, Notification, Notifier, SlotStatus, SlotTrigger, SwapDecision, SwapRequestId,
    UserId, UserProfile,
};
use crate::error::SlotError;
use crate::store::SlotStore;

/// Input for [`EventService::create_event`].
#[derive(Debug, Clone)]
pub struct NewEvent {
    /// Event title.
    pub title: String,
    /// Start of the interval.
    pub start_time: DateTime<Utc>,
    /// End of the interval.
    pub end_time: DateTime<Utc>,
}

/// Partial update for [`EventService::update_event`]. `None` leaves the
/// field unchanged.
#[derive(Debug, Clone, Default)]
pub struct EventUpdate {
    /// New title.
    pub title: Option<String>,
    /// New start time.
    pub start_time: Option<DateTime<Utc>>,
    /// New end time.
    pub end_time: Option<DateTime<Utc>>,
    /// Requested status; only `BUSY` and `SWAPPABLE` are owner-settable.
    pub status: Option<SlotStatus>,
    /// If set, the update only applies when the stored version matches.
    pub expected_version: Option<u64>,
}

/// A swappable event together with its owner's public profile.
#[derive(Debug, Clone)]
pub struct SlotListing {
    /// The swappable event.
    pub event: Event,
    /// Owner profile, if one is registered.
    pub owner: Option<UserProfile>,
}

/// Result of [`EventService::delete_event`].
#[derive(Debug, Clone)]
pub struct DeletedEvent {
    /// The removed event.
    pub event_id: EventId,
    /// Pending swap request cancelled by the deletion, if any.
    pub cancelled_request: Option<SwapRequestId>,
}

/// Owner-facing event operations.
#[derive(Debug, Clone)]
pub struct EventService {
    store: Arc<SlotStore>,
    notifier: Arc<dyn Notifier>,
}

impl EventService {
    /// Creates a new `EventService`.
    #[must_use]
    pub fn new(store: Arc<SlotStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self { store, notifier }
    }

    /// Creates a `BUSY` event owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank title or an empty interval,
    /// or [`SlotError::StoreUnavailable`].
    pub async fn create_event(&self, owner: UserId, input: NewEvent) -> Result<Event, SlotError> {
        let event = self
            .store
            .unit_of_work(|uow| {
                let event = Event::new(
                    owner,
                    &input.title,
                    input.start_time,
                    input.end_time,
                    uow.now(),
                )?;
                Ok(uow.put_event(event))
            })
            .await?;
        tracing::info!(event_id = %event.id, %owner, "event created");
        Ok(event)
    }

    /// Lists the caller's events by start time, optionally by status.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::StoreUnavailable`] if the store cannot be read.
    pub async fn list_my_events(
        &self,
        owner: UserId,
        status: Option<SlotStatus>,
    ) -> Result<Vec<Event>, SlotError> {
        self.store.read(|s| s.events_owned_by(owner, status)).await
    }

    /// Applies an owner's partial update.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::EventNotFound`], [`SlotError::NotEventOwner`],
    /// [`SlotError::VersionConflict`], [`SlotError::SlotEngaged`] while the
    /// event is in a pending swap, or a validation error for bad fields or an
    /// illegal status change.
    pub async fn update_event(
        &self,
        caller: UserId,
        event_id: EventId,
        update: EventUpdate,
    ) -> Result<Event, SlotError> {
        let event = self
            .store
            .unit_of_work(|uow| {
                let mut event = uow.event(event_id).ok_or(SlotError::EventNotFound(event_id))?;
                if !event.is_owned_by(caller) {
                    return Err(SlotError::NotEventOwner(event_id));
                }
                if let Some(expected) = update.expected_version
                    && expected != event.version()
                {
                    return Err(SlotError::VersionConflict {
                        event_id,
                        expected,
                        actual: event.version(),
                    });
                }
                if event.status() == SlotStatus::SwapPending {
                    return Err(SlotError::SlotEngaged(event_id));
                }

                if let Some(title) = update.title.as_deref() {
                    let title = title.trim();
                    if title.is_empty() {
                        return Err(SlotError::MissingField("title"));
                    }
                    event.title = title.to_string();
                }
                let start_time = update.start_time.unwrap_or(event.start_time);
                let end_time = update.end_time.unwrap_or(event.end_time);
                validate_time_range(start_time, end_time)?;
                event.start_time = start_time;
                event.end_time = end_time;

                if let Some(target) = update.status
                    && let Some(trigger) = event.status().owner_trigger(target)?
                {
                    event.transition(trigger)?;
                }
                Ok(uow.put_event(event))
            })
            .await?;
        tracing::info!(%event_id, status = %event.status(), version = event.version(), "event updated");
        Ok(event)
    }

    /// Deletes an owner's event.
    ///
    /// Deleting a `SWAP_PENDING` event cancels the request that holds it and
    /// returns the counterpart event to the market, all in the same unit of
    /// work. The counterparty is notified after commit.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::EventNotFound`] or [`SlotError::NotEventOwner`].
    pub async fn delete_event(
        &self,
        caller: UserId,
        event_id: EventId,
    ) -> Result<DeletedEvent, SlotError> {
        let (title, cancelled) = self
            .store
            .unit_of_work(|uow| {
                let event = uow.event(event_id).ok_or(SlotError::EventNotFound(event_id))?;
                if !event.is_owned_by(caller) {
                    return Err(SlotError::NotEventOwner(event_id));
                }

                let mut cancelled = None;
                if event.status() == SlotStatus::SwapPending
                    && let Some(mut request) = uow.pending_request_for(event_id)
                {
                    request.resolve(SwapDecision::Cancel, uow.now())?;
                    let counterpart_id = if request.requester_slot == event_id {
                        request.receiver_slot
                    } else {
                        request.requester_slot
                    };
                    if let Some(mut counterpart) = uow.event(counterpart_id) {
                        counterpart.transition(SlotTrigger::Cancel)?;
                        uow.put_event(counterpart);
                    }
                    cancelled = Some((request.id, request.counterparty_of(caller)));
                    uow.put_swap_request(request);
                }
                uow.delete_event(event_id);
                Ok((event.title, cancelled))
            })
            .await?;

        tracing::info!(%event_id, owner = %caller, "event deleted");
        if let Some((request_id, counterparty)) = cancelled {
            tracing::info!(%request_id, %event_id, "pending swap cancelled by deletion");
            self.notifier
                .notify(counterparty, Notification::swap_cancelled(&title, request_id));
        }

        Ok(DeletedEvent {
            event_id,
            cancelled_request: cancelled.map(|(request_id, _)| request_id),
        })
    }

    /// Lists other users' swappable events with owner profiles.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::StoreUnavailable`] if the store cannot be read.
    pub async fn list_swappable_slots(&self, viewer: UserId) -> Result<Vec<SlotListing>, SlotError> {
        tracing::debug!(%viewer, "listing swappable slots");
        self.store
            .read(|s| {
                s.swappable_excluding(viewer)
                    .into_iter()
                    .map(|event| SlotListing {
                        owner: s.user(event.owner()).cloned(),
                        event,
                    })
                    .collect()
            })
            .await
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use tokio_test::{assert_err, assert_ok};

    use super::*;
    use crate::domain::SwapStatus;
    use crate::domain::event::tests::at;
    use crate::domain::notification::tests::RecordingNotifier;
    use crate::service::SwapService;

    struct Fixture {
        events: EventService,
        swaps: SwapService,
        notifier: Arc<RecordingNotifier>,
        store: Arc<SlotStore>,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(SlotStore::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let dyn_notifier: Arc<dyn Notifier> = Arc::clone(&notifier) as Arc<dyn Notifier>;
        Fixture {
            events: EventService::new(Arc::clone(&store), Arc::clone(&dyn_notifier)),
            swaps: SwapService::new(Arc::clone(&store), dyn_notifier),
            notifier,
            store,
        }
    }

    fn new_event(title: &str, hour: u32) -> NewEvent {
        NewEvent {
            title: title.to_string(),
            start_time: at(hour, 0),
            end_time: at(hour, 30),
        }
    }

    async fn swappable(fx: &Fixture, owner: UserId, title: &str, hour: u32) -> Event {
        let event = assert_ok!(fx.events.create_event(owner, new_event(title, hour)).await);
        let update = EventUpdate {
            status: Some(SlotStatus::Swappable),
            ..EventUpdate::default()
        };
        assert_ok!(fx.events.update_event(owner, event.id, update).await)
    }

    #[tokio::test]
    async fn create_starts_busy_and_lists_by_start_time() {
        let fx = fixture();
        let owner = UserId::new();
        let _ = assert_ok!(fx.events.create_event(owner, new_event("Review", 14)).await);
        let _ = assert_ok!(fx.events.create_event(owner, new_event("Standup", 10)).await);

        let mine = assert_ok!(fx.events.list_my_events(owner, None).await);
        let titles: Vec<_> = mine.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Standup", "Review"]);
        assert!(mine.iter().all(|e| e.status() == SlotStatus::Busy));
    }

    #[tokio::test]
    async fn create_rejects_inverted_interval() {
        let fx = fixture();
        let input = NewEvent {
            title: "Backwards".to_string(),
            start_time: at(11, 0),
            end_time: at(10, 0),
        };
        let err = assert_err!(fx.events.create_event(UserId::new(), input).await);
        assert!(matches!(err, SlotError::InvalidTimeRange { .. }));
    }

    #[tokio::test]
    async fn update_by_non_owner_is_forbidden() {
        let fx = fixture();
        let event = assert_ok!(fx.events.create_event(UserId::new(), new_event("Mine", 9)).await);
        let err = assert_err!(
            fx.events
                .update_event(UserId::new(), event.id, EventUpdate::default())
                .await
        );
        assert!(matches!(err, SlotError::NotEventOwner(_)));
    }

    #[tokio::test]
    async fn update_with_stale_version_conflicts() {
        let fx = fixture();
        let owner = UserId::new();
        let event = swappable(&fx, owner, "Standup", 10).await;
        let update = EventUpdate {
            title: Some("Renamed".to_string()),
            expected_version: Some(event.version() - 1),
            ..EventUpdate::default()
        };
        let err = assert_err!(fx.events.update_event(owner, event.id, update).await);
        assert!(matches!(err, SlotError::VersionConflict { .. }));

        let update = EventUpdate {
            title: Some("Renamed".to_string()),
            expected_version: Some(event.version()),
            ..EventUpdate::default()
        };
        let updated = assert_ok!(fx.events.update_event(owner, event.id, update).await);
        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.version(), event.version() + 1);
    }

    #[tokio::test]
    async fn owner_cannot_set_swap_pending() {
        let fx = fixture();
        let owner = UserId::new();
        let event = assert_ok!(fx.events.create_event(owner, new_event("Standup", 10)).await);
        let update = EventUpdate {
            status: Some(SlotStatus::SwapPending),
            ..EventUpdate::default()
        };
        let err = assert_err!(fx.events.update_event(owner, event.id, update).await);
        assert!(matches!(err, SlotError::IllegalTransition { .. }));
    }

    #[tokio::test]
    async fn pending_event_cannot_be_edited() {
        let fx = fixture();
        let (a, b) = (UserId::new(), UserId::new());
        let x = swappable(&fx, a, "Standup", 10).await;
        let y = swappable(&fx, b, "Review", 14).await;
        let _ = assert_ok!(fx.swaps.propose_swap(a, x.id, y.id).await);

        let update = EventUpdate {
            status: Some(SlotStatus::Busy),
            ..EventUpdate::default()
        };
        let err = assert_err!(fx.events.update_event(a, x.id, update).await);
        assert!(matches!(err, SlotError::SlotEngaged(_)));
    }

    #[tokio::test]
    async fn deleting_pending_event_cancels_request() {
        let fx = fixture();
        let (a, b) = (UserId::new(), UserId::new());
        let x = swappable(&fx, a, "Standup", 10).await;
        let y = swappable(&fx, b, "Review", 14).await;
        let request = assert_ok!(fx.swaps.propose_swap(a, x.id, y.id).await);

        let deleted = assert_ok!(fx.events.delete_event(b, y.id).await);
        assert_eq!(deleted.cancelled_request, Some(request.id));

        let (x_after, y_after, request_after) = assert_ok!(
            fx.store
                .read(|s| (
                    s.event(x.id).cloned(),
                    s.event(y.id).cloned(),
                    s.swap_request(request.id).cloned(),
                ))
                .await
        );
        assert!(y_after.is_none());
        assert_eq!(x_after.map(|e| e.status()), Some(SlotStatus::Swappable));
        assert_eq!(request_after.map(|r| r.status()), Some(SwapStatus::Cancelled));

        let sent = fx.notifier.sent();
        let Some((recipient, notification)) = sent.last() else {
            panic!("expected a cancellation notification");
        };
        assert_eq!(*recipient, a);
        assert_eq!(notification.kind.as_str(), "cancelled");
    }

    #[tokio::test]
    async fn delete_by_non_owner_leaves_event() {
        let fx = fixture();
        let owner = UserId::new();
        let event = assert_ok!(fx.events.create_event(owner, new_event("Keep", 9)).await);
        let err = assert_err!(fx.events.delete_event(UserId::new(), event.id).await);
        assert!(matches!(err, SlotError::NotEventOwner(_)));
        let mine = assert_ok!(fx.events.list_my_events(owner, None).await);
        assert_eq!(mine.len(), 1);
    }

    #[tokio::test]
    async fn swappable_listing_excludes_viewer() {
        let fx = fixture();
        let (a, b) = (UserId::new(), UserId::new());
        let _ = swappable(&fx, a, "Mine", 9).await;
        let theirs = swappable(&fx, b, "Theirs", 10).await;
        let _ = assert_ok!(fx.events.create_event(b, new_event("Busy", 11)).await);

        let listing = assert_ok!(fx.events.list_swappable_slots(a).await);
        assert_eq!(listing.len(), 1);
        let Some(first) = listing.first() else {
            panic!("expected one listing");
        };
        assert_eq!(first.event.id, theirs.id);
        assert!(first.owner.is_none());
    }
}
