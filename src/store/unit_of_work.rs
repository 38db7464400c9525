//! Staged reads and writes for one atomic store transaction.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::slot_store::StoreState;
use crate::domain::{Event, EventId, SwapRequest, SwapRequestId, SwapStatus, UserId, UserProfile};

/// A transaction in progress against [`super::SlotStore`].
///
/// Reads see this unit's own staged writes first, then committed state.
/// Writes are buffered and only reach the store if the closure passed to
/// [`super::SlotStore::unit_of_work`] returns `Ok`.
#[derive(Debug)]
pub struct UnitOfWork<'a> {
    base: &'a StoreState,
    now: DateTime<Utc>,
    events: HashMap<EventId, Option<Event>>,
    requests: HashMap<SwapRequestId, SwapRequest>,
    users: HashMap<UserId, UserProfile>,
}

/// Buffered writes of a finished unit of work.
#[derive(Debug, Default)]
pub(super) struct WriteSet {
    pub(super) events: HashMap<EventId, Option<Event>>,
    pub(super) requests: HashMap<SwapRequestId, SwapRequest>,
    pub(super) users: HashMap<UserId, UserProfile>,
}

impl WriteSet {
    pub(super) fn len(&self) -> usize {
        self.events.len() + self.requests.len() + self.users.len()
    }
}

impl<'a> UnitOfWork<'a> {
    pub(super) fn new(base: &'a StoreState, now: DateTime<Utc>) -> Self {
        Self {
            base,
            now,
            events: HashMap::new(),
            requests: HashMap::new(),
            users: HashMap::new(),
        }
    }

    pub(super) fn into_writes(self) -> WriteSet {
        WriteSet {
            events: self.events,
            requests: self.requests,
            users: self.users,
        }
    }

    /// Timestamp shared by every write in this unit.
    #[must_use]
    pub const fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// Returns a copy of the event, if it exists.
    #[must_use]
    pub fn event(&self, id: EventId) -> Option<Event> {
        match self.events.get(&id) {
            Some(staged) => staged.clone(),
            None => self.base.event(id).cloned(),
        }
    }

    /// Stages an insert or update, stamping the next version. Returns the
    /// event as it will be committed.
    pub fn put_event(&mut self, mut event: Event) -> Event {
        let committed = self.base.event(event.id).map_or(0, Event::version);
        event.stamp(committed + 1, self.now);
        self.events.insert(event.id, Some(event.clone()));
        event
    }

    /// Stages a deletion.
    pub fn delete_event(&mut self, id: EventId) {
        self.events.insert(id, None);
    }

    /// Returns a copy of the swap request, if it exists.
    #[must_use]
    pub fn swap_request(&self, id: SwapRequestId) -> Option<SwapRequest> {
        self.requests
            .get(&id)
            .cloned()
            .or_else(|| self.base.swap_request(id).cloned())
    }

    /// Stages an insert or update.
    pub fn put_swap_request(&mut self, request: SwapRequest) {
        self.requests.insert(request.id, request);
    }

    /// Returns the pending request that references `event_id`, if any.
    ///
    /// Staged requests are scanned; committed ones are found through the
    /// store's in-flight index, skipping any this unit has since resolved.
    #[must_use]
    pub fn pending_request_for(&self, event_id: EventId) -> Option<SwapRequest> {
        let staged = self
            .requests
            .values()
            .find(|r| r.status() == SwapStatus::Pending && r.references(event_id));
        if let Some(request) = staged {
            return Some(request.clone());
        }
        self.base
            .pending_request_for(event_id)
            .filter(|r| !self.requests.contains_key(&r.id))
            .cloned()
    }

    /// Returns a copy of the user profile, if it exists.
    #[must_use]
    pub fn user(&self, id: UserId) -> Option<UserProfile> {
        self.users
            .get(&id)
            .cloned()
            .or_else(|| self.base.user(id).cloned())
    }

    /// Returns `true` if a profile with `email` exists.
    #[must_use]
    pub fn email_registered(&self, email: &str) -> bool {
        self.users.values().any(|u| u.email == email) || self.base.user_by_email(email).is_some()
    }

    /// Stages a profile insert.
    pub fn put_user(&mut self, user: UserProfile) {
        self.users.insert(user.id, user);
    }
}
