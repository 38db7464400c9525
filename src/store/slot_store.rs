//! In-process record store for events, swap requests, and profiles.
//!
//! [`SlotStore`] keeps all records behind one [`tokio::sync::RwLock`].
//! Reads share the lock. Every mutation runs inside
//! [`SlotStore::unit_of_work`], which holds the write lock for the whole
//! read-validate-write sequence and commits all staged writes or none.

use std::collections::HashMap;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{RwLock, RwLockWriteGuard};

use super::unit_of_work::{UnitOfWork, WriteSet};
use crate::domain::{
    Event, EventId, SlotStatus, SwapRequest, SwapRequestId, SwapStatus, UserId, UserProfile,
};
use crate::error::SlotError;

/// Default upper bound on waiting for the write lock.
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(2);

/// Committed records. Only reachable through [`SlotStore::read`] and
/// [`UnitOfWork`].
#[derive(Debug, Default)]
pub struct StoreState {
    users: HashMap<UserId, UserProfile>,
    events: HashMap<EventId, Event>,
    requests: HashMap<SwapRequestId, SwapRequest>,
    in_flight: HashMap<EventId, SwapRequestId>,
}

impl StoreState {
    /// Looks up an event.
    #[must_use]
    pub fn event(&self, id: EventId) -> Option<&Event> {
        self.events.get(&id)
    }

    /// Events owned by `owner`, optionally filtered by status, ordered by
    /// start time ascending.
    #[must_use]
    pub fn events_owned_by(&self, owner: UserId, status: Option<SlotStatus>) -> Vec<Event> {
        let mut events: Vec<Event> = self
            .events
            .values()
            .filter(|e| e.is_owned_by(owner))
            .filter(|e| status.is_none_or(|s| e.status() == s))
            .cloned()
            .collect();
        events.sort_by_key(|e| (e.start_time, e.created_at));
        events
    }

    /// Swappable events not owned by `viewer`, ordered by start time.
    #[must_use]
    pub fn swappable_excluding(&self, viewer: UserId) -> Vec<Event> {
        let mut events: Vec<Event> = self
            .events
            .values()
            .filter(|e| e.status().is_swappable() && !e.is_owned_by(viewer))
            .cloned()
            .collect();
        events.sort_by_key(|e| (e.start_time, e.created_at));
        events
    }

    /// Looks up a swap request.
    #[must_use]
    pub fn swap_request(&self, id: SwapRequestId) -> Option<&SwapRequest> {
        self.requests.get(&id)
    }

    /// The pending request holding `event_id`, if any.
    #[must_use]
    pub fn pending_request_for(&self, event_id: EventId) -> Option<&SwapRequest> {
        self.in_flight
            .get(&event_id)
            .and_then(|id| self.requests.get(id))
    }

    /// Iterates over all swap requests in no particular order.
    pub fn swap_requests(&self) -> impl Iterator<Item = &SwapRequest> {
        self.requests.values()
    }

    /// Pending requests where `user` is the receiver, oldest first.
    #[must_use]
    pub fn incoming_pending(&self, user: UserId) -> Vec<SwapRequest> {
        self.requests_matching(|r| r.receiver == user && r.status() == SwapStatus::Pending)
    }

    /// All requests where `user` is the requester, oldest first.
    #[must_use]
    pub fn outgoing(&self, user: UserId) -> Vec<SwapRequest> {
        self.requests_matching(|r| r.requester == user)
    }

    fn requests_matching(&self, pred: impl Fn(&SwapRequest) -> bool) -> Vec<SwapRequest> {
        let mut requests: Vec<SwapRequest> =
            self.requests.values().filter(|r| pred(r)).cloned().collect();
        requests.sort_by_key(|r| r.created_at);
        requests
    }

    /// Looks up a profile.
    #[must_use]
    pub fn user(&self, id: UserId) -> Option<&UserProfile> {
        self.users.get(&id)
    }

    /// Looks up a profile by (lower-cased) email.
    #[must_use]
    pub fn user_by_email(&self, email: &str) -> Option<&UserProfile> {
        self.users.values().find(|u| u.email == email)
    }

    fn apply(&mut self, writes: WriteSet) {
        for (id, staged) in writes.events {
            match staged {
                Some(event) => {
                    self.events.insert(id, event);
                }
                None => {
                    self.events.remove(&id);
                }
            }
        }
        for (id, request) in writes.requests {
            for slot in [request.requester_slot, request.receiver_slot] {
                if request.status().is_terminal() {
                    if self.in_flight.get(&slot) == Some(&id) {
                        self.in_flight.remove(&slot);
                    }
                } else {
                    self.in_flight.insert(slot, id);
                }
            }
            self.requests.insert(id, request);
        }
        self.users.extend(writes.users);
    }
}

/// Shared store with all-or-nothing units of work.
#[derive(Debug)]
pub struct SlotStore {
    state: RwLock<StoreState>,
    lock_timeout: Duration,
}

impl SlotStore {
    /// Creates an empty store that waits at most `lock_timeout` to begin a
    /// unit of work.
    #[must_use]
    pub fn new(lock_timeout: Duration) -> Self {
        Self {
            state: RwLock::new(StoreState::default()),
            lock_timeout,
        }
    }

    /// Runs `f` against a consistent snapshot of committed state.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::StoreUnavailable`] if the read lock cannot be
    /// acquired within the configured timeout.
    pub async fn read<T>(&self, f: impl FnOnce(&StoreState) -> T) -> Result<T, SlotError> {
        let guard = tokio::time::timeout(self.lock_timeout, self.state.read())
            .await
            .map_err(|_| self.timed_out())?;
        Ok(f(&guard))
    }

    /// Runs `f` as one atomic unit of work.
    ///
    /// `f` reads and stages writes through the [`UnitOfWork`]. If it returns
    /// `Ok`, every staged write is committed before the lock is released;
    /// if it returns `Err`, nothing is written. Concurrent units of work are
    /// serialized, so a precondition checked inside `f` still holds when its
    /// writes commit.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `f`, or
    /// [`SlotError::StoreUnavailable`] if the write lock cannot be acquired
    /// within the configured timeout.
    pub async fn unit_of_work<T>(
        &self,
        f: impl FnOnce(&mut UnitOfWork<'_>) -> Result<T, SlotError>,
    ) -> Result<T, SlotError> {
        let mut guard = self.write_guard().await?;
        let (outcome, writes) = {
            let mut uow = UnitOfWork::new(&guard, Utc::now());
            let outcome = f(&mut uow);
            (outcome, uow.into_writes())
        };
        match outcome {
            Ok(value) => {
                let count = writes.len();
                guard.apply(writes);
                tracing::trace!(writes = count, "unit of work committed");
                Ok(value)
            }
            Err(err) => {
                tracing::debug!(discarded = writes.len(), error = %err, "unit of work rolled back");
                Err(err)
            }
        }
    }

    async fn write_guard(&self) -> Result<RwLockWriteGuard<'_, StoreState>, SlotError> {
        tokio::time::timeout(self.lock_timeout, self.state.write())
            .await
            .map_err(|_| self.timed_out())
    }

    fn timed_out(&self) -> SlotError {
        SlotError::StoreUnavailable(format!(
            "timed out after {} ms waiting for the store",
            self.lock_timeout.as_millis()
        ))
    }
}

impl Default for SlotStore {
    fn default() -> Self {
        Self::new(DEFAULT_LOCK_TIMEOUT)
    }
}
