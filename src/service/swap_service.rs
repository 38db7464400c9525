//! Swap negotiation orchestrator.
//!
//! Every mutating operation is exactly one call into
//! [`SlotStore::unit_of_work`]: preconditions are checked and both events
//! plus the request are written inside the same closure, so either all of
//! them commit or none do. Notifications are sent only after commit and
//! never influence the result.

use std::sync::Arc;

use crate::domain::{
    Event, EventId, Notification, Notifier, SlotStatus, SlotTrigger, SwapDecision, SwapRequest,
    SwapRequestId, UserId, UserProfile,
};
use crate::error::SlotError;
use crate::store::{SlotStore, UnitOfWork};

/// Name used in notification text when the requester has no profile.
const ANONYMOUS_NAME: &str = "another user";

/// A swap request with both events and both participants resolved.
#[derive(Debug, Clone)]
pub struct SwapRequestDetail {
    /// The request itself.
    pub request: SwapRequest,
    /// Requester profile, if registered.
    pub requester: Option<UserProfile>,
    /// Receiver profile, if registered.
    pub receiver: Option<UserProfile>,
    /// Event offered by the requester, if it still exists.
    pub requester_slot: Option<Event>,
    /// Event targeted by the requester, if it still exists.
    pub receiver_slot: Option<Event>,
}

/// The caller's swap requests split by direction.
#[derive(Debug, Clone, Default)]
pub struct MyRequests {
    /// Pending requests awaiting the caller's response.
    pub incoming: Vec<SwapRequestDetail>,
    /// Every request the caller has made.
    pub outgoing: Vec<SwapRequestDetail>,
}

/// Coordinates proposal and response for swap requests.
///
/// Stateless between calls: owns only references to the [`SlotStore`] and
/// the injected [`Notifier`].
#[derive(Debug, Clone)]
pub struct SwapService {
    store: Arc<SlotStore>,
    notifier: Arc<dyn Notifier>,
}

impl SwapService {
    /// Creates a new `SwapService`.
    #[must_use]
    pub fn new(store: Arc<SlotStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self { store, notifier }
    }

    /// Proposes trading `offered` (owned by `requester`) for `target`.
    ///
    /// On success both events are `SWAP_PENDING` and the target's owner is
    /// notified.
    ///
    /// # Errors
    ///
    /// In order of checking: [`SlotError::EventNotFound`] for either event,
    /// [`SlotError::NotEventOwner`] if `requester` does not own `offered`,
    /// [`SlotError::SelfSwap`] if `requester` owns `target`,
    /// [`SlotError::SlotNotSwappable`] if either event is off the market,
    /// [`SlotError::SlotEngaged`] if either event already backs a pending
    /// request, or [`SlotError::StoreUnavailable`].
    pub async fn propose_swap(
        &self,
        requester: UserId,
        offered: EventId,
        target: EventId,
    ) -> Result<SwapRequest, SlotError> {
        let (request, requester_name) = self
            .store
            .unit_of_work(|uow| {
                let mut offered_event =
                    uow.event(offered).ok_or(SlotError::EventNotFound(offered))?;
                let mut target_event = uow.event(target).ok_or(SlotError::EventNotFound(target))?;

                if !offered_event.is_owned_by(requester) {
                    return Err(SlotError::NotEventOwner(offered));
                }
                if target_event.is_owned_by(requester) {
                    return Err(SlotError::SelfSwap);
                }
                for event in [&offered_event, &target_event] {
                    ensure_swappable(uow, event)?;
                }

                offered_event.transition(SlotTrigger::Propose)?;
                target_event.transition(SlotTrigger::Propose)?;

                let request = SwapRequest::new(
                    requester,
                    target_event.owner(),
                    offered,
                    target,
                    uow.now(),
                );
                uow.put_event(offered_event);
                uow.put_event(target_event);
                uow.put_swap_request(request.clone());

                let name = uow
                    .user(requester)
                    .map_or_else(|| ANONYMOUS_NAME.to_string(), |u| u.name);
                Ok((request, name))
            })
            .await?;

        tracing::info!(
            request_id = %request.id,
            %requester,
            receiver = %request.receiver,
            %offered,
            %target,
            "swap proposed"
        );
        self.notifier.notify(
            request.receiver,
            Notification::swap_requested(&requester_name, request.id),
        );
        Ok(request)
    }

    /// Accepts or rejects a pending request on behalf of its receiver.
    ///
    /// Accepting exchanges the owners of the two events and returns both to
    /// `BUSY`; rejecting returns both to `SWAPPABLE` with owners unchanged.
    /// The requester is notified after commit.
    ///
    /// # Errors
    ///
    /// In order of checking: [`SlotError::SwapRequestNotFound`],
    /// [`SlotError::NotSwapReceiver`] unless `responder` is the receiver,
    /// [`SlotError::AlreadyResponded`] if the request is terminal,
    /// [`SlotError::ReferencedEventMissing`] if either event was deleted,
    /// or [`SlotError::StoreUnavailable`]. Any failure leaves every record
    /// unchanged.
    pub async fn respond_to_swap(
        &self,
        request_id: SwapRequestId,
        responder: UserId,
        accepted: bool,
    ) -> Result<SwapRequest, SlotError> {
        let decision = SwapDecision::from_accepted(accepted);
        let (request, offered_title) = self
            .store
            .unit_of_work(|uow| {
                let mut request = uow
                    .swap_request(request_id)
                    .ok_or(SlotError::SwapRequestNotFound(request_id))?;
                if request.receiver != responder {
                    return Err(SlotError::NotSwapReceiver(request_id));
                }
                request.resolve(decision, uow.now())?;

                let missing = |event_id| SlotError::ReferencedEventMissing {
                    request_id,
                    event_id,
                };
                let mut requester_slot = uow
                    .event(request.requester_slot)
                    .ok_or_else(|| missing(request.requester_slot))?;
                let mut receiver_slot = uow
                    .event(request.receiver_slot)
                    .ok_or_else(|| missing(request.receiver_slot))?;

                let trigger = decision.slot_trigger();
                requester_slot.transition(trigger)?;
                receiver_slot.transition(trigger)?;
                if decision == SwapDecision::Accept {
                    requester_slot.reassign(request.receiver);
                    receiver_slot.reassign(request.requester);
                }

                let offered_title = requester_slot.title.clone();
                uow.put_event(requester_slot);
                uow.put_event(receiver_slot);
                uow.put_swap_request(request.clone());
                Ok((request, offered_title))
            })
            .await?;

        tracing::info!(
            %request_id,
            requester = %request.requester,
            receiver = %request.receiver,
            status = %request.status(),
            "swap responded"
        );
        self.notifier.notify(
            request.requester,
            Notification::swap_answered(&offered_title, accepted, request_id),
        );
        Ok(request)
    }

    /// Lists the caller's incoming pending and outgoing requests.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::StoreUnavailable`] if the store cannot be read.
    pub async fn list_my_requests(&self, user: UserId) -> Result<MyRequests, SlotError> {
        self.store
            .read(|s| {
                let detail = |request: SwapRequest| SwapRequestDetail {
                    requester: s.user(request.requester).cloned(),
                    receiver: s.user(request.receiver).cloned(),
                    requester_slot: s.event(request.requester_slot).cloned(),
                    receiver_slot: s.event(request.receiver_slot).cloned(),
                    request,
                };
                MyRequests {
                    incoming: s.incoming_pending(user).into_iter().map(detail).collect(),
                    outgoing: s.outgoing(user).into_iter().map(detail).collect(),
                }
            })
            .await
    }
}

/// Checks that `event` can enter a new swap: it is `SWAPPABLE` and no
/// pending request already holds it.
fn ensure_swappable(uow: &UnitOfWork<'_>, event: &Event) -> Result<(), SlotError> {
    if event.status() != SlotStatus::Swappable {
        return Err(SlotError::SlotNotSwappable {
            event_id: event.id,
            status: event.status(),
        });
    }
    if uow.pending_request_for(event.id).is_some() {
        return Err(SlotError::SlotEngaged(event.id));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use tokio_test::{assert_err, assert_ok};

    use super::*;
    use crate::domain::event::tests::at;
    use crate::domain::notification::tests::RecordingNotifier;
    use crate::domain::{NotificationKind, SwapStatus};
    use crate::error::ErrorKind;
    use crate::service::{EventService, EventUpdate, NewEvent, UserService};

    struct Fixture {
        events: EventService,
        swaps: SwapService,
        users: UserService,
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
            users: UserService::new(Arc::clone(&store)),
            notifier,
            store,
        }
    }

    async fn create(fx: &Fixture, owner: UserId, title: &str, hour: u32, market: bool) -> Event {
        let input = NewEvent {
            title: title.to_string(),
            start_time: at(hour, 0),
            end_time: at(hour, 30),
        };
        let event = assert_ok!(fx.events.create_event(owner, input).await);
        if !market {
            return event;
        }
        let update = EventUpdate {
            status: Some(SlotStatus::Swappable),
            ..EventUpdate::default()
        };
        assert_ok!(fx.events.update_event(owner, event.id, update).await)
    }

    async fn snapshot(fx: &Fixture, id: EventId) -> Event {
        let Ok(Some(event)) = fx.store.read(|s| s.event(id).cloned()).await else {
            panic!("event {id} missing");
        };
        event
    }

    /// A offers "Standup" (10:00) for B's "Review" (14:00).
    async fn standup_for_review(fx: &Fixture) -> (UserId, UserId, Event, Event, SwapRequest) {
        let a = assert_ok!(fx.users.register_user("Alice", "alice@example.com").await).id;
        let b = assert_ok!(fx.users.register_user("Bob", "bob@example.com").await).id;
        let x = create(fx, a, "Standup", 10, true).await;
        let y = create(fx, b, "Review", 14, true).await;
        let request = assert_ok!(fx.swaps.propose_swap(a, x.id, y.id).await);
        (a, b, x, y, request)
    }

    #[tokio::test]
    async fn proposal_locks_both_events_and_notifies_receiver() {
        let fx = fixture();
        let (a, b, x, y, request) = standup_for_review(&fx).await;

        assert_eq!(request.status(), SwapStatus::Pending);
        assert_eq!(request.requester, a);
        assert_eq!(request.receiver, b);
        assert_eq!(snapshot(&fx, x.id).await.status(), SlotStatus::SwapPending);
        assert_eq!(snapshot(&fx, y.id).await.status(), SlotStatus::SwapPending);

        let sent = fx.notifier.sent();
        assert_eq!(sent.len(), 1);
        let Some((recipient, notification)) = sent.first() else {
            panic!("expected notification");
        };
        assert_eq!(*recipient, b);
        assert_eq!(notification.kind, NotificationKind::Request);
        assert_eq!(notification.message, "You have a new swap request from Alice!");
    }

    #[tokio::test]
    async fn accept_exchanges_owners() {
        let fx = fixture();
        let (a, b, x, y, request) = standup_for_review(&fx).await;

        let answered = assert_ok!(fx.swaps.respond_to_swap(request.id, b, true).await);
        assert_eq!(answered.status(), SwapStatus::Accepted);

        let (x_after, y_after) = (snapshot(&fx, x.id).await, snapshot(&fx, y.id).await);
        assert_eq!(x_after.owner(), b);
        assert_eq!(y_after.owner(), a);
        assert_eq!(x_after.status(), SlotStatus::Busy);
        assert_eq!(y_after.status(), SlotStatus::Busy);

        let a_events = assert_ok!(fx.events.list_my_events(a, None).await);
        let b_events = assert_ok!(fx.events.list_my_events(b, None).await);
        assert_eq!(a_events.len(), 1);
        assert_eq!(b_events.len(), 1);
        assert!(a_events.iter().any(|e| e.title == "Review"));
        assert!(b_events.iter().any(|e| e.title == "Standup"));

        let sent = fx.notifier.sent();
        let Some((recipient, notification)) = sent.last() else {
            panic!("expected response notification");
        };
        assert_eq!(*recipient, a);
        assert_eq!(notification.message, "Your swap for \"Standup\" was accepted!");
    }

    #[tokio::test]
    async fn reject_returns_both_to_market() {
        let fx = fixture();
        let (a, b, x, y, request) = standup_for_review(&fx).await;

        let answered = assert_ok!(fx.swaps.respond_to_swap(request.id, b, false).await);
        assert_eq!(answered.status(), SwapStatus::Rejected);

        let (x_after, y_after) = (snapshot(&fx, x.id).await, snapshot(&fx, y.id).await);
        assert_eq!(x_after.owner(), a);
        assert_eq!(y_after.owner(), b);
        assert_eq!(x_after.status(), SlotStatus::Swappable);
        assert_eq!(y_after.status(), SlotStatus::Swappable);
    }

    #[tokio::test]
    async fn second_response_is_validation_error_without_effect() {
        let fx = fixture();
        let (_, b, x, _, request) = standup_for_review(&fx).await;
        let _ = assert_ok!(fx.swaps.respond_to_swap(request.id, b, true).await);
        let before = snapshot(&fx, x.id).await;

        let err = assert_err!(fx.swaps.respond_to_swap(request.id, b, false).await);
        assert!(matches!(err, SlotError::AlreadyResponded { .. }));
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(snapshot(&fx, x.id).await, before);
    }

    #[tokio::test]
    async fn only_receiver_may_respond() {
        let fx = fixture();
        let (a, _, x, _, request) = standup_for_review(&fx).await;

        let err = assert_err!(fx.swaps.respond_to_swap(request.id, a, true).await);
        assert!(matches!(err, SlotError::NotSwapReceiver(_)));
        let err = assert_err!(fx.swaps.respond_to_swap(request.id, UserId::new(), true).await);
        assert_eq!(err.kind(), ErrorKind::Authorization);
        assert_eq!(snapshot(&fx, x.id).await.status(), SlotStatus::SwapPending);
    }

    #[tokio::test]
    async fn unknown_request_is_not_found() {
        let fx = fixture();
        let err = assert_err!(
            fx.swaps
                .respond_to_swap(SwapRequestId::new(), UserId::new(), true)
                .await
        );
        assert!(matches!(err, SlotError::SwapRequestNotFound(_)));
    }

    #[tokio::test]
    async fn offering_someone_elses_event_is_forbidden() {
        let fx = fixture();
        let (a, b, c) = (UserId::new(), UserId::new(), UserId::new());
        let not_mine = create(&fx, b, "Bob's", 9, true).await;
        let target = create(&fx, c, "Carol's", 11, true).await;

        let err = assert_err!(fx.swaps.propose_swap(a, not_mine.id, target.id).await);
        assert!(matches!(err, SlotError::NotEventOwner(_)));
        assert_eq!(err.kind(), ErrorKind::Authorization);
        assert_eq!(snapshot(&fx, not_mine.id).await.status(), SlotStatus::Swappable);
        assert_eq!(snapshot(&fx, target.id).await.status(), SlotStatus::Swappable);
        let mine = assert_ok!(fx.swaps.list_my_requests(a).await);
        assert!(mine.outgoing.is_empty());
    }

    #[tokio::test]
    async fn self_swap_is_rejected() {
        let fx = fixture();
        let a = UserId::new();
        let x = create(&fx, a, "One", 9, true).await;
        let y = create(&fx, a, "Two", 11, true).await;
        let err = assert_err!(fx.swaps.propose_swap(a, x.id, y.id).await);
        assert!(matches!(err, SlotError::SelfSwap));
    }

    #[tokio::test]
    async fn busy_event_cannot_be_proposed() {
        let fx = fixture();
        let (a, b) = (UserId::new(), UserId::new());
        let x = create(&fx, a, "Offered", 9, true).await;
        let busy = create(&fx, b, "Busy", 11, false).await;

        let err = assert_err!(fx.swaps.propose_swap(a, x.id, busy.id).await);
        assert!(matches!(
            err,
            SlotError::SlotNotSwappable {
                status: SlotStatus::Busy,
                ..
            }
        ));
        assert_eq!(snapshot(&fx, x.id).await.status(), SlotStatus::Swappable);
    }

    #[tokio::test]
    async fn missing_event_is_not_found() {
        let fx = fixture();
        let a = UserId::new();
        let x = create(&fx, a, "Offered", 9, true).await;
        let err = assert_err!(fx.swaps.propose_swap(a, x.id, EventId::new()).await);
        assert!(matches!(err, SlotError::EventNotFound(_)));
    }

    #[tokio::test]
    async fn offered_event_backs_at_most_one_request() {
        let fx = fixture();
        let (a, b, c) = (UserId::new(), UserId::new(), UserId::new());
        let x = create(&fx, a, "Offered", 9, true).await;
        let y = create(&fx, b, "First", 11, true).await;
        let z = create(&fx, c, "Second", 13, true).await;

        let _ = assert_ok!(fx.swaps.propose_swap(a, x.id, y.id).await);
        let err = assert_err!(fx.swaps.propose_swap(a, x.id, z.id).await);
        assert!(matches!(err, SlotError::SlotNotSwappable { .. }));
        assert_eq!(snapshot(&fx, z.id).await.status(), SlotStatus::Swappable);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_proposals_for_same_target_have_one_winner() {
        let fx = fixture();
        let (a, b, c) = (UserId::new(), UserId::new(), UserId::new());
        let xa = create(&fx, a, "From A", 9, true).await;
        let xc = create(&fx, c, "From C", 10, true).await;
        let y = create(&fx, b, "Target", 14, true).await;

        let (from_a, from_c, target) = (xa.id, xc.id, y.id);
        let first = fx.swaps.clone();
        let second = fx.swaps.clone();
        let (r1, r2) = tokio::join!(
            tokio::spawn(async move { first.propose_swap(a, from_a, target).await }),
            tokio::spawn(async move { second.propose_swap(c, from_c, target).await }),
        );
        let (Ok(r1), Ok(r2)) = (r1, r2) else {
            panic!("proposal task panicked");
        };

        let outcomes = [r1, r2];
        assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
        let Some(Err(loser)) = outcomes.iter().find(|r| r.is_err()) else {
            panic!("expected one failure");
        };
        assert_eq!(loser.kind(), ErrorKind::Validation);

        let pending = assert_ok!(
            fx.store
                .read(|s| s
                    .swap_requests()
                    .filter(|r| r.references(target) && r.status() == SwapStatus::Pending)
                    .count())
                .await
        );
        assert_eq!(pending, 1);
    }

    async fn stored_request(fx: &Fixture, id: SwapRequestId) -> SwapRequest {
        let Ok(Some(request)) = fx.store.read(|s| s.swap_request(id).cloned()).await else {
            panic!("request {id} missing");
        };
        request
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_responses_resolve_exactly_once() {
        for _ in 0..50 {
            let fx = fixture();
            let (a, b, x, y, request) = standup_for_review(&fx).await;
            let request_id = request.id;

            let accept = fx.swaps.clone();
            let reject = fx.swaps.clone();
            let (r1, r2) = tokio::join!(
                tokio::spawn(async move { accept.respond_to_swap(request_id, b, true).await }),
                tokio::spawn(async move { reject.respond_to_swap(request_id, b, false).await }),
            );
            let (Ok(accepted), Ok(rejected)) = (r1, r2) else {
                panic!("response task panicked");
            };
            assert_ne!(accepted.is_ok(), rejected.is_ok());
            let loser = if accepted.is_ok() { rejected } else { accepted };
            let err = assert_err!(loser);
            assert!(matches!(err, SlotError::AlreadyResponded { .. }));

            let stored = stored_request(&fx, request_id).await;
            let (x_now, y_now) = (snapshot(&fx, x.id).await, snapshot(&fx, y.id).await);
            match stored.status() {
                SwapStatus::Accepted => {
                    assert_eq!((x_now.owner(), y_now.owner()), (b, a));
                    assert_eq!(
                        (x_now.status(), y_now.status()),
                        (SlotStatus::Busy, SlotStatus::Busy)
                    );
                }
                SwapStatus::Rejected => {
                    assert_eq!((x_now.owner(), y_now.owner()), (a, b));
                    assert_eq!(
                        (x_now.status(), y_now.status()),
                        (SlotStatus::Swappable, SlotStatus::Swappable)
                    );
                }
                other => panic!("unexpected status {other}"),
            }
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn delete_racing_accept_leaves_one_consistent_outcome() {
        for _ in 0..50 {
            let fx = fixture();
            let (a, b, x, y, request) = standup_for_review(&fx).await;
            let (request_id, offered) = (request.id, x.id);

            let events = fx.events.clone();
            let swaps = fx.swaps.clone();
            let (deleted, accepted) = tokio::join!(
                tokio::spawn(async move { events.delete_event(a, offered).await }),
                tokio::spawn(async move { swaps.respond_to_swap(request_id, b, true).await }),
            );
            let (Ok(deleted), Ok(accepted)) = (deleted, accepted) else {
                panic!("task panicked");
            };
            assert_ne!(deleted.is_ok(), accepted.is_ok());

            let stored = stored_request(&fx, request_id).await;
            let y_now = snapshot(&fx, y.id).await;
            let x_now = fx.store.read(|s| s.event(x.id).cloned()).await;
            match stored.status() {
                SwapStatus::Cancelled => {
                    let err = assert_err!(accepted);
                    assert!(matches!(err, SlotError::AlreadyResponded { .. }));
                    assert!(matches!(x_now, Ok(None)));
                    assert_eq!(y_now.owner(), b);
                    assert_eq!(y_now.status(), SlotStatus::Swappable);
                }
                SwapStatus::Accepted => {
                    let err = assert_err!(deleted);
                    assert!(matches!(err, SlotError::NotEventOwner(_)));
                    let Ok(Some(x_now)) = x_now else {
                        panic!("accepted swap lost the offered event");
                    };
                    assert_eq!((x_now.owner(), y_now.owner()), (b, a));
                    assert_eq!(
                        (x_now.status(), y_now.status()),
                        (SlotStatus::Busy, SlotStatus::Busy)
                    );
                }
                other => panic!("unexpected status {other}"),
            }
            let in_flight = fx
                .store
                .read(|s| s.pending_request_for(y.id).is_some())
                .await;
            assert!(matches!(in_flight, Ok(false)));
        }
    }

    #[tokio::test]
    async fn response_after_event_deleted_elsewhere_is_not_found() {
        let fx = fixture();
        let (_, b, x, _, request) = standup_for_review(&fx).await;
        let _ = assert_ok!(
            fx.store
                .unit_of_work(|uow| {
                    uow.delete_event(x.id);
                    Ok(())
                })
                .await
        );

        let err = assert_err!(fx.swaps.respond_to_swap(request.id, b, true).await);
        assert!(matches!(err, SlotError::ReferencedEventMissing { .. }));
        let still_pending = assert_ok!(
            fx.store
                .read(|s| s.swap_request(request.id).map(SwapRequest::status))
                .await
        );
        assert_eq!(still_pending, Some(SwapStatus::Pending));
    }

    #[tokio::test]
    async fn my_requests_split_by_direction() {
        let fx = fixture();
        let (a, b, _, _, request) = standup_for_review(&fx).await;

        let a_view = assert_ok!(fx.swaps.list_my_requests(a).await);
        assert!(a_view.incoming.is_empty());
        assert_eq!(a_view.outgoing.len(), 1);

        let b_view = assert_ok!(fx.swaps.list_my_requests(b).await);
        assert_eq!(b_view.incoming.len(), 1);
        let Some(detail) = b_view.incoming.first() else {
            panic!("expected incoming request");
        };
        assert_eq!(detail.request.id, request.id);
        assert_eq!(detail.requester.as_ref().map(|u| u.name.as_str()), Some("Alice"));
        assert_eq!(
            detail.requester_slot.as_ref().map(|e| e.title.as_str()),
            Some("Standup")
        );

        let _ = assert_ok!(fx.swaps.respond_to_swap(request.id, b, false).await);
        let b_view = assert_ok!(fx.swaps.list_my_requests(b).await);
        assert!(b_view.incoming.is_empty());
        let a_view = assert_ok!(fx.swaps.list_my_requests(a).await);
        assert_eq!(
            a_view.outgoing.first().map(|d| d.request.status()),
            Some(SwapStatus::Rejected)
        );
    }
}
