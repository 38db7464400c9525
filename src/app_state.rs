//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::{NotificationBus, Notifier};
use crate::persistence::PostgresJournal;
use crate::service::{EventService, SwapService, UserService};
use crate::store::SlotStore;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Event CRUD and market listing.
    pub event_service: Arc<EventService>,
    /// Swap negotiation orchestrator.
    pub swap_service: Arc<SwapService>,
    /// Profile directory.
    pub user_service: Arc<UserService>,
    /// Notification bus for WebSocket subscriptions.
    pub notification_bus: NotificationBus,
    /// Notification journal, when persistence is enabled.
    pub journal: Option<PostgresJournal>,
}

impl AppState {
    /// Wires the services around one store and one notification bus.
    #[must_use]
    pub fn new(
        store: Arc<SlotStore>,
        notification_bus: NotificationBus,
        journal: Option<PostgresJournal>,
    ) -> Self {
        let notifier: Arc<dyn Notifier> = Arc::new(notification_bus.clone());
        Self {
            event_service: Arc::new(EventService::new(Arc::clone(&store), Arc::clone(&notifier))),
            swap_service: Arc::new(SwapService::new(Arc::clone(&store), notifier)),
            user_service: Arc::new(UserService::new(store)),
            notification_bus,
            journal,
        }
    }
}
