//! Domain layer: identifiers, the slot and swap state machines, aggregates,
//! and notification dispatch.
//!
//! Status legality lives in exactly two tables,
//! [`slot_status::next_status`] and [`swap_status::next_swap_status`];
//! everything else calls through them.

pub mod event;
pub mod ids;
pub mod notification;
pub mod notification_bus;
pub mod slot_status;
pub mod swap_request;
pub mod swap_status;
pub mod user;

pub use event::Event;
pub use ids::{EventId, SwapRequestId, UserId};
pub use notification::{Dispatch, Notification, NotificationKind, Notifier};
pub use notification_bus::NotificationBus;
pub use slot_status::{SlotStatus, SlotTrigger};
pub use swap_request::SwapRequest;
pub use swap_status::{SwapDecision, SwapStatus};
pub use user::UserProfile;
