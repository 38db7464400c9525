//! Service layer: business logic orchestration.
//!
//! [`SwapService`] is the negotiation orchestrator; [`EventService`] covers
//! owner CRUD and the market listing; [`UserService`] resolves profiles.
//! All three are stateless and share one [`crate::store::SlotStore`].

pub mod event_service;
pub mod swap_service;
pub mod user_service;

pub use event_service::{DeletedEvent, EventService, EventUpdate, NewEvent, SlotListing};
pub use swap_service::{MyRequests, SwapRequestDetail, SwapService};
pub use user_service::UserService;
