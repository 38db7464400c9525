//! Event request/response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::common_dto::{UserSummaryDto, required};
use crate::domain::{Event, EventId, SlotStatus, SwapRequestId, UserId};
use crate::error::SlotError;
use crate::service::{DeletedEvent, EventUpdate, NewEvent, SlotListing};

/// Request body for `POST /events`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateEventRequest {
    /// Event title.
    #[serde(default)]
    pub title: Option<String>,
    /// Start of the interval (ISO-8601).
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    /// End of the interval (ISO-8601).
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
}

impl CreateEventRequest {
    /// Converts into service input, reporting the first missing field.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::MissingField`] for an absent field.
    pub fn into_new_event(self) -> Result<NewEvent, SlotError> {
        Ok(NewEvent {
            title: required(self.title, "title")?,
            start_time: required(self.start_time, "start_time")?,
            end_time: required(self.end_time, "end_time")?,
        })
    }
}

/// Request body for `PUT /events/{id}`. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateEventRequest {
    /// New title.
    #[serde(default)]
    pub title: Option<String>,
    /// New start time.
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    /// New end time.
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    /// New status; only `BUSY` and `SWAPPABLE` may be set directly.
    #[serde(default)]
    pub status: Option<SlotStatus>,
    /// Version the caller last saw; the update fails on mismatch.
    #[serde(default)]
    pub expected_version: Option<u64>,
}

impl From<UpdateEventRequest> for EventUpdate {
    fn from(req: UpdateEventRequest) -> Self {
        Self {
            title: req.title,
            start_time: req.start_time,
            end_time: req.end_time,
            status: req.status,
            expected_version: req.expected_version,
        }
    }
}

/// Query parameters for `GET /events/my-events`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MyEventsQuery {
    /// Restrict the listing to one status.
    #[serde(default)]
    pub status: Option<SlotStatus>,
}

/// Event as returned by the API.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EventDto {
    /// Event identifier.
    pub id: EventId,
    /// Current owner.
    pub owner_id: UserId,
    /// Title.
    pub title: String,
    /// Start of the interval.
    pub start_time: DateTime<Utc>,
    /// End of the interval.
    pub end_time: DateTime<Utc>,
    /// Market status.
    pub status: SlotStatus,
    /// Optimistic concurrency version.
    pub version: u64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<Event> for EventDto {
    fn from(event: Event) -> Self {
        Self {
            id: event.id,
            owner_id: event.owner(),
            status: event.status(),
            version: event.version(),
            title: event.title,
            start_time: event.start_time,
            end_time: event.end_time,
            created_at: event.created_at,
            updated_at: event.updated_at,
        }
    }
}

/// A market listing: a swappable event plus its owner's public identity.
#[derive(Debug, Serialize, ToSchema)]
pub struct SwappableSlotDto {
    /// The event on offer.
    pub event: EventDto,
    /// Owner profile, absent if the owner never registered one.
    pub owner: Option<UserSummaryDto>,
}

impl From<SlotListing> for SwappableSlotDto {
    fn from(listing: SlotListing) -> Self {
        Self {
            event: listing.event.into(),
            owner: listing.owner.map(Into::into),
        }
    }
}

/// Response body for `DELETE /events/{id}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteEventResponse {
    /// Confirmation message.
    pub message: String,
    /// The removed event.
    pub event_id: EventId,
    /// Pending request cancelled by the deletion, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancelled_request_id: Option<SwapRequestId>,
}

impl From<DeletedEvent> for DeleteEventResponse {
    fn from(deleted: DeletedEvent) -> Self {
        Self {
            message: "Event deleted".to_string(),
            event_id: deleted.event_id,
            cancelled_request_id: deleted.cancelled_request,
        }
    }
}
