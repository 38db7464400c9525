//! Swap negotiation DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::common_dto::UserSummaryDto;
use super::event_dto::EventDto;
use crate::domain::{EventId, SwapRequest, SwapRequestId, SwapStatus, UserId};
use crate::service::{MyRequests, SwapRequestDetail};

/// Request body for `POST /swaps/swap-request`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ProposeSwapRequest {
    /// The caller's own swappable event.
    #[serde(default)]
    pub my_slot_id: Option<EventId>,
    /// The counterparty's swappable event.
    #[serde(default)]
    pub their_slot_id: Option<EventId>,
}

/// Request body for `POST /swaps/swap-response/{id}`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RespondSwapRequest {
    /// `true` to accept, `false` to reject.
    #[serde(default)]
    pub accepted: Option<bool>,
}

/// Swap request as returned by the API.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SwapRequestDto {
    /// Request identifier.
    pub id: SwapRequestId,
    /// User who proposed the swap.
    pub requester_id: UserId,
    /// User who must answer it.
    pub receiver_id: UserId,
    /// Event offered by the requester.
    pub requester_slot_id: EventId,
    /// Event requested from the receiver.
    pub receiver_slot_id: EventId,
    /// Negotiation status.
    pub status: SwapStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// When the request left `PENDING`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responded_at: Option<DateTime<Utc>>,
}

impl From<SwapRequest> for SwapRequestDto {
    fn from(request: SwapRequest) -> Self {
        Self {
            id: request.id,
            status: request.status(),
            requester_id: request.requester,
            receiver_id: request.receiver,
            requester_slot_id: request.requester_slot,
            receiver_slot_id: request.receiver_slot,
            created_at: request.created_at,
            updated_at: request.updated_at,
            responded_at: request.responded_at,
        }
    }
}

/// Swap request with both parties and both events resolved.
///
/// Parties or events that no longer exist are reported as `null`.
#[derive(Debug, Serialize, ToSchema)]
pub struct SwapRequestDetailDto {
    /// The request itself.
    pub request: SwapRequestDto,
    /// Requester profile.
    pub requester: Option<UserSummaryDto>,
    /// Receiver profile.
    pub receiver: Option<UserSummaryDto>,
    /// Offered event.
    pub requester_slot: Option<EventDto>,
    /// Requested event.
    pub receiver_slot: Option<EventDto>,
}

impl From<SwapRequestDetail> for SwapRequestDetailDto {
    fn from(detail: SwapRequestDetail) -> Self {
        Self {
            request: detail.request.into(),
            requester: detail.requester.map(Into::into),
            receiver: detail.receiver.map(Into::into),
            requester_slot: detail.requester_slot.map(Into::into),
            receiver_slot: detail.receiver_slot.map(Into::into),
        }
    }
}

/// Response body for `GET /swaps/my-requests`.
#[derive(Debug, Serialize, ToSchema)]
pub struct MyRequestsResponse {
    /// Pending requests awaiting the caller's answer, oldest first.
    pub incoming: Vec<SwapRequestDetailDto>,
    /// Every request the caller has made, oldest first.
    pub outgoing: Vec<SwapRequestDetailDto>,
}

impl From<MyRequests> for MyRequestsResponse {
    fn from(requests: MyRequests) -> Self {
        Self {
            incoming: requests.incoming.into_iter().map(Into::into).collect(),
            outgoing: requests.outgoing.into_iter().map(Into::into).collect(),
        }
    }
}
