//! OpenAPI document assembled from the handler annotations.

use utoipa::OpenApi;

use crate::api::dto::{
    CreateEventRequest, DeleteEventResponse, EventDto, MyRequestsResponse, NotificationEntryDto,
    NotificationListResponse, ProposeSwapRequest, RegisterUserRequest, RespondSwapRequest,
    SwapRequestDetailDto, SwapRequestDto, SwappableSlotDto, UpdateEventRequest, UserDto,
    UserSummaryDto,
};
use crate::api::handlers::{event, notification, swap, system, user};
use crate::domain::{NotificationKind, SlotStatus, SwapStatus};
use crate::error::{ErrorBody, ErrorKind, ErrorResponse};

/// OpenAPI description of the REST surface.
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "slot-swapper", description = "Peer-to-peer calendar slot swap negotiation"),
    paths(
        user::register_user,
        user::get_user,
        event::create_event,
        event::list_my_events,
        event::update_event,
        event::delete_event,
        swap::list_swappable_slots,
        swap::propose_swap,
        swap::respond_to_swap,
        swap::list_my_requests,
        notification::list_notifications,
        system::health_handler,
    ),
    components(schemas(
        CreateEventRequest,
        UpdateEventRequest,
        EventDto,
        SwappableSlotDto,
        DeleteEventResponse,
        ProposeSwapRequest,
        RespondSwapRequest,
        SwapRequestDto,
        SwapRequestDetailDto,
        MyRequestsResponse,
        RegisterUserRequest,
        UserDto,
        UserSummaryDto,
        NotificationEntryDto,
        NotificationListResponse,
        SlotStatus,
        SwapStatus,
        NotificationKind,
        ErrorResponse,
        ErrorBody,
        ErrorKind,
    )),
    tags(
        (name = "Users", description = "Profile directory"),
        (name = "Events", description = "Calendar events owned by the caller"),
        (name = "Swaps", description = "Market listing and swap negotiation"),
        (name = "Notifications", description = "Journaled notification history"),
        (name = "System", description = "Health"),
    )
)]
pub struct ApiDoc;
