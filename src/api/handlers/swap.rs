//! Swap negotiation handlers: market listing, propose, respond, history.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::auth::AuthUser;
use crate::api::dto::{
    MyRequestsResponse, ProposeSwapRequest, RespondSwapRequest, SwapRequestDto, SwappableSlotDto,
    required,
};
use crate::app_state::AppState;
use crate::domain::SwapRequestId;
use crate::error::{ErrorResponse, SlotError};

/// `GET /swaps/swappable-slots` — Other users' swappable events.
///
/// # Errors
///
/// Returns [`SlotError`] if the store is unavailable.
#[utoipa::path(
    get,
    path = "/api/v1/swaps/swappable-slots",
    tag = "Swaps",
    summary = "Browse the market",
    description = "Returns every SWAPPABLE event not owned by the caller, annotated with its owner's public identity.",
    params(("x-user-id" = String, Header, description = "Verified caller id")),
    responses(
        (status = 200, description = "Market listing", body = Vec<SwappableSlotDto>),
        (status = 401, description = "Missing identity", body = ErrorResponse),
    )
)]
pub async fn list_swappable_slots(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> Result<impl IntoResponse, SlotError> {
    let listings = state.event_service.list_swappable_slots(caller).await?;
    let data: Vec<SwappableSlotDto> = listings.into_iter().map(Into::into).collect();
    Ok(Json(data))
}

/// `POST /swaps/swap-request` — Propose a swap.
///
/// # Errors
///
/// Returns [`SlotError`] when either event is missing, not swappable, or
/// not owned by the expected party.
#[utoipa::path(
    post,
    path = "/api/v1/swaps/swap-request",
    tag = "Swaps",
    summary = "Propose a swap",
    description = "Offers the caller's SWAPPABLE event in exchange for another user's SWAPPABLE event. Both events become SWAP_PENDING and the receiver is notified.",
    params(("x-user-id" = String, Header, description = "Verified caller id")),
    request_body = ProposeSwapRequest,
    responses(
        (status = 201, description = "Request created", body = SwapRequestDto),
        (status = 400, description = "An event is not swappable", body = ErrorResponse),
        (status = 403, description = "Offered event is not the caller's", body = ErrorResponse),
        (status = 404, description = "Unknown event", body = ErrorResponse),
    )
)]
pub async fn propose_swap(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    payload: Result<Json<ProposeSwapRequest>, JsonRejection>,
) -> Result<impl IntoResponse, SlotError> {
    let Json(req) = payload?;
    let offered = required(req.my_slot_id, "my_slot_id")?;
    let target = required(req.their_slot_id, "their_slot_id")?;
    let request = state
        .swap_service
        .propose_swap(caller, offered, target)
        .await?;
    Ok((StatusCode::CREATED, Json(SwapRequestDto::from(request))))
}

/// `POST /swaps/swap-response/{id}` — Accept or reject a request.
///
/// # Errors
///
/// Returns [`SlotError`] when the request is missing, addressed to someone
/// else, already answered, or references a deleted event.
#[utoipa::path(
    post,
    path = "/api/v1/swaps/swap-response/{id}",
    tag = "Swaps",
    summary = "Respond to a swap request",
    description = "Only the receiver may respond. Accepting exchanges ownership of both events and marks them BUSY; rejecting returns both to SWAPPABLE. The requester is notified either way.",
    params(
        ("x-user-id" = String, Header, description = "Verified caller id"),
        ("id" = String, Path, description = "Swap request identifier"),
    ),
    request_body = RespondSwapRequest,
    responses(
        (status = 200, description = "Request resolved", body = SwapRequestDto),
        (status = 400, description = "Already responded", body = ErrorResponse),
        (status = 403, description = "Not the receiver", body = ErrorResponse),
        (status = 404, description = "Unknown request or event", body = ErrorResponse),
    )
)]
pub async fn respond_to_swap(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    path: Result<Path<SwapRequestId>, PathRejection>,
    payload: Result<Json<RespondSwapRequest>, JsonRejection>,
) -> Result<impl IntoResponse, SlotError> {
    let Path(id) = path?;
    let Json(req) = payload?;
    let accepted = required(req.accepted, "accepted")?;
    let request = state
        .swap_service
        .respond_to_swap(id, caller, accepted)
        .await?;
    Ok(Json(SwapRequestDto::from(request)))
}

/// `GET /swaps/my-requests` — The caller's incoming and outgoing requests.
///
/// # Errors
///
/// Returns [`SlotError`] if the store is unavailable.
#[utoipa::path(
    get,
    path = "/api/v1/swaps/my-requests",
    tag = "Swaps",
    summary = "List my swap requests",
    description = "Incoming lists pending requests awaiting the caller's answer. Outgoing lists every request the caller made, in any status.",
    params(("x-user-id" = String, Header, description = "Verified caller id")),
    responses(
        (status = 200, description = "Caller's requests", body = MyRequestsResponse),
        (status = 401, description = "Missing identity", body = ErrorResponse),
    )
)]
pub async fn list_my_requests(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> Result<impl IntoResponse, SlotError> {
    let requests = state.swap_service.list_my_requests(caller).await?;
    Ok(Json(MyRequestsResponse::from(requests)))
}

/// Swap routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/swaps/swappable-slots", get(list_swappable_slots))
        .route("/swaps/swap-request", post(propose_swap))
        .route("/swaps/swap-response/{id}", post(respond_to_swap))
        .route("/swaps/my-requests", get(list_my_requests))
}
