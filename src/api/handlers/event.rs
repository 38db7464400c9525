//! Event handlers: create, list, update, delete.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};

use crate::api::auth::AuthUser;
use crate::api::dto::{
    CreateEventRequest, DeleteEventResponse, EventDto, MyEventsQuery, UpdateEventRequest,
};
use crate::app_state::AppState;
use crate::domain::EventId;
use crate::error::{ErrorResponse, SlotError};

/// `POST /events` — Create an event owned by the caller.
///
/// # Errors
///
/// Returns [`SlotError`] on a missing field, blank title, or inverted
/// interval.
#[utoipa::path(
    post,
    path = "/api/v1/events",
    tag = "Events",
    summary = "Create an event",
    description = "Creates a calendar event owned by the caller. New events start as BUSY.",
    params(("x-user-id" = String, Header, description = "Verified caller id")),
    request_body = CreateEventRequest,
    responses(
        (status = 201, description = "Event created", body = EventDto),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Missing identity", body = ErrorResponse),
    )
)]
pub async fn create_event(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    payload: Result<Json<CreateEventRequest>, JsonRejection>,
) -> Result<impl IntoResponse, SlotError> {
    let Json(req) = payload?;
    let event = state
        .event_service
        .create_event(caller, req.into_new_event()?)
        .await?;
    Ok((StatusCode::CREATED, Json(EventDto::from(event))))
}

/// `GET /events/my-events` — List the caller's events.
///
/// # Errors
///
/// Returns [`SlotError`] on a bad status filter.
#[utoipa::path(
    get,
    path = "/api/v1/events/my-events",
    tag = "Events",
    summary = "List my events",
    description = "Returns the caller's events in chronological order, optionally filtered by status.",
    params(
        ("x-user-id" = String, Header, description = "Verified caller id"),
        MyEventsQuery,
    ),
    responses(
        (status = 200, description = "Caller's events", body = Vec<EventDto>),
        (status = 401, description = "Missing identity", body = ErrorResponse),
    )
)]
pub async fn list_my_events(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    query: Result<Query<MyEventsQuery>, QueryRejection>,
) -> Result<impl IntoResponse, SlotError> {
    let Query(query) = query?;
    let events = state
        .event_service
        .list_my_events(caller, query.status)
        .await?;
    let data: Vec<EventDto> = events.into_iter().map(EventDto::from).collect();
    Ok(Json(data))
}

/// `PUT /events/{id}` — Update one of the caller's events.
///
/// # Errors
///
/// Returns [`SlotError`] when the event is missing, foreign, engaged in a
/// pending swap, changed concurrently, or the new values are invalid.
#[utoipa::path(
    put,
    path = "/api/v1/events/{id}",
    tag = "Events",
    summary = "Update an event",
    description = "Partially updates title, interval, or status. Status may only move between BUSY and SWAPPABLE. Supplying `expected_version` turns the update into a compare-and-set.",
    params(
        ("x-user-id" = String, Header, description = "Verified caller id"),
        ("id" = String, Path, description = "Event identifier"),
    ),
    request_body = UpdateEventRequest,
    responses(
        (status = 200, description = "Updated event", body = EventDto),
        (status = 400, description = "Invalid change", body = ErrorResponse),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "Unknown event", body = ErrorResponse),
        (status = 409, description = "Version conflict", body = ErrorResponse),
    )
)]
pub async fn update_event(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    path: Result<Path<EventId>, PathRejection>,
    payload: Result<Json<UpdateEventRequest>, JsonRejection>,
) -> Result<impl IntoResponse, SlotError> {
    let Path(id) = path?;
    let Json(req) = payload?;
    let event = state
        .event_service
        .update_event(caller, id, req.into())
        .await?;
    Ok(Json(EventDto::from(event)))
}

/// `DELETE /events/{id}` — Delete one of the caller's events.
///
/// # Errors
///
/// Returns [`SlotError`] when the event is missing or foreign.
#[utoipa::path(
    delete,
    path = "/api/v1/events/{id}",
    tag = "Events",
    summary = "Delete an event",
    description = "Deletes the event. If it backs a pending swap request, that request is cancelled, the counterpart event returns to SWAPPABLE, and the counterparty is notified.",
    params(
        ("x-user-id" = String, Header, description = "Verified caller id"),
        ("id" = String, Path, description = "Event identifier"),
    ),
    responses(
        (status = 200, description = "Event deleted", body = DeleteEventResponse),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "Unknown event", body = ErrorResponse),
    )
)]
pub async fn delete_event(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    path: Result<Path<EventId>, PathRejection>,
) -> Result<impl IntoResponse, SlotError> {
    let Path(id) = path?;
    let deleted = state.event_service.delete_event(caller, id).await?;
    Ok(Json(DeleteEventResponse::from(deleted)))
}

/// Event routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/events", post(create_event))
        .route("/events/my-events", get(list_my_events))
        .route("/events/{id}", put(update_event).delete(delete_event))
}
