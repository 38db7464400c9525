//! User directory handlers.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{RegisterUserRequest, UserDto, required};
use crate::app_state::AppState;
use crate::domain::UserId;
use crate::error::{ErrorResponse, SlotError};

/// `POST /users` — Register a profile.
///
/// # Errors
///
/// Returns [`SlotError`] on missing fields or a duplicate email.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "Users",
    summary = "Register a user profile",
    description = "Creates a directory entry used to display names and emails in listings and notifications. The returned id is the value callers send in `X-User-Id`.",
    request_body = RegisterUserRequest,
    responses(
        (status = 201, description = "Profile registered", body = UserDto),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
    )
)]
pub async fn register_user(
    State(state): State<AppState>,
    payload: Result<Json<RegisterUserRequest>, JsonRejection>,
) -> Result<impl IntoResponse, SlotError> {
    let Json(req) = payload?;
    let name = required(req.name, "name")?;
    let email = required(req.email, "email")?;
    let profile = state.user_service.register_user(&name, &email).await?;
    Ok((StatusCode::CREATED, Json(UserDto::from(profile))))
}

/// `GET /users/{id}` — Fetch a profile.
///
/// # Errors
///
/// Returns [`SlotError::UserNotFound`] for an unknown id.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    summary = "Get a user profile",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Profile", body = UserDto),
        (status = 404, description = "Unknown user", body = ErrorResponse),
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    path: Result<Path<UserId>, PathRejection>,
) -> Result<impl IntoResponse, SlotError> {
    let Path(id) = path?;
    let profile = state.user_service.get_user(id).await?;
    Ok(Json(UserDto::from(profile)))
}

/// User routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(register_user))
        .route("/users/{id}", get(get_user))
}
