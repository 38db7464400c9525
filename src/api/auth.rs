//! Caller identity extraction.
//!
//! Authentication happens upstream; by the time a request reaches this
//! service the verified user id travels in the `X-User-Id` header.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::domain::UserId;
use crate::error::SlotError;

/// Header carrying the verified caller identity.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Reads the verified caller from `headers`.
///
/// Returns `Ok(None)` when the header is absent.
///
/// # Errors
///
/// Returns [`SlotError::Unauthenticated`] when the header is present but
/// does not hold a UUID.
pub fn verified_user(headers: &HeaderMap) -> Result<Option<UserId>, SlotError> {
    let Some(value) = headers.get(USER_ID_HEADER) else {
        return Ok(None);
    };
    let raw = value.to_str().map_err(|_| SlotError::Unauthenticated)?;
    let uuid = Uuid::parse_str(raw.trim()).map_err(|_| SlotError::Unauthenticated)?;
    Ok(Some(UserId::from_uuid(uuid)))
}

/// Extractor yielding the verified caller.
///
/// Rejects with [`SlotError::Unauthenticated`] when the header is absent or
/// does not hold a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser(pub UserId);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = SlotError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        verified_user(&parts.headers)?
            .map(Self)
            .ok_or(SlotError::Unauthenticated)
    }
}
