//! Shared DTO types used across multiple endpoints.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{UserId, UserProfile};

/// Public identity of a user, embedded in listings and request details.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserSummaryDto {
    /// User identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
}

impl From<UserProfile> for UserSummaryDto {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id,
            name: profile.name,
            email: profile.email,
        }
    }
}

/// Unwraps an optional request field or reports it as missing.
///
/// # Errors
///
/// Returns [`crate::error::SlotError::MissingField`] when `value` is `None`.
pub fn required<T>(value: Option<T>, field: &'static str) -> Result<T, crate::error::SlotError> {
    value.ok_or(crate::error::SlotError::MissingField(field))
}
