//! User directory DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{UserId, UserProfile};

/// Request body for `POST /users`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterUserRequest {
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Contact email; unique across the directory.
    #[serde(default)]
    pub email: Option<String>,
}

/// Full user profile.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserDto {
    /// User identifier, used as the `X-User-Id` header value.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<UserProfile> for UserDto {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id,
            name: profile.name,
            email: profile.email,
            created_at: profile.created_at,
        }
    }
}
