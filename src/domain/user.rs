//! Public user profile, resolved for listings and notification text.

use chrono::{DateTime, Utc};

use super::UserId;
use crate::error::SlotError;

/// Public identity of a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    /// User identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Contact email, stored lower-cased.
    pub email: String,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    /// Builds a profile from raw registration input.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::MissingField`] for a blank name or email and
    /// [`SlotError::InvalidRequest`] for an email without `@`.
    pub fn new(name: &str, email: &str, now: DateTime<Utc>) -> Result<Self, SlotError> {
        let name = name.trim();
        let email = email.trim().to_lowercase();
        if name.is_empty() {
            return Err(SlotError::MissingField("name"));
        }
        if email.is_empty() {
            return Err(SlotError::MissingField("email"));
        }
        if !email.contains('@') {
            return Err(SlotError::InvalidRequest(format!("invalid email: {email}")));
        }
        Ok(Self {
            id: UserId::new(),
            name: name.to_string(),
            email,
            created_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_normalised() {
        let profile = UserProfile::new("Ada", "  Ada@Example.COM ", Utc::now());
        assert!(matches!(profile, Ok(ref p) if p.email == "ada@example.com"));
    }

    #[test]
    fn rejects_blank_or_malformed_input() {
        assert!(UserProfile::new(" ", "a@b.c", Utc::now()).is_err());
        assert!(UserProfile::new("Ada", "", Utc::now()).is_err());
        assert!(UserProfile::new("Ada", "not-an-email", Utc::now()).is_err());
    }
}
