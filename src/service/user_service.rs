//! Minimal profile directory used to resolve public identities.

use std::sync::Arc;

use crate::domain::{UserId, UserProfile};
use crate::error::SlotError;
use crate::store::SlotStore;

/// Registers and looks up [`UserProfile`]s.
#[derive(Debug, Clone)]
pub struct UserService {
    store: Arc<SlotStore>,
}

impl UserService {
    /// Creates a new `UserService`.
    #[must_use]
    pub fn new(store: Arc<SlotStore>) -> Self {
        Self { store }
    }

    /// Registers a new profile.
    ///
    /// # Errors
    ///
    /// Returns a validation error for blank or malformed input and
    /// [`SlotError::EmailTaken`] if the email is already registered.
    pub async fn register_user(&self, name: &str, email: &str) -> Result<UserProfile, SlotError> {
        let profile = self
            .store
            .unit_of_work(|uow| {
                let profile = UserProfile::new(name, email, uow.now())?;
                if uow.email_registered(&profile.email) {
                    return Err(SlotError::EmailTaken(profile.email));
                }
                uow.put_user(profile.clone());
                Ok(profile)
            })
            .await?;
        tracing::info!(user_id = %profile.id, "user registered");
        Ok(profile)
    }

    /// Looks up a profile.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::UserNotFound`] if no profile exists.
    pub async fn get_user(&self, id: UserId) -> Result<UserProfile, SlotError> {
        self.store
            .read(|s| s.user(id).cloned())
            .await?
            .ok_or(SlotError::UserNotFound(id))
    }
}
