//! Per-connection identity binding.

use crate::domain::{Dispatch, UserId};
use crate::error::SlotError;

/// Tracks which user, if any, a WebSocket connection speaks for.
///
/// Each connection holds its own session, so one user may be connected from
/// several sockets and every one of them receives the user's notifications.
/// A session opened with a verified identity can only ever bind to that
/// user.
#[derive(Debug, Default)]
pub struct ClientSession {
    user: Option<UserId>,
    verified: Option<UserId>,
}

impl ClientSession {
    /// Creates an anonymous session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session bound to `verified` from the start, or an anonymous
    /// one when the upgrade carried no identity.
    #[must_use]
    pub const fn with_verified(verified: Option<UserId>) -> Self {
        Self {
            user: verified,
            verified,
        }
    }

    /// Binds the session to `user`, returning the previous binding.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::IdentityMismatch`] if the session is verified as
    /// a different user; the binding is left unchanged.
    pub fn identify(&mut self, user: UserId) -> Result<Option<UserId>, SlotError> {
        if let Some(verified) = self.verified
            && verified != user
        {
            return Err(SlotError::IdentityMismatch {
                verified,
                asserted: user,
            });
        }
        Ok(self.user.replace(user))
    }

    /// Clears the binding, returning it.
    pub fn forget(&mut self) -> Option<UserId> {
        self.user.take()
    }

    /// The bound user.
    #[must_use]
    pub const fn user(&self) -> Option<UserId> {
        self.user
    }

    /// Whether `dispatch` should be delivered on this connection.
    #[must_use]
    pub fn matches(&self, dispatch: &Dispatch) -> bool {
        self.user == Some(dispatch.recipient)
    }
}
