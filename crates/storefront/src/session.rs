//! Explicit authenticated identity.
//!
//! The identity provider itself (login, registration, token refresh) is an
//! external capability. The engine only ever sees the outcome: a session that
//! either carries a user id or does not. Operations that need an identity
//! take it as an explicit parameter; `Session::require_user` is the single
//! place where "not signed in" becomes an error, before any remote call.

use greenbasket_core::UserId;

use crate::error::{Result, StorefrontError};

/// The authentication outcome a screen operates under.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<UserId>,
}

impl Session {
    /// A session for a signed-in user.
    #[must_use]
    pub fn signed_in(user: UserId) -> Self {
        Self { user: Some(user) }
    }

    /// A session with nobody signed in.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { user: None }
    }

    /// The signed-in user, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&UserId> {
        self.user.as_ref()
    }

    /// The signed-in user, or [`StorefrontError::NotSignedIn`].
    ///
    /// # Errors
    ///
    /// Returns `NotSignedIn` for an anonymous session.
    pub fn require_user(&self) -> Result<&UserId> {
        self.user.as_ref().ok_or(StorefrontError::NotSignedIn)
    }
}

impl From<Option<UserId>> for Session {
    fn from(user: Option<UserId>) -> Self {
        Self { user }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_user_signed_in() {
        let session = Session::signed_in(UserId::new("u1"));
        assert_eq!(session.require_user().expect("signed in").as_str(), "u1");
    }

    #[test]
    fn test_require_user_anonymous_is_a_precondition_error() {
        let session = Session::anonymous();
        assert!(matches!(
            session.require_user(),
            Err(StorefrontError::NotSignedIn)
        ));
    }
}
