use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;

/// Per-request identity, passed explicitly into every service call.
///
/// A session may be anonymous; operations that need a user call
/// [`Session::require_user`].
#[derive(Debug, Clone, Default)]
pub struct Session {
    user: Option<AuthenticatedUser>,
}

impl Session {
    pub fn new(user: Option<AuthenticatedUser>) -> Self {
        Self { user }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(user: AuthenticatedUser) -> Self {
        Self { user: Some(user) }
    }

    pub fn user(&self) -> Option<&AuthenticatedUser> {
        self.user.as_ref()
    }

    pub fn user_id(&self) -> Option<Uuid> {
        self.user.as_ref().map(|u| u.user_id)
    }

    pub fn require_user(&self) -> Result<&AuthenticatedUser> {
        self.user
            .as_ref()
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))
    }
}

impl From<AuthenticatedUser> for Session {
    fn from(user: AuthenticatedUser) -> Self {
        Self::authenticated(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_session_requires_user() {
        let err = Session::anonymous().require_user().unwrap_err();
        assert_eq!(err.user_message(), "Authentication required");
    }

    #[test]
    fn test_authenticated_session_exposes_id() {
        let id = Uuid::new_v4();
        let session = Session::from(AuthenticatedUser::new(id));
        assert_eq!(session.user_id(), Some(id));
        assert_eq!(session.require_user().unwrap().user_id, id);
    }
}
