//! Resolves the acting username carried by every request.

use std::sync::Arc;

use tracing::debug;

use super::ports::UserRepository;
use super::repository_errors::map_user_error;
use super::{Error, User, Username};

/// Maps a username to its registered [`User`].
pub struct IdentityResolver<U> {
    users: Arc<U>,
}

impl<U> Clone for IdentityResolver<U> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
        }
    }
}

impl<U: UserRepository> IdentityResolver<U> {
    /// Create a resolver over the user repository.
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }

    /// Resolve the acting user.
    ///
    /// # Errors
    ///
    /// `NotAuthenticated` when no user holds the username; `InternalFailure`
    /// when the store fails.
    pub async fn resolve(&self, username: &Username) -> Result<User, Error> {
        self.users
            .find_by_username(username)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| {
                debug!(%username, "unknown acting username");
                Error::not_authenticated("you aren't authorized")
            })
    }
}
