//! Port for registered-user lookups and registration.

use async_trait::async_trait;

use crate::domain::{NewUser, OrganizationId, User, UserId, Username};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "user repository query failed: {message}",
        /// Another user already holds the username.
        DuplicateUsername { username: String } =>
            "username {username} is already registered",
    }
}

/// Port for reading and registering users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by exact username.
    async fn find_by_username(&self, username: &Username)
    -> Result<Option<User>, UserRepositoryError>;

    /// Insert a user and return it with its assigned id.
    async fn create(&self, user: &NewUser) -> Result<User, UserRepositoryError>;

    /// Organizations the user is responsible for, in store order.
    async fn responsible_organization_ids(
        &self,
        user_id: UserId,
    ) -> Result<Vec<OrganizationId>, UserRepositoryError>;
}
