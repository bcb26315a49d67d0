//! Driving port for user directory reads.

use async_trait::async_trait;

use crate::domain::{Error, OrganizationId, User, Username};

/// Driving port for user directory reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserQuery: Send + Sync {
    /// Look up a user by username.
    async fn get(&self, username: Username) -> Result<User, Error>;

    /// Organizations the user is responsible for.
    async fn responsible_organizations(
        &self,
        username: Username,
    ) -> Result<Vec<OrganizationId>, Error>;
}
