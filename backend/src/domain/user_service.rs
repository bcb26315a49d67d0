//! User registration and directory lookups.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use super::ports::{RegisterUserRequest, UserCommand, UserQuery, UserRepository};
use super::repository_errors::map_user_error;
use super::{Error, NewUser, OrganizationId, User, Username};

/// User service implementing the user driving ports.
pub struct UserService<U> {
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<U: UserRepository> UserService<U> {
    /// Create a new service over the user store.
    pub fn new(users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self { users, clock }
    }

    async fn lookup(&self, username: &Username) -> Result<User, Error> {
        self.users
            .find_by_username(username)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found("user with this username is not exist"))
    }
}

#[async_trait]
impl<U: UserRepository> UserCommand for UserService<U> {
    async fn register(&self, request: RegisterUserRequest) -> Result<User, Error> {
        let user = self
            .users
            .create(&NewUser {
                username: request.username,
                first_name: request.first_name,
                last_name: request.last_name,
                created_at: self.clock.utc(),
            })
            .await
            .map_err(map_user_error)?;
        info!(user_id = %user.id, username = %user.username, "user registered");
        Ok(user)
    }
}

#[async_trait]
impl<U: UserRepository> UserQuery for UserService<U> {
    async fn get(&self, username: Username) -> Result<User, Error> {
        self.lookup(&username).await
    }

    async fn responsible_organizations(
        &self,
        username: Username,
    ) -> Result<Vec<OrganizationId>, Error> {
        let user = self.lookup(&username).await?;
        self.users
            .responsible_organization_ids(user.id)
            .await
            .map_err(map_user_error)
    }
}
