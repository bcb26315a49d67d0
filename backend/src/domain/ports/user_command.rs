//! Driving port for user registration.

use async_trait::async_trait;

use crate::domain::{Error, User, Username};

/// Request to register a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserRequest {
    pub username: Username,
    pub first_name: String,
    pub last_name: String,
}

/// Driving port for user registration.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserCommand: Send + Sync {
    /// Register a user; duplicate usernames are refused.
    async fn register(&self, request: RegisterUserRequest) -> Result<User, Error>;
}
