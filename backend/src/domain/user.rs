//! Registered users and their login names.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::UserId;

/// Maximum username length accepted at registration.
pub const USERNAME_MAX: usize = 50;

/// Validation errors for [`Username`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsernameValidationError {
    /// The username was empty or whitespace only.
    #[error("username must not be empty")]
    Empty,
    /// The username carried leading or trailing whitespace.
    #[error("username must not start or end with whitespace")]
    SurroundingWhitespace,
    /// The username exceeded [`USERNAME_MAX`] characters.
    #[error("username must be at most {max} characters")]
    TooLong {
        /// Upper bound that was exceeded.
        max: usize,
    },
}

/// Unique login name identifying the acting user on every request.
///
/// # Examples
/// ```
/// use tender_backend::domain::Username;
///
/// let name = Username::new("alice").expect("valid username");
/// assert_eq!(name.as_ref(), "alice");
/// assert!(Username::new(" alice").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and wrap a username.
    ///
    /// # Errors
    ///
    /// Returns [`UsernameValidationError`] for empty, padded, or oversized
    /// input.
    pub fn new(raw: impl Into<String>) -> Result<Self, UsernameValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(UsernameValidationError::Empty);
        }
        if raw.trim() != raw {
            return Err(UsernameValidationError::SurroundingWhitespace);
        }
        if raw.chars().count() > USERNAME_MAX {
            return Err(UsernameValidationError::TooLong { max: USERNAME_MAX });
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Username {
    type Error = UsernameValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

/// A registered user. Immutable after registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
}

/// Fields needed to register a user; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: Username,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
}
