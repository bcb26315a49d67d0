//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! responses; the domain only decides the [`ErrorCode`] and message.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::TraceId;

/// Header carrying the request trace identifier on responses.
pub const TRACE_ID_HEADER: &str = "Trace-Id";

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The acting username does not resolve to a known user.
    NotAuthenticated,
    /// A referenced user, organization, tender, or bid does not exist.
    NotFound,
    /// The actor lacks the responsibility or authorship the action needs.
    PermissionDenied,
    /// A status literal is outside the vocabulary allowed for the actor.
    InvalidStatusValue,
    /// A create request carried an initial status other than `Created`.
    InvalidCreationState,
    /// An active bid by the same author already exists on the tender.
    ConflictingBid,
    /// An organization attempted to bid on its own tender.
    SelfBidForbidden,
    /// The user is already responsible for the organization.
    AlreadyResponsible,
    /// The requested page lies outside the result set.
    PaginationOutOfRange,
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// The requested username is already registered.
    UsernameTaken,
    /// The store failed in a way the caller cannot act on.
    InternalFailure,
}

/// Domain error payload.
///
/// # Examples
/// ```
/// use tender_backend::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("tender doesn't exist");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    #[schema(example = "permission_denied")]
    code: ErrorCode,
    #[schema(example = "you aren't responsible for this organization")]
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

macro_rules! error_constructors {
    ($($(#[$meta:meta])* $name:ident => $code:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            pub fn $name(message: impl Into<String>) -> Self {
                Self::new(ErrorCode::$code, message)
            }
        )*
    };
}

impl Error {
    /// Create a new error, capturing the trace identifier in scope.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    error_constructors! {
        /// Convenience constructor for [`ErrorCode::NotAuthenticated`].
        not_authenticated => NotAuthenticated,
        /// Convenience constructor for [`ErrorCode::NotFound`].
        not_found => NotFound,
        /// Convenience constructor for [`ErrorCode::PermissionDenied`].
        permission_denied => PermissionDenied,
        /// Convenience constructor for [`ErrorCode::InvalidStatusValue`].
        invalid_status_value => InvalidStatusValue,
        /// Convenience constructor for [`ErrorCode::InvalidCreationState`].
        invalid_creation_state => InvalidCreationState,
        /// Convenience constructor for [`ErrorCode::ConflictingBid`].
        conflicting_bid => ConflictingBid,
        /// Convenience constructor for [`ErrorCode::SelfBidForbidden`].
        self_bid_forbidden => SelfBidForbidden,
        /// Convenience constructor for [`ErrorCode::AlreadyResponsible`].
        already_responsible => AlreadyResponsible,
        /// Convenience constructor for [`ErrorCode::PaginationOutOfRange`].
        pagination_out_of_range => PaginationOutOfRange,
        /// Convenience constructor for [`ErrorCode::InvalidRequest`].
        invalid_request => InvalidRequest,
        /// Convenience constructor for [`ErrorCode::UsernameTaken`].
        username_taken => UsernameTaken,
        /// Convenience constructor for [`ErrorCode::InternalFailure`].
        internal => InternalFailure,
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Correlation identifier captured when the error was raised.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Supplementary error details for adapters.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach a trace identifier to the error.
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Attach structured details to the error.
    ///
    /// # Examples
    /// ```
    /// use tender_backend::domain::Error;
    /// use serde_json::json;
    ///
    /// let err = Error::invalid_request("bad").with_details(json!({ "field": "status" }));
    /// assert!(err.details().is_some());
    /// ```
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests;
