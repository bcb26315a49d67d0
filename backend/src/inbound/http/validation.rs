//! Shared validation helpers for inbound HTTP adapters.

use pagination::{Page, PageError};
use serde_json::json;

use crate::domain::{Error, Username};

/// Validation error codes placed in `details.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    MissingField,
    NegativeValue,
    InvalidUsername,
}

impl ValidationCode {
    const fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::NegativeValue => "negative_value",
            Self::InvalidUsername => "invalid_username",
        }
    }
}

/// HTTP-facing field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    const fn as_str(self) -> &'static str {
        self.0
    }
}

fn invalid(field: FieldName, code: ValidationCode, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

/// Resolve the `username` query parameter carried by most operations.
///
/// A missing or blank parameter is a malformed request. A name that cannot
/// belong to any registered user is reported exactly like an unknown one.
pub(crate) fn require_username(raw: Option<String>) -> Result<Username, Error> {
    let field = FieldName::new("username");
    let raw = raw.filter(|value| !value.trim().is_empty()).ok_or_else(|| {
        invalid(
            field,
            ValidationCode::MissingField,
            "you must specify parameter 'username'",
        )
    })?;
    acting_username(raw, field)
}

/// Validate the name of the user performing an operation.
///
/// Malformed names can never resolve to a registered user, so they fail with
/// `NotAuthenticated` wherever the acting user is named.
pub(crate) fn acting_username(raw: String, field: FieldName) -> Result<Username, Error> {
    Username::new(raw).map_err(|_| {
        Error::not_authenticated("you aren't authorized").with_details(json!({
            "field": field.as_str(),
            "code": ValidationCode::InvalidUsername.as_str(),
        }))
    })
}

/// Validate a username supplied in a request body or path.
pub(crate) fn parse_username(raw: String, field: FieldName) -> Result<Username, Error> {
    Username::new(raw).map_err(|err| invalid(field, ValidationCode::InvalidUsername, err.to_string()))
}

/// Build a page window from the `limit`/`offset` query parameters.
pub(crate) fn parse_page(limit: Option<i64>, offset: Option<i64>) -> Result<Page, Error> {
    Page::new(limit, offset).map_err(|err| {
        let field = match err {
            PageError::NegativeLimit(_) => FieldName::new("limit"),
            PageError::NegativeOffset(_) => FieldName::new("offset"),
        };
        invalid(field, ValidationCode::NegativeValue, err.to_string())
    })
}

/// Require a non-empty text field.
pub(crate) fn require_text(raw: Option<String>, field: FieldName) -> Result<String, Error> {
    raw.filter(|value| !value.is_empty()).ok_or_else(|| {
        invalid(
            field,
            ValidationCode::MissingField,
            format!("you must specify field '{}'", field.as_str()),
        )
    })
}
