//! Translation of driven-port failures into domain errors.
//!
//! Store failures are opaque to callers: the detail goes to the log and the
//! client sees a generic internal failure. Only the signals the domain can
//! act on (duplicate username, existing responsibility) keep their meaning.

use tracing::warn;

use super::Error;
use super::ports::{
    BidRepositoryError, OrganizationRepositoryError, TenderRepositoryError, UserRepositoryError,
};

const INTERNAL_MESSAGE: &str = "internal server error, please try again later";

fn store_failure(error: &dyn std::error::Error) -> Error {
    warn!(error = %error, "repository operation failed");
    Error::internal(INTERNAL_MESSAGE)
}

pub(crate) fn map_user_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::DuplicateUsername { username } => {
            Error::username_taken(format!("username {username} is already reserved"))
        }
        other => store_failure(&other),
    }
}

pub(crate) fn map_organization_error(error: OrganizationRepositoryError) -> Error {
    match error {
        OrganizationRepositoryError::AlreadyResponsible { .. } => {
            Error::already_responsible("user is already responsible for this organization")
        }
        other => store_failure(&other),
    }
}

pub(crate) fn map_tender_error(error: TenderRepositoryError) -> Error {
    store_failure(&error)
}

pub(crate) fn map_bid_error(error: BidRepositoryError) -> Error {
    store_failure(&error)
}
