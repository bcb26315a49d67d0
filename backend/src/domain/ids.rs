//! Store-assigned integer identifiers.
//!
//! Every entity table uses a `SERIAL` primary key, so each identifier is an
//! `i32` newtype. Distinct types keep a tender id from being passed where a
//! bid id is expected.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
            ToSchema,
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Wrap a raw identifier.
            #[must_use]
            pub const fn new(raw: i32) -> Self {
                Self(raw)
            }

            /// Raw identifier value.
            #[must_use]
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl From<i32> for $name {
            fn from(raw: i32) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

define_id!(
    /// Identifier of a registered user.
    UserId
);
define_id!(
    /// Identifier of an organization.
    OrganizationId
);
define_id!(
    /// Identifier of a tender.
    TenderId
);
define_id!(
    /// Identifier of a bid.
    BidId
);
