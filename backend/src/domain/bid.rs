//! Bids: offers submitted against a tender.
//!
//! A bid is either personal (authored by a user on their own behalf) or made
//! for an organization the author is responsible for. That origin is fixed at
//! creation and determines [`AuthorType`].
//!
//! Two actor groups may move a bid between statuses:
//!
//! - the *creator set* (the author, or anyone responsible for the bid's
//!   organization) may choose among [`BidStatus::CREATOR_SETTABLE`];
//! - the *approver set* (anyone responsible for the tender's organization)
//!   may choose among [`BidStatus::APPROVER_SETTABLE`], and only while the
//!   bid is `Published`.

use chrono::{DateTime, Utc};

use super::vocabulary::closed_vocabulary;
use super::{BidId, OrganizationId, TenderId, UserId};

closed_vocabulary! {
    /// Lifecycle status of a bid.
    BidStatus ("bid status") {
        /// Drafted by its author.
        Created => "Created",
        /// Visible to the tender's organization.
        Published => "Published",
        /// Withdrawn by its author.
        Canceled => "Canceled",
        /// Accepted by the tender's organization.
        Approved => "Approved",
        /// Declined by the tender's organization.
        Rejected => "Rejected",
    }
}

impl BidStatus {
    /// Statuses the creator set may choose.
    pub const CREATOR_SETTABLE: &'static [Self] = &[Self::Created, Self::Published, Self::Canceled];

    /// Statuses the approver set may choose.
    pub const APPROVER_SETTABLE: &'static [Self] = &[Self::Approved, Self::Rejected];

    /// Whether the creator set may choose this status.
    #[must_use]
    pub fn is_creator_settable(self) -> bool {
        Self::CREATOR_SETTABLE.contains(&self)
    }

    /// Whether the approver set may choose this status.
    #[must_use]
    pub fn is_approver_settable(self) -> bool {
        Self::APPROVER_SETTABLE.contains(&self)
    }

    /// Whether the bid has provably been published to the tender's
    /// organization. `Canceled` is excluded since a draft can be canceled
    /// without ever being published.
    #[must_use]
    pub const fn is_visible_to_approvers(self) -> bool {
        matches!(self, Self::Published | Self::Approved | Self::Rejected)
    }
}

closed_vocabulary! {
    /// Outcome chosen by the tender's organization.
    Decision ("decision") {
        /// Accept the bid.
        Approved => "Approved",
        /// Decline the bid.
        Rejected => "Rejected",
    }
}

impl From<Decision> for BidStatus {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Approved => Self::Approved,
            Decision::Rejected => Self::Rejected,
        }
    }
}

closed_vocabulary! {
    /// Whether a bid was placed personally or for an organization.
    AuthorType ("author type") {
        /// Personal bid.
        User => "User",
        /// Bid on behalf of an organization.
        Responsible => "Responsible",
    }
}

/// Who a bid speaks for. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BidOrigin {
    /// The author bids on their own behalf.
    Personal,
    /// The author bids for an organization they are responsible for.
    Organization(OrganizationId),
}

impl BidOrigin {
    /// Author type implied by the origin.
    #[must_use]
    pub const fn author_type(self) -> AuthorType {
        match self {
            Self::Personal => AuthorType::User,
            Self::Organization(_) => AuthorType::Responsible,
        }
    }

    /// Bidding organization, if any.
    #[must_use]
    pub const fn organization_id(self) -> Option<OrganizationId> {
        match self {
            Self::Personal => None,
            Self::Organization(id) => Some(id),
        }
    }
}

impl From<Option<OrganizationId>> for BidOrigin {
    fn from(value: Option<OrganizationId>) -> Self {
        value.map_or(Self::Personal, Self::Organization)
    }
}

/// An offer against a tender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bid {
    pub id: BidId,
    pub name: String,
    pub description: String,
    pub status: BidStatus,
    /// Starts at 1 and increases by exactly one per successful mutation.
    pub version: i32,
    pub tender_id: TenderId,
    pub creator_id: UserId,
    pub origin: BidOrigin,
    pub created_at: DateTime<Utc>,
}

impl Bid {
    /// Author type derived from the bid's origin.
    #[must_use]
    pub const fn author_type(&self) -> AuthorType {
        self.origin.author_type()
    }

    /// Whether the bid still counts towards the one-active-bid rule.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status != BidStatus::Canceled
    }
}

/// Validated bid fields ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBid {
    pub name: String,
    pub description: String,
    pub tender_id: TenderId,
    pub creator_id: UserId,
    pub origin: BidOrigin,
    pub created_at: DateTime<Utc>,
}

/// Partial bid edit; only the descriptive fields are editable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BidChanges {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl BidChanges {
    /// Apply the edit to an in-memory bid without touching its version.
    pub fn apply_to(&self, bid: &mut Bid) {
        if let Some(name) = &self.name {
            bid.name.clone_from(name);
        }
        if let Some(description) = &self.description {
            bid.description.clone_from(description);
        }
    }
}
