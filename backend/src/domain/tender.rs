//! Tenders: procurement requests owned by an organization.
//!
//! A tender moves through [`TenderStatus`] values but the store enforces no
//! adjacency; any responsible user may set any status. Only `Published`
//! tenders appear in the public listing.

use chrono::{DateTime, Utc};

use super::vocabulary::closed_vocabulary;
use super::{OrganizationId, TenderId, UserId};

closed_vocabulary! {
    /// Lifecycle status of a tender.
    TenderStatus ("tender status") {
        /// Drafted, visible only to the owning organization.
        Created => "Created",
        /// Open for bids and publicly listed.
        Published => "Published",
        /// No longer accepting bids.
        Closed => "Closed",
    }
}

closed_vocabulary! {
    /// Category of work requested by a tender.
    ServiceType ("service type") {
        /// Building work.
        Construction => "Construction",
        /// Transport of goods.
        Delivery => "Delivery",
        /// Production of goods.
        Manufacture => "Manufacture",
    }
}

/// A procurement request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tender {
    pub id: TenderId,
    pub name: String,
    pub description: String,
    pub service_type: ServiceType,
    pub status: TenderStatus,
    /// Starts at 1 and increases by exactly one per successful mutation.
    pub version: i32,
    pub organization_id: OrganizationId,
    pub creator_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// Validated tender fields ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTender {
    pub name: String,
    pub description: String,
    pub service_type: ServiceType,
    pub organization_id: OrganizationId,
    pub creator_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// Partial tender edit; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TenderChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub service_type: Option<ServiceType>,
}

impl TenderChanges {
    /// Apply the edit to an in-memory tender without touching its version.
    pub fn apply_to(&self, tender: &mut Tender) {
        if let Some(name) = &self.name {
            tender.name.clone_from(name);
        }
        if let Some(description) = &self.description {
            tender.description.clone_from(description);
        }
        if let Some(service_type) = self.service_type {
            tender.service_type = service_type;
        }
    }
}
