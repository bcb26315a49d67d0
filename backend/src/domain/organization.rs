//! Organizations and their legal form.

use chrono::{DateTime, Utc};

use super::OrganizationId;
use super::vocabulary::closed_vocabulary;

closed_vocabulary! {
    /// Legal form of an organization.
    OrganizationType ("organization type") {
        /// Individual entrepreneur.
        Ie => "IE",
        /// Limited liability company.
        Llc => "LLC",
        /// Joint-stock company.
        Jsc => "JSC",
    }
}

/// An organization that may own tenders and submit bids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organization {
    pub id: OrganizationId,
    pub name: String,
    pub description: String,
    pub organization_type: OrganizationType,
    pub created_at: DateTime<Utc>,
}

/// Organization fields without the store-assigned id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizationDraft {
    pub name: String,
    pub description: String,
    pub organization_type: OrganizationType,
}
