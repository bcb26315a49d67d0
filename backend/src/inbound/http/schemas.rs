//! OpenAPI schema definitions for domain vocabularies.
//!
//! The closed vocabularies stay framework-agnostic and do not derive
//! `ToSchema`. DTO fields reference these wrappers through
//! `#[schema(value_type = ...)]` so the generated document lists the exact
//! canonical spellings.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::TenderStatus`].
#[derive(ToSchema)]
#[schema(as = TenderStatus)]
pub enum TenderStatusSchema {
    /// Drafted, visible only to the owning organization.
    Created,
    /// Open for bids and publicly listed.
    Published,
    /// No longer accepting bids.
    Closed,
}

/// OpenAPI schema for [`crate::domain::ServiceType`].
#[derive(ToSchema)]
#[schema(as = ServiceType)]
pub enum ServiceTypeSchema {
    /// Building work.
    Construction,
    /// Transport of goods.
    Delivery,
    /// Production of goods.
    Manufacture,
}

/// OpenAPI schema for [`crate::domain::BidStatus`].
#[derive(ToSchema)]
#[schema(as = BidStatus)]
pub enum BidStatusSchema {
    /// Drafted by its author.
    Created,
    /// Visible to the tender's organization.
    Published,
    /// Withdrawn by its author.
    Canceled,
    /// Accepted by the tender's organization.
    Approved,
    /// Declined by the tender's organization.
    Rejected,
}

/// OpenAPI schema for [`crate::domain::Decision`].
#[derive(ToSchema)]
#[schema(as = Decision)]
pub enum DecisionSchema {
    /// Accept the bid.
    Approved,
    /// Decline the bid.
    Rejected,
}

/// OpenAPI schema for [`crate::domain::AuthorType`].
#[derive(ToSchema)]
#[schema(as = AuthorType)]
pub enum AuthorTypeSchema {
    /// Personal bid.
    User,
    /// Bid on behalf of an organization.
    Responsible,
}

/// OpenAPI schema for [`crate::domain::OrganizationType`].
#[derive(ToSchema)]
#[schema(as = OrganizationType)]
pub enum OrganizationTypeSchema {
    /// Individual entrepreneur.
    #[schema(rename = "IE")]
    Ie,
    /// Limited liability company.
    #[schema(rename = "LLC")]
    Llc,
    /// Joint-stock company.
    #[schema(rename = "JSC")]
    Jsc,
}
