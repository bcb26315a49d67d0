//! Driving port for bid mutations.

use async_trait::async_trait;

use crate::domain::{Bid, BidId, Error, OrganizationId, TenderId, Username};

/// Request to place a bid on a tender.
///
/// Without `organization_id` the bid is personal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateBidRequest {
    pub username: Username,
    pub tender_id: TenderId,
    pub organization_id: Option<OrganizationId>,
    pub name: String,
    pub description: String,
    /// Must spell `Created`; any other initial status is refused.
    pub status: String,
}

/// Request to move a bid to another status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionBidRequest {
    pub bid_id: BidId,
    pub username: Username,
    pub status: String,
}

/// Request from the tender's organization to approve or reject a bid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitDecisionRequest {
    pub bid_id: BidId,
    pub username: Username,
    pub decision: String,
}

/// Request to edit a bid's descriptive fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateBidRequest {
    pub bid_id: BidId,
    pub username: Username,
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Driving port for bid mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BidCommand: Send + Sync {
    /// Create a bid in status `Created` with version 1.
    async fn create(&self, request: CreateBidRequest) -> Result<Bid, Error>;

    /// Move a bid along its lifecycle on behalf of the creator or approver set.
    async fn transition_status(&self, request: TransitionBidRequest) -> Result<Bid, Error>;

    /// Approve or reject a published bid on behalf of the tender's organization.
    async fn submit_decision(&self, request: SubmitDecisionRequest) -> Result<Bid, Error>;

    /// Apply non-empty name/description and bump the version.
    async fn update(&self, request: UpdateBidRequest) -> Result<Bid, Error>;
}
