//! Driving port for bid reads.

use async_trait::async_trait;
use pagination::Page;

use crate::domain::{Bid, BidId, BidStatus, Error, TenderId, Username};

/// Request for a bid's current status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BidStatusRequest {
    pub bid_id: BidId,
    pub username: Username,
}

/// Request for the published bids on a tender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListTenderBidsRequest {
    pub tender_id: TenderId,
    pub username: Username,
    pub page: Page,
}

/// Request for the bids visible to one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListMyBidsRequest {
    pub username: Username,
    pub page: Page,
}

/// Driving port for bid reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BidQuery: Send + Sync {
    /// Status of a bid for its author, its organization, or the tender's
    /// organization once published.
    async fn get_status(&self, request: BidStatusRequest) -> Result<BidStatus, Error>;

    /// Published bids on a tender, for the tender's organization only.
    async fn list_for_tender(&self, request: ListTenderBidsRequest) -> Result<Vec<Bid>, Error>;

    /// Bids of the user's organizations followed by their personal bids.
    async fn list_mine(&self, request: ListMyBidsRequest) -> Result<Vec<Bid>, Error>;
}
