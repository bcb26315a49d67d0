//! Port for bid persistence.

use async_trait::async_trait;
use pagination::Page;

use crate::domain::{Bid, BidChanges, BidId, BidStatus, NewBid, OrganizationId, TenderId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by bid repository adapters.
    pub enum BidRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "bid repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "bid repository query failed: {message}",
    }
}

/// Port for storing and querying bids.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BidRepository: Send + Sync {
    /// Insert a bid with status `Created` and version 1.
    async fn create(&self, bid: &NewBid) -> Result<Bid, BidRepositoryError>;

    /// Find a bid by id.
    async fn find_by_id(&self, id: BidId) -> Result<Option<Bid>, BidRepositoryError>;

    /// Published bids on the tender ordered by name, windowed by `page`.
    async fn list_published_for_tender(
        &self,
        tender_id: TenderId,
        page: Page,
    ) -> Result<Vec<Bid>, BidRepositoryError>;

    /// Every bid placed for the organization, ordered by name.
    async fn list_for_organization(
        &self,
        organization_id: OrganizationId,
    ) -> Result<Vec<Bid>, BidRepositoryError>;

    /// Every personal bid authored by the user, ordered by name.
    async fn list_personal_for_creator(
        &self,
        creator_id: UserId,
    ) -> Result<Vec<Bid>, BidRepositoryError>;

    /// Whether the user holds a non-canceled personal bid on the tender.
    async fn user_has_bid(
        &self,
        tender_id: TenderId,
        creator_id: UserId,
    ) -> Result<bool, BidRepositoryError>;

    /// Whether the organization holds a non-canceled bid on the tender.
    async fn organization_has_bid(
        &self,
        tender_id: TenderId,
        organization_id: OrganizationId,
    ) -> Result<bool, BidRepositoryError>;

    /// Set the status and bump the version; `None` when the bid is gone.
    async fn update_status(
        &self,
        id: BidId,
        status: BidStatus,
    ) -> Result<Option<Bid>, BidRepositoryError>;

    /// Apply present fields and bump the version; `None` when the bid is gone.
    async fn update_fields(
        &self,
        id: BidId,
        changes: &BidChanges,
    ) -> Result<Option<Bid>, BidRepositoryError>;
}
