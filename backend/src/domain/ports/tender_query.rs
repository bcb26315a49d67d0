//! Driving port for tender reads.

use async_trait::async_trait;
use pagination::Page;

use crate::domain::{Error, Tender, TenderId, TenderStatus, Username};

/// Request for a tender's current status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenderStatusRequest {
    pub tender_id: TenderId,
    pub username: Username,
}

/// Request for the public tender listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListTendersRequest {
    pub service_type: Option<String>,
    pub page: Page,
}

/// Request for the tenders visible to one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListMyTendersRequest {
    pub username: Username,
    pub page: Page,
}

/// Driving port for tender reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TenderQuery: Send + Sync {
    /// Status of a tender, visible only to its organization's responsible users.
    async fn get_status(&self, request: TenderStatusRequest) -> Result<TenderStatus, Error>;

    /// Published tenders ordered by name.
    async fn list(&self, request: ListTendersRequest) -> Result<Vec<Tender>, Error>;

    /// Tenders of the user's organizations followed by ones they created.
    async fn list_mine(&self, request: ListMyTendersRequest) -> Result<Vec<Tender>, Error>;
}
