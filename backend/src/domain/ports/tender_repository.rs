//! Port for tender persistence.
//!
//! Mutations bump `version` in the same statement that applies them and
//! return the updated row, so callers never observe a half-applied edit.

use async_trait::async_trait;
use pagination::Page;

use crate::domain::{
    NewTender, OrganizationId, ServiceType, Tender, TenderChanges, TenderId, TenderStatus, UserId,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by tender repository adapters.
    pub enum TenderRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "tender repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "tender repository query failed: {message}",
    }
}

/// Port for storing and querying tenders.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TenderRepository: Send + Sync {
    /// Insert a tender with status `Created` and version 1.
    async fn create(&self, tender: &NewTender) -> Result<Tender, TenderRepositoryError>;

    /// Find a tender by id.
    async fn find_by_id(&self, id: TenderId) -> Result<Option<Tender>, TenderRepositoryError>;

    /// Published tenders ordered by name, optionally filtered by service type.
    async fn list_published(
        &self,
        service_type: Option<ServiceType>,
        page: Page,
    ) -> Result<Vec<Tender>, TenderRepositoryError>;

    /// Every tender owned by the organization, ordered by name.
    async fn list_for_organization(
        &self,
        organization_id: OrganizationId,
    ) -> Result<Vec<Tender>, TenderRepositoryError>;

    /// Every tender created by the user, ordered by name.
    async fn list_for_creator(&self, creator_id: UserId)
    -> Result<Vec<Tender>, TenderRepositoryError>;

    /// Set the status and bump the version; `None` when the tender is gone.
    async fn update_status(
        &self,
        id: TenderId,
        status: TenderStatus,
    ) -> Result<Option<Tender>, TenderRepositoryError>;

    /// Apply present fields and bump the version; `None` when the tender is gone.
    async fn update_fields(
        &self,
        id: TenderId,
        changes: &TenderChanges,
    ) -> Result<Option<Tender>, TenderRepositoryError>;
}
