//! Driving port for organization reads.

use async_trait::async_trait;
use pagination::Page;

use crate::domain::{Error, Organization, OrganizationId};

/// Request for the organization directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOrganizationsRequest {
    pub organization_type: Option<String>,
    pub page: Page,
}

/// Driving port for organization reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrganizationQuery: Send + Sync {
    /// Fetch one organization.
    async fn get(&self, id: OrganizationId) -> Result<Organization, Error>;

    /// Organizations ordered by name, optionally filtered by type.
    async fn list(&self, request: ListOrganizationsRequest) -> Result<Vec<Organization>, Error>;
}
