//! Driving port for organization management.

use async_trait::async_trait;

use crate::domain::{Error, Organization, OrganizationId, Username};

/// Request to register an organization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOrganizationRequest {
    pub name: String,
    pub description: String,
    pub organization_type: String,
}

/// Request to overwrite an organization's fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOrganizationRequest {
    pub organization_id: OrganizationId,
    pub name: String,
    pub description: String,
    pub organization_type: String,
}

/// Request to make a user responsible for an organization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MakeResponsibleRequest {
    pub organization_id: OrganizationId,
    pub username: Username,
}

/// Driving port for organization management.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrganizationCommand: Send + Sync {
    /// Register an organization.
    async fn create(&self, request: CreateOrganizationRequest) -> Result<Organization, Error>;

    /// Overwrite an existing organization.
    async fn update(&self, request: UpdateOrganizationRequest) -> Result<Organization, Error>;

    /// Record that the user acts for the organization.
    async fn make_responsible(&self, request: MakeResponsibleRequest) -> Result<(), Error>;
}
