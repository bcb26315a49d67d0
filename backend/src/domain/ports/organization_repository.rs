//! Port for organizations and the responsibility relation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::Page;

use crate::domain::{Organization, OrganizationDraft, OrganizationId, OrganizationType, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by organization repository adapters.
    pub enum OrganizationRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "organization repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "organization repository query failed: {message}",
        /// The (organization, user) pair is already recorded.
        AlreadyResponsible { organization_id: i32, user_id: i32 } =>
            "user {user_id} is already responsible for organization {organization_id}",
    }
}

/// Port for organization records and responsibility pairs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrganizationRepository: Send + Sync {
    /// Find an organization by id.
    async fn find_by_id(
        &self,
        id: OrganizationId,
    ) -> Result<Option<Organization>, OrganizationRepositoryError>;

    /// Insert an organization.
    async fn create(
        &self,
        draft: &OrganizationDraft,
        created_at: DateTime<Utc>,
    ) -> Result<Organization, OrganizationRepositoryError>;

    /// Overwrite an organization's fields; `None` when it does not exist.
    async fn update(
        &self,
        id: OrganizationId,
        draft: &OrganizationDraft,
    ) -> Result<Option<Organization>, OrganizationRepositoryError>;

    /// List organizations ordered by name, optionally filtered by type.
    async fn list(
        &self,
        organization_type: Option<OrganizationType>,
        page: Page,
    ) -> Result<Vec<Organization>, OrganizationRepositoryError>;

    /// Whether the pair is recorded. Absent pairs are `false`, not errors.
    async fn is_responsible(
        &self,
        organization_id: OrganizationId,
        user_id: UserId,
    ) -> Result<bool, OrganizationRepositoryError>;

    /// Record the pair.
    ///
    /// Fails with [`OrganizationRepositoryError::AlreadyResponsible`] when the
    /// pair already exists.
    async fn make_responsible(
        &self,
        organization_id: OrganizationId,
        user_id: UserId,
    ) -> Result<(), OrganizationRepositoryError>;
}
