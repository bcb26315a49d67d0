//! Decides who may act on behalf of an organization.
//!
//! Responsibility is a plain (organization, user) relation. It is created
//! only through [`ResponsibilityOracle::grant`] and never revoked.

use std::sync::Arc;

use tracing::debug;

use super::ports::{OrganizationRepository, UserRepository};
use super::repository_errors::{map_organization_error, map_user_error};
use super::{Error, OrganizationId, UserId};

/// Membership predicate, grant mutator and reverse lookup.
pub struct ResponsibilityOracle<O, U> {
    organizations: Arc<O>,
    users: Arc<U>,
}

impl<O, U> Clone for ResponsibilityOracle<O, U> {
    fn clone(&self) -> Self {
        Self {
            organizations: Arc::clone(&self.organizations),
            users: Arc::clone(&self.users),
        }
    }
}

impl<O, U> ResponsibilityOracle<O, U>
where
    O: OrganizationRepository,
    U: UserRepository,
{
    /// Create an oracle over the organization and user repositories.
    pub fn new(organizations: Arc<O>, users: Arc<U>) -> Self {
        Self {
            organizations,
            users,
        }
    }

    /// Whether `user` may act for `organization`. Unknown pairs are `false`.
    pub async fn is_responsible(
        &self,
        user: UserId,
        organization: OrganizationId,
    ) -> Result<bool, Error> {
        self.organizations
            .is_responsible(organization, user)
            .await
            .map_err(map_organization_error)
    }

    /// Fail with `PermissionDenied` unless `user` is responsible.
    pub async fn require(&self, user: UserId, organization: OrganizationId) -> Result<(), Error> {
        if self.is_responsible(user, organization).await? {
            Ok(())
        } else {
            debug!(%user, %organization, "user is not responsible for organization");
            Err(Error::permission_denied(
                "you aren't responsible for this organization",
            ))
        }
    }

    /// Record that `user` is responsible for `organization`.
    ///
    /// # Errors
    ///
    /// `NotFound` when the organization does not exist; `AlreadyResponsible`
    /// when the pair is already recorded.
    pub async fn grant(&self, user: UserId, organization: OrganizationId) -> Result<(), Error> {
        self.organizations
            .find_by_id(organization)
            .await
            .map_err(map_organization_error)?
            .ok_or_else(|| Error::not_found("organization doesn't exist"))?;
        self.organizations
            .make_responsible(organization, user)
            .await
            .map_err(map_organization_error)
    }

    /// Organizations `user` is responsible for, possibly none.
    pub async fn organizations_of(&self, user: UserId) -> Result<Vec<OrganizationId>, Error> {
        self.users
            .responsible_organization_ids(user)
            .await
            .map_err(map_user_error)
    }
}
