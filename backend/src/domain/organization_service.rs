//! Organization management and the responsibility grant.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;

use super::identity::IdentityResolver;
use super::ports::{
    CreateOrganizationRequest, ListOrganizationsRequest, MakeResponsibleRequest,
    OrganizationCommand, OrganizationQuery, OrganizationRepository, UpdateOrganizationRequest,
    UserRepository,
};
use super::repository_errors::map_organization_error;
use super::responsibility::ResponsibilityOracle;
use super::{Error, Organization, OrganizationDraft, OrganizationId, OrganizationType};

fn parse_organization_type(raw: &str) -> Result<OrganizationType, Error> {
    OrganizationType::from_str(raw).map_err(|err| {
        Error::invalid_request("parameter 'type' must be in list(IE, LLC, JSC)")
            .with_details(json!({ "field": "type", "value": err.value }))
    })
}

fn draft(name: String, description: String, raw_type: &str) -> Result<OrganizationDraft, Error> {
    if name.trim().is_empty() {
        return Err(Error::invalid_request("you must specify field 'name'")
            .with_details(json!({ "field": "name" })));
    }
    Ok(OrganizationDraft {
        name,
        description,
        organization_type: parse_organization_type(raw_type)?,
    })
}

/// Organization service implementing the organization driving ports.
pub struct OrganizationService<O, U> {
    organizations: Arc<O>,
    identity: IdentityResolver<U>,
    responsibility: ResponsibilityOracle<O, U>,
    clock: Arc<dyn Clock>,
}

impl<O, U> OrganizationService<O, U>
where
    O: OrganizationRepository,
    U: UserRepository,
{
    /// Create a new service over the organization and user stores.
    pub fn new(organizations: Arc<O>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            identity: IdentityResolver::new(Arc::clone(&users)),
            responsibility: ResponsibilityOracle::new(Arc::clone(&organizations), users),
            organizations,
            clock,
        }
    }
}

#[async_trait]
impl<O, U> OrganizationCommand for OrganizationService<O, U>
where
    O: OrganizationRepository,
    U: UserRepository,
{
    async fn create(&self, request: CreateOrganizationRequest) -> Result<Organization, Error> {
        let draft = draft(
            request.name,
            request.description,
            &request.organization_type,
        )?;
        let organization = self
            .organizations
            .create(&draft, self.clock.utc())
            .await
            .map_err(map_organization_error)?;
        info!(organization_id = %organization.id, "organization created");
        Ok(organization)
    }

    async fn update(&self, request: UpdateOrganizationRequest) -> Result<Organization, Error> {
        let draft = draft(
            request.name,
            request.description,
            &request.organization_type,
        )?;
        self.organizations
            .update(request.organization_id, &draft)
            .await
            .map_err(map_organization_error)?
            .ok_or_else(|| Error::not_found("organization doesn't exist"))
    }

    async fn make_responsible(&self, request: MakeResponsibleRequest) -> Result<(), Error> {
        let user = self.identity.resolve(&request.username).await?;
        self.responsibility
            .grant(user.id, request.organization_id)
            .await?;
        info!(
            organization_id = %request.organization_id,
            user_id = %user.id,
            "responsibility granted"
        );
        Ok(())
    }
}

#[async_trait]
impl<O, U> OrganizationQuery for OrganizationService<O, U>
where
    O: OrganizationRepository,
    U: UserRepository,
{
    async fn get(&self, id: OrganizationId) -> Result<Organization, Error> {
        self.organizations
            .find_by_id(id)
            .await
            .map_err(map_organization_error)?
            .ok_or_else(|| Error::not_found("organization doesn't exist"))
    }

    async fn list(&self, request: ListOrganizationsRequest) -> Result<Vec<Organization>, Error> {
        let organization_type = request
            .organization_type
            .as_deref()
            .map(parse_organization_type)
            .transpose()?;
        self.organizations
            .list(organization_type, request.page)
            .await
            .map_err(map_organization_error)
    }
}
