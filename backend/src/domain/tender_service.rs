//! Tender lifecycle service.
//!
//! Implements [`TenderCommand`] and [`TenderQuery`]. Every operation that
//! carries a username resolves it first; unknown names fail with
//! `NotAuthenticated` before any other check runs, except for create's
//! status and service type literals which are validated up front.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, info};

use super::identity::IdentityResolver;
use super::listing::{ListingSource, aggregate};
use super::ports::{
    CreateTenderRequest, ListMyTendersRequest, ListTendersRequest, OrganizationRepository,
    TenderCommand, TenderQuery, TenderRepository, TenderStatusRequest, TransitionTenderRequest,
    UpdateTenderRequest, UserRepository,
};
use super::repository_errors::{map_organization_error, map_tender_error};
use super::responsibility::ResponsibilityOracle;
use super::{
    Error, NewTender, OrganizationId, ServiceType, Tender, TenderChanges, TenderId, TenderStatus,
    UserId,
};

pub(crate) fn parse_service_type(raw: &str) -> Result<ServiceType, Error> {
    ServiceType::from_str(raw).map_err(|err| {
        Error::invalid_request(
            "parameter 'service_type' must be in list(Construction, Delivery, Manufacture)",
        )
        .with_details(json!({ "field": "serviceType", "value": err.value }))
    })
}

fn require_created_literal(raw: &str) -> Result<(), Error> {
    match TenderStatus::from_str(raw) {
        Ok(TenderStatus::Created) => Ok(()),
        _ => Err(Error::invalid_creation_state(
            "you must specify field 'status' with value 'Created'",
        )),
    }
}

fn parse_tender_status(raw: &str) -> Result<TenderStatus, Error> {
    TenderStatus::from_str(raw).map_err(|err| {
        Error::invalid_status_value(
            "parameter 'status' must be in list(Created, Published, Closed)",
        )
        .with_details(json!({ "field": "status", "value": err.value }))
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}

/// Tender service implementing the tender driving ports.
pub struct TenderService<U, O, T> {
    identity: IdentityResolver<U>,
    responsibility: ResponsibilityOracle<O, U>,
    organizations: Arc<O>,
    tenders: Arc<T>,
    clock: Arc<dyn Clock>,
}

impl<U, O, T> TenderService<U, O, T>
where
    U: UserRepository,
    O: OrganizationRepository,
    T: TenderRepository,
{
    /// Create a new service over the user, organization and tender stores.
    pub fn new(
        users: Arc<U>,
        organizations: Arc<O>,
        tenders: Arc<T>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            identity: IdentityResolver::new(Arc::clone(&users)),
            responsibility: ResponsibilityOracle::new(Arc::clone(&organizations), users),
            organizations,
            tenders,
            clock,
        }
    }

    async fn load(&self, id: TenderId) -> Result<Tender, Error> {
        self.tenders
            .find_by_id(id)
            .await
            .map_err(map_tender_error)?
            .ok_or_else(|| Error::not_found("tender doesn't exist"))
    }

    /// Load the tender and require `user` to be responsible for its owner.
    async fn load_owned(&self, id: TenderId, user: UserId) -> Result<Tender, Error> {
        let tender = self.load(id).await?;
        self.responsibility
            .require(user, tender.organization_id)
            .await?;
        Ok(tender)
    }
}

#[async_trait]
impl<U, O, T> TenderCommand for TenderService<U, O, T>
where
    U: UserRepository,
    O: OrganizationRepository,
    T: TenderRepository,
{
    async fn create(&self, request: CreateTenderRequest) -> Result<Tender, Error> {
        require_created_literal(&request.status)?;
        let service_type = parse_service_type(&request.service_type)?;
        let user = self.identity.resolve(&request.username).await?;

        self.organizations
            .find_by_id(request.organization_id)
            .await
            .map_err(map_organization_error)?
            .ok_or_else(|| Error::not_found("organization doesn't exist"))?;
        self.responsibility
            .require(user.id, request.organization_id)
            .await?;

        let tender = self
            .tenders
            .create(&NewTender {
                name: request.name,
                description: request.description,
                service_type,
                organization_id: request.organization_id,
                creator_id: user.id,
                created_at: self.clock.utc(),
            })
            .await
            .map_err(map_tender_error)?;
        info!(tender_id = %tender.id, organization_id = %tender.organization_id, "tender created");
        Ok(tender)
    }

    async fn transition_status(&self, request: TransitionTenderRequest) -> Result<Tender, Error> {
        let user = self.identity.resolve(&request.username).await?;
        let tender = self.load_owned(request.tender_id, user.id).await?;
        let status = parse_tender_status(&request.status)?;

        let updated = self
            .tenders
            .update_status(tender.id, status)
            .await
            .map_err(map_tender_error)?
            .ok_or_else(|| Error::not_found("tender doesn't exist"))?;
        debug!(tender_id = %updated.id, status = %status, version = updated.version, "tender status changed");
        Ok(updated)
    }

    async fn update(&self, request: UpdateTenderRequest) -> Result<Tender, Error> {
        let user = self.identity.resolve(&request.username).await?;
        let tender = self.load_owned(request.tender_id, user.id).await?;
        let service_type = non_empty(request.service_type)
            .as_deref()
            .map(parse_service_type)
            .transpose()?;

        let changes = TenderChanges {
            name: non_empty(request.name),
            description: non_empty(request.description),
            service_type,
        };
        self.tenders
            .update_fields(tender.id, &changes)
            .await
            .map_err(map_tender_error)?
            .ok_or_else(|| Error::not_found("tender doesn't exist"))
    }
}

#[async_trait]
impl<U, O, T> TenderQuery for TenderService<U, O, T>
where
    U: UserRepository,
    O: OrganizationRepository,
    T: TenderRepository,
{
    async fn get_status(&self, request: TenderStatusRequest) -> Result<TenderStatus, Error> {
        let user = self.identity.resolve(&request.username).await?;
        let tender = self.load_owned(request.tender_id, user.id).await?;
        Ok(tender.status)
    }

    async fn list(&self, request: ListTendersRequest) -> Result<Vec<Tender>, Error> {
        let service_type = request
            .service_type
            .as_deref()
            .map(parse_service_type)
            .transpose()?;
        self.tenders
            .list_published(service_type, request.page)
            .await
            .map_err(map_tender_error)
    }

    async fn list_mine(&self, request: ListMyTendersRequest) -> Result<Vec<Tender>, Error> {
        let user = self.identity.resolve(&request.username).await?;
        let organizations = self.responsibility.organizations_of(user.id).await?;
        aggregate(
            &TenderListing(self.tenders.as_ref()),
            &organizations,
            user.id,
            request.page,
        )
        .await
    }
}

/// Tender records for the listing aggregator.
struct TenderListing<'a, T>(&'a T);

#[async_trait]
impl<T: TenderRepository> ListingSource for TenderListing<'_, T> {
    type Item = Tender;
    type Key = TenderId;

    fn key_of(item: &Tender) -> TenderId {
        item.id
    }

    async fn for_organization(&self, organization: OrganizationId) -> Result<Vec<Tender>, Error> {
        self.0
            .list_for_organization(organization)
            .await
            .map_err(map_tender_error)
    }

    async fn for_user(&self, user: UserId) -> Result<Vec<Tender>, Error> {
        self.0
            .list_for_creator(user)
            .await
            .map_err(map_tender_error)
    }
}

#[cfg(test)]
#[path = "tender_service_tests.rs"]
mod tests;
