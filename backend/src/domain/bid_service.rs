//! Bid lifecycle service.
//!
//! Who may do what to a bid depends on two actor groups derived from the
//! acting user: the creator set (author or responsible for the bid's
//! organization) and the approver set (responsible for the tender's
//! organization). A user may belong to both; the creator set wins.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, info};

use super::identity::IdentityResolver;
use super::listing::{ListingSource, aggregate};
use super::ports::{
    BidCommand, BidQuery, BidRepository, BidStatusRequest, CreateBidRequest, ListMyBidsRequest,
    ListTenderBidsRequest, OrganizationRepository, SubmitDecisionRequest, TenderRepository,
    TransitionBidRequest, UpdateBidRequest, UserRepository,
};
use super::repository_errors::{map_bid_error, map_organization_error, map_tender_error};
use super::responsibility::ResponsibilityOracle;
use super::{
    Bid, BidChanges, BidId, BidOrigin, BidStatus, Decision, Error, NewBid, OrganizationId, Tender,
    TenderId, User, UserId,
};

const CANNOT_SET_STATUS: &str = "you can't set this status to bid";

fn require_created_literal(raw: &str) -> Result<(), Error> {
    match BidStatus::from_str(raw) {
        Ok(BidStatus::Created) => Ok(()),
        _ => Err(Error::invalid_creation_state(
            "you must specify field 'status' with value 'Created'",
        )),
    }
}

fn parse_bid_status(raw: &str) -> Result<BidStatus, Error> {
    BidStatus::from_str(raw).map_err(|err| {
        Error::invalid_status_value(
            "parameter 'status' must be in list(Created, Published, Canceled, Approved, Rejected)",
        )
        .with_details(json!({ "field": "status", "value": err.value }))
    })
}

fn parse_decision(raw: &str) -> Result<Decision, Error> {
    Decision::from_str(raw).map_err(|err| {
        Error::invalid_status_value("parameter 'decision' must be in list(Approved, Rejected)")
            .with_details(json!({ "field": "decision", "value": err.value }))
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}

/// Approver-side rule shared by status transitions and decisions.
fn check_approver_move(bid: &Bid, target: BidStatus) -> Result<(), Error> {
    if !target.is_approver_settable() || bid.status != BidStatus::Published {
        return Err(Error::invalid_status_value(CANNOT_SET_STATUS));
    }
    Ok(())
}

/// Bid service implementing the bid driving ports.
pub struct BidService<U, O, T, B> {
    identity: IdentityResolver<U>,
    responsibility: ResponsibilityOracle<O, U>,
    organizations: Arc<O>,
    tenders: Arc<T>,
    bids: Arc<B>,
    clock: Arc<dyn Clock>,
}

impl<U, O, T, B> BidService<U, O, T, B>
where
    U: UserRepository,
    O: OrganizationRepository,
    T: TenderRepository,
    B: BidRepository,
{
    /// Create a new service over the user, organization, tender and bid stores.
    pub fn new(
        users: Arc<U>,
        organizations: Arc<O>,
        tenders: Arc<T>,
        bids: Arc<B>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            identity: IdentityResolver::new(Arc::clone(&users)),
            responsibility: ResponsibilityOracle::new(Arc::clone(&organizations), users),
            organizations,
            tenders,
            bids,
            clock,
        }
    }

    async fn load_tender(&self, id: TenderId) -> Result<Tender, Error> {
        self.tenders
            .find_by_id(id)
            .await
            .map_err(map_tender_error)?
            .ok_or_else(|| Error::not_found("tender doesn't exist"))
    }

    async fn load_bid(&self, id: BidId) -> Result<Bid, Error> {
        self.bids
            .find_by_id(id)
            .await
            .map_err(map_bid_error)?
            .ok_or_else(|| Error::not_found("bid doesn't exist"))
    }

    async fn in_creator_set(&self, user: &User, bid: &Bid) -> Result<bool, Error> {
        if bid.creator_id == user.id {
            return Ok(true);
        }
        match bid.origin.organization_id() {
            Some(organization) => self.responsibility.is_responsible(user.id, organization).await,
            None => Ok(false),
        }
    }

    async fn in_approver_set(&self, user: &User, bid: &Bid) -> Result<bool, Error> {
        let tender = self.load_tender(bid.tender_id).await?;
        self.responsibility
            .is_responsible(user.id, tender.organization_id)
            .await
    }

    async fn check_no_active_bid(
        &self,
        tender: TenderId,
        origin: BidOrigin,
        user: UserId,
    ) -> Result<(), Error> {
        let exists = match origin {
            BidOrigin::Organization(organization) => self
                .bids
                .organization_has_bid(tender, organization)
                .await
                .map_err(map_bid_error)?,
            BidOrigin::Personal => self
                .bids
                .user_has_bid(tender, user)
                .await
                .map_err(map_bid_error)?,
        };
        if !exists {
            return Ok(());
        }
        Err(match origin {
            BidOrigin::Organization(_) => {
                Error::conflicting_bid("your organization already has bid to this tender")
            }
            BidOrigin::Personal => Error::conflicting_bid("you already have a bid on this tender"),
        })
    }

    async fn apply_status(&self, bid: &Bid, status: BidStatus) -> Result<Bid, Error> {
        let updated = self
            .bids
            .update_status(bid.id, status)
            .await
            .map_err(map_bid_error)?
            .ok_or_else(|| Error::not_found("bid doesn't exist"))?;
        debug!(bid_id = %updated.id, status = %status, version = updated.version, "bid status changed");
        Ok(updated)
    }
}

#[async_trait]
impl<U, O, T, B> BidCommand for BidService<U, O, T, B>
where
    U: UserRepository,
    O: OrganizationRepository,
    T: TenderRepository,
    B: BidRepository,
{
    async fn create(&self, request: CreateBidRequest) -> Result<Bid, Error> {
        require_created_literal(&request.status)?;
        let user = self.identity.resolve(&request.username).await?;
        let tender = self.load_tender(request.tender_id).await?;

        let origin = BidOrigin::from(request.organization_id);
        if let BidOrigin::Organization(organization) = origin {
            self.organizations
                .find_by_id(organization)
                .await
                .map_err(map_organization_error)?
                .ok_or_else(|| Error::not_found("organization doesn't exist"))?;
            self.responsibility.require(user.id, organization).await?;
            if organization == tender.organization_id {
                return Err(Error::self_bid_forbidden(
                    "you can't offer your own company a service",
                ));
            }
        }
        self.check_no_active_bid(tender.id, origin, user.id).await?;

        let bid = self
            .bids
            .create(&NewBid {
                name: request.name,
                description: request.description,
                tender_id: tender.id,
                creator_id: user.id,
                origin,
                created_at: self.clock.utc(),
            })
            .await
            .map_err(map_bid_error)?;
        info!(bid_id = %bid.id, tender_id = %bid.tender_id, author_type = %bid.author_type(), "bid created");
        Ok(bid)
    }

    async fn transition_status(&self, request: TransitionBidRequest) -> Result<Bid, Error> {
        let user = self.identity.resolve(&request.username).await?;
        let bid = self.load_bid(request.bid_id).await?;
        let target = parse_bid_status(&request.status)?;

        if self.in_creator_set(&user, &bid).await? {
            if !target.is_creator_settable() {
                return Err(Error::invalid_status_value(CANNOT_SET_STATUS));
            }
        } else if self.in_approver_set(&user, &bid).await? {
            check_approver_move(&bid, target)?;
        } else {
            debug!(bid_id = %bid.id, user_id = %user.id, "bid transition denied");
            return Err(Error::permission_denied(
                "you don't have sufficient rights to obtain the resource",
            ));
        }
        self.apply_status(&bid, target).await
    }

    async fn submit_decision(&self, request: SubmitDecisionRequest) -> Result<Bid, Error> {
        let user = self.identity.resolve(&request.username).await?;
        let bid = self.load_bid(request.bid_id).await?;
        let decision = parse_decision(&request.decision)?;

        if !self.in_approver_set(&user, &bid).await? {
            debug!(bid_id = %bid.id, user_id = %user.id, "bid decision denied");
            return Err(Error::permission_denied(
                "you aren't responsible for this organization",
            ));
        }
        let target = BidStatus::from(decision);
        check_approver_move(&bid, target)?;
        self.apply_status(&bid, target).await
    }

    async fn update(&self, request: UpdateBidRequest) -> Result<Bid, Error> {
        let user = self.identity.resolve(&request.username).await?;
        let bid = self.load_bid(request.bid_id).await?;
        if !self.in_creator_set(&user, &bid).await? {
            return Err(Error::permission_denied(
                "you don't have sufficient rights to obtain the resource",
            ));
        }

        let changes = BidChanges {
            name: non_empty(request.name),
            description: non_empty(request.description),
        };
        self.bids
            .update_fields(bid.id, &changes)
            .await
            .map_err(map_bid_error)?
            .ok_or_else(|| Error::not_found("bid doesn't exist"))
    }
}

#[async_trait]
impl<U, O, T, B> BidQuery for BidService<U, O, T, B>
where
    U: UserRepository,
    O: OrganizationRepository,
    T: TenderRepository,
    B: BidRepository,
{
    async fn get_status(&self, request: BidStatusRequest) -> Result<BidStatus, Error> {
        let user = self.identity.resolve(&request.username).await?;
        let bid = self.load_bid(request.bid_id).await?;

        let visible = self.in_creator_set(&user, &bid).await?
            || (bid.status.is_visible_to_approvers()
                && self.in_approver_set(&user, &bid).await?);
        if visible {
            Ok(bid.status)
        } else {
            Err(Error::permission_denied(
                "you don't have sufficient rights to obtain the resource",
            ))
        }
    }

    async fn list_for_tender(&self, request: ListTenderBidsRequest) -> Result<Vec<Bid>, Error> {
        let user = self.identity.resolve(&request.username).await?;
        let tender = self.load_tender(request.tender_id).await?;
        self.responsibility
            .require(user.id, tender.organization_id)
            .await?;
        self.bids
            .list_published_for_tender(tender.id, request.page)
            .await
            .map_err(map_bid_error)
    }

    async fn list_mine(&self, request: ListMyBidsRequest) -> Result<Vec<Bid>, Error> {
        let user = self.identity.resolve(&request.username).await?;
        let organizations = self.responsibility.organizations_of(user.id).await?;
        aggregate(
            &BidListing(self.bids.as_ref()),
            &organizations,
            user.id,
            request.page,
        )
        .await
    }
}

struct BidListing<'a, B>(&'a B);

#[async_trait]
impl<B: BidRepository> ListingSource for BidListing<'_, B> {
    type Item = Bid;
    type Key = BidId;

    fn key_of(item: &Bid) -> BidId {
        item.id
    }

    async fn for_organization(&self, organization: OrganizationId) -> Result<Vec<Bid>, Error> {
        self.0
            .list_for_organization(organization)
            .await
            .map_err(map_bid_error)
    }

    async fn for_user(&self, user: UserId) -> Result<Vec<Bid>, Error> {
        self.0
            .list_personal_for_creator(user)
            .await
            .map_err(map_bid_error)
    }
}

#[cfg(test)]
#[path = "bid_service_tests.rs"]
mod tests;
