//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on driving ports and remain testable without I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    BidCommand, BidQuery, BidRepository, OrganizationCommand, OrganizationQuery,
    OrganizationRepository, TenderCommand, TenderQuery, TenderRepository, UserCommand, UserQuery,
    UserRepository,
};
use crate::domain::{BidService, OrganizationService, TenderService, UserService};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub users: Arc<dyn UserCommand>,
    pub users_query: Arc<dyn UserQuery>,
    pub organizations: Arc<dyn OrganizationCommand>,
    pub organizations_query: Arc<dyn OrganizationQuery>,
    pub tenders: Arc<dyn TenderCommand>,
    pub tenders_query: Arc<dyn TenderQuery>,
    pub bids: Arc<dyn BidCommand>,
    pub bids_query: Arc<dyn BidQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UserCommand>,
    pub users_query: Arc<dyn UserQuery>,
    pub organizations: Arc<dyn OrganizationCommand>,
    pub organizations_query: Arc<dyn OrganizationQuery>,
    pub tenders: Arc<dyn TenderCommand>,
    pub tenders_query: Arc<dyn TenderQuery>,
    pub bids: Arc<dyn BidCommand>,
    pub bids_query: Arc<dyn BidQuery>,
}

impl HttpStatePorts {
    /// Wire the domain services over a set of driven adapters.
    ///
    /// Each service implements both the command and the query port of its
    /// aggregate, so the same `Arc` backs both fields.
    pub fn from_repositories<U, O, T, B>(
        users: Arc<U>,
        organizations: Arc<O>,
        tenders: Arc<T>,
        bids: Arc<B>,
        clock: Arc<dyn Clock>,
    ) -> Self
    where
        U: UserRepository + 'static,
        O: OrganizationRepository + 'static,
        T: TenderRepository + 'static,
        B: BidRepository + 'static,
    {
        let user_service = Arc::new(UserService::new(Arc::clone(&users), Arc::clone(&clock)));
        let organization_service = Arc::new(OrganizationService::new(
            Arc::clone(&organizations),
            Arc::clone(&users),
            Arc::clone(&clock),
        ));
        let tender_service = Arc::new(TenderService::new(
            Arc::clone(&users),
            Arc::clone(&organizations),
            Arc::clone(&tenders),
            Arc::clone(&clock),
        ));
        let bid_service = Arc::new(BidService::new(
            users,
            organizations,
            tenders,
            bids,
            clock,
        ));
        Self {
            users: user_service.clone(),
            users_query: user_service,
            organizations: organization_service.clone(),
            organizations_query: organization_service,
            tenders: tender_service.clone(),
            tenders_query: tender_service,
            bids: bid_service.clone(),
            bids_query: bid_service,
        }
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            users,
            users_query,
            organizations,
            organizations_query,
            tenders,
            tenders_query,
            bids,
            bids_query,
        } = ports;
        Self {
            users,
            users_query,
            organizations,
            organizations_query,
            tenders,
            tenders_query,
            bids,
            bids_query,
        }
    }
}
