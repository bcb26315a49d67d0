//! Construction of HTTP state over the PostgreSQL adapters.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tender_backend::inbound::http::state::{HttpState, HttpStatePorts};
use tender_backend::outbound::persistence::{
    DbPool, DieselBidRepository, DieselOrganizationRepository, DieselTenderRepository,
    DieselUserRepository,
};

/// Wire every driving port to the Diesel repositories sharing `pool`.
pub(crate) fn build_http_state(pool: &DbPool) -> web::Data<HttpState> {
    let ports = HttpStatePorts::from_repositories(
        Arc::new(DieselUserRepository::new(pool.clone())),
        Arc::new(DieselOrganizationRepository::new(pool.clone())),
        Arc::new(DieselTenderRepository::new(pool.clone())),
        Arc::new(DieselBidRepository::new(pool.clone())),
        Arc::new(DefaultClock),
    );
    web::Data::new(HttpState::new(ports))
}
