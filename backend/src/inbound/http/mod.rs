//! HTTP inbound adapter exposing the brokerage REST endpoints.

pub mod bids;
pub mod error;
pub mod health;
pub mod organizations;
pub mod query;
pub mod schemas;
pub mod state;
pub mod tenders;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;

use actix_web::web;

/// Every brokerage endpoint mounted under `/api`.
///
/// `/users/{username}/organizations` is registered ahead of
/// `/users/{username}` and the literal `/tenders/my` and `/bids/my` routes
/// ahead of their `{id}` siblings.
pub fn api_scope() -> actix_web::Scope {
    web::scope("/api")
        .service(health::ping)
        .service(users::register_user)
        .service(users::list_user_organizations)
        .service(users::get_user)
        .service(organizations::list_organizations)
        .service(organizations::create_organization)
        .service(organizations::update_organization)
        .service(organizations::make_responsible)
        .service(tenders::list_tenders)
        .service(tenders::create_tender)
        .service(tenders::list_my_tenders)
        .service(tenders::get_tender_status)
        .service(tenders::set_tender_status)
        .service(tenders::edit_tender)
        .service(bids::create_bid)
        .service(bids::list_my_bids)
        .service(bids::list_tender_bids)
        .service(bids::get_bid_status)
        .service(bids::set_bid_status)
        .service(bids::submit_decision)
        .service(bids::edit_bid)
}
