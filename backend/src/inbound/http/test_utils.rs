//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use serde_json::Value;

use crate::domain::ports::{
    MockBidCommand, MockBidQuery, MockOrganizationCommand, MockOrganizationQuery,
    MockTenderCommand, MockTenderQuery, MockUserCommand, MockUserQuery,
};
use crate::inbound::http::error::{json_error_handler, path_error_handler, query_error_handler};
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Mock driving ports; set expectations on the port a test exercises and
/// leave the rest untouched so unexpected calls fail loudly.
#[derive(Default)]
pub struct MockPorts {
    pub users: MockUserCommand,
    pub users_query: MockUserQuery,
    pub organizations: MockOrganizationCommand,
    pub organizations_query: MockOrganizationQuery,
    pub tenders: MockTenderCommand,
    pub tenders_query: MockTenderQuery,
    pub bids: MockBidCommand,
    pub bids_query: MockBidQuery,
}

impl MockPorts {
    pub fn into_state(self) -> HttpState {
        HttpState::new(HttpStatePorts {
            users: Arc::new(self.users),
            users_query: Arc::new(self.users_query),
            organizations: Arc::new(self.organizations),
            organizations_query: Arc::new(self.organizations_query),
            tenders: Arc::new(self.tenders),
            tenders_query: Arc::new(self.tenders_query),
            bids: Arc::new(self.bids),
            bids_query: Arc::new(self.bids_query),
        })
    }
}

/// App with the extractor error handlers the server installs, ready for
/// handlers to be mounted under `/api`.
pub fn test_app(
    state: HttpState,
    api: actix_web::Scope,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .service(api)
}

/// Read the `code` field from an error body.
pub fn error_code(body: &Value) -> Option<&str> {
    body.get("code").and_then(Value::as_str)
}
