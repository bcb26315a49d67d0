//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every brokerage endpoint and the vocabulary schema
//! wrappers from [`crate::inbound::http::schemas`]. Swagger UI serves it in
//! debug builds and `cargo run --bin openapi-dump` prints it.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::bids::{BidResponse, BidStatusResponse, CreateBidBody, EditBidBody};
use crate::inbound::http::organizations::{OrganizationBody, OrganizationResponse};
use crate::inbound::http::schemas::{
    AuthorTypeSchema, BidStatusSchema, DecisionSchema, OrganizationTypeSchema, ServiceTypeSchema,
    TenderStatusSchema,
};
use crate::inbound::http::tenders::{
    CreateTenderBody, EditTenderBody, TenderResponse, TenderStatusResponse,
};
use crate::inbound::http::users::{RegisterUserBody, UserResponse};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tender brokerage API",
        description = "Organizations publish tenders; users and organizations answer them with bids. \
                       The acting user is named by the `username` query parameter."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::health::ping,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
        crate::inbound::http::users::register_user,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::list_user_organizations,
        crate::inbound::http::organizations::list_organizations,
        crate::inbound::http::organizations::create_organization,
        crate::inbound::http::organizations::update_organization,
        crate::inbound::http::organizations::make_responsible,
        crate::inbound::http::tenders::list_tenders,
        crate::inbound::http::tenders::create_tender,
        crate::inbound::http::tenders::list_my_tenders,
        crate::inbound::http::tenders::get_tender_status,
        crate::inbound::http::tenders::set_tender_status,
        crate::inbound::http::tenders::edit_tender,
        crate::inbound::http::bids::create_bid,
        crate::inbound::http::bids::list_my_bids,
        crate::inbound::http::bids::list_tender_bids,
        crate::inbound::http::bids::get_bid_status,
        crate::inbound::http::bids::set_bid_status,
        crate::inbound::http::bids::submit_decision,
        crate::inbound::http::bids::edit_bid,
    ),
    components(schemas(
        Error,
        ErrorCode,
        RegisterUserBody,
        UserResponse,
        OrganizationBody,
        OrganizationResponse,
        CreateTenderBody,
        EditTenderBody,
        TenderResponse,
        TenderStatusResponse,
        CreateBidBody,
        EditBidBody,
        BidResponse,
        BidStatusResponse,
        TenderStatusSchema,
        ServiceTypeSchema,
        BidStatusSchema,
        DecisionSchema,
        AuthorTypeSchema,
        OrganizationTypeSchema,
    )),
    tags(
        (name = "health", description = "Liveness and readiness checks"),
        (name = "users", description = "User directory"),
        (name = "organizations", description = "Organization management"),
        (name = "tenders", description = "Tender lifecycle"),
        (name = "bids", description = "Bid lifecycle and decisions")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::openapi::component_fields;
    use rstest::rstest;

    #[rstest]
    fn error_schema_lists_wire_fields() {
        let fields = component_fields(&ApiDoc::openapi(), "Error");
        for field in ["code", "message", "traceId", "details"] {
            assert!(fields.iter().any(|f| f == field), "missing {field}");
        }
    }

    #[rstest]
    fn tender_output_uses_camel_case() {
        let fields = component_fields(&ApiDoc::openapi(), "TenderResponse");
        assert!(fields.iter().any(|f| f == "serviceType"));
        assert!(fields.iter().any(|f| f == "createdAt"));
    }

    #[rstest]
    #[case("/api/ping")]
    #[case("/api/tenders/{id}/status")]
    #[case("/api/bids/{id}/submit_decision")]
    #[case("/api/organizations/{id}/users/{username}/make_responsible")]
    fn documents_path(#[case] path: &str) {
        assert!(ApiDoc::openapi().paths.paths.contains_key(path));
    }
}
