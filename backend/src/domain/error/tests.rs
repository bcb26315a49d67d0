//! Tests for the domain error payload and its trace propagation.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(Error::not_authenticated("x"), ErrorCode::NotAuthenticated)]
#[case(Error::permission_denied("x"), ErrorCode::PermissionDenied)]
#[case(Error::invalid_status_value("x"), ErrorCode::InvalidStatusValue)]
#[case(Error::invalid_creation_state("x"), ErrorCode::InvalidCreationState)]
#[case(Error::conflicting_bid("x"), ErrorCode::ConflictingBid)]
#[case(Error::self_bid_forbidden("x"), ErrorCode::SelfBidForbidden)]
#[case(Error::already_responsible("x"), ErrorCode::AlreadyResponsible)]
#[case(Error::internal("x"), ErrorCode::InternalFailure)]
fn constructors_set_matching_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
    assert_eq!(error.message(), "x");
}

#[rstest]
fn new_returns_none_when_trace_id_out_of_scope() {
    let error = Error::internal("boom");
    assert!(error.trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn new_captures_trace_id_in_scope(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id
        .parse()
        .expect("fixtures provide a valid UUID");
    let error = TraceId::scope(trace_id, async move { Error::not_found("missing") }).await;

    assert_eq!(error.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
fn serialises_in_camel_case_with_snake_case_code(expected_trace_id: String) {
    let error = Error::conflicting_bid("your organization already has bid to this tender")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({ "tenderId": 42 }));

    let value = serde_json::to_value(&error).expect("serialise error");
    assert_eq!(
        value,
        json!({
            "code": "conflicting_bid",
            "message": "your organization already has bid to this tender",
            "traceId": expected_trace_id,
            "details": { "tenderId": 42 },
        })
    );
}

#[rstest]
fn omits_absent_optional_fields() {
    let value = serde_json::to_value(Error::self_bid_forbidden("no")).expect("serialise error");
    assert!(value.get("traceId").is_none());
    assert!(value.get("details").is_none());
}

#[rstest]
fn display_uses_message() {
    assert_eq!(Error::username_taken("taken").to_string(), "taken");
}
