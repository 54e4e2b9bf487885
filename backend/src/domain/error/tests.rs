//! Tests for the structured domain error.

use std::error::Error as _;

use rstest::rstest;

use super::*;

#[derive(Debug, thiserror::Error)]
#[error("relation \"users\" does not exist")]
struct MissingRelation;

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::not_found("missing"), ErrorCode::NotFound)]
#[case(Error::conflict("taken"), ErrorCode::Conflict)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn display_without_cause_is_the_message() {
    let error = Error::not_found("No user with id abc");
    assert_eq!(error.to_string(), "No user with id abc");
    assert!(error.source().is_none());
    assert!(error.cause().is_none());
}

#[rstest]
fn display_with_cause_appends_cause_detail() {
    let error = Error::internal("Failed to retrieve users").with_cause(MissingRelation);
    assert_eq!(
        error.to_string(),
        "Failed to retrieve users: relation \"users\" does not exist"
    );
    assert_eq!(error.message(), "Failed to retrieve users");
}

#[rstest]
fn source_unwraps_to_original_cause() {
    let error = Error::internal("Could not update user").with_cause(MissingRelation);
    let source = error.source().expect("cause is exposed as source");
    assert!(source.downcast_ref::<MissingRelation>().is_some());
}

#[rstest]
fn clones_share_the_cause() {
    let error = Error::internal("boom").with_cause(MissingRelation);
    let cloned = error.clone();
    let (Some(original), Some(copy)) = (error.cause(), cloned.cause()) else {
        panic!("both errors should carry the cause");
    };
    assert!(Arc::ptr_eq(original, copy));
}

#[tokio::test]
async fn new_captures_trace_id_in_scope() {
    let trace_id: TraceId = "00000000-0000-0000-0000-000000000000"
        .parse()
        .expect("valid UUID");
    let error = TraceId::scope(trace_id, async { Error::conflict("taken") }).await;
    assert_eq!(
        error.trace_id(),
        Some("00000000-0000-0000-0000-000000000000")
    );
}

#[rstest]
fn new_has_no_trace_id_out_of_scope() {
    assert!(Error::internal("boom").trace_id().is_none());
}

#[rstest]
fn with_trace_id_overrides_capture() {
    let error = Error::invalid_request("bad").with_trace_id("abc");
    assert_eq!(error.trace_id(), Some("abc"));
}

#[rstest]
#[case(ErrorCode::InvalidRequest, "invalid_request")]
#[case(ErrorCode::NotFound, "not_found")]
#[case(ErrorCode::Conflict, "conflict")]
#[case(ErrorCode::InternalError, "internal_error")]
fn code_labels_match_serde_names(#[case] code: ErrorCode, #[case] label: &str) {
    assert_eq!(code.as_str(), label);
    let json = serde_json::to_value(code).expect("serialise code");
    assert_eq!(json, serde_json::Value::String(label.to_owned()));
}
