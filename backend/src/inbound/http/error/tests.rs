//! Tests for HTTP error mapping.

use super::*;
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use rstest::{fixture, rstest};
use rstest_bdd_macros::{given, then, when};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("login first"), StatusCode::UNAUTHORIZED)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("raced"), StatusCode::CONFLICT)]
#[case(Error::service_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] err: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&err), status);
}

async fn assert_error_response(
    error: Error,
    expected_status: StatusCode,
    expected_trace_id: Option<&str>,
) -> Error {
    let response = ResponseError::error_response(&error);
    assert_eq!(response.status(), expected_status);

    let header = response.headers().get(TRACE_ID_HEADER);
    match expected_trace_id {
        Some(expected) => {
            let trace_id = header
                .expect("trace-id header is set by error_response")
                .to_str()
                .expect("trace-id is valid UTF-8");
            assert_eq!(trace_id, expected);
        }
        None => assert!(header.is_none(), "trace-id header should not be present"),
    }

    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    serde_json::from_slice(&bytes).expect("error JSON deserialisation succeeds")
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted(expected_trace_id: String) {
    let error = Error::internal("connection string leaked")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({ "secret": "x" }));

    let payload = assert_error_response(
        error,
        StatusCode::INTERNAL_SERVER_ERROR,
        Some(expected_trace_id.as_str()),
    )
    .await;

    assert_eq!(payload.message(), INTERNAL_MESSAGE);
    assert!(payload.details().is_none());
}

#[rstest]
#[actix_web::test]
async fn ownership_denials_keep_their_reason(expected_trace_id: String) {
    let error = Error::unauthorized("only the owner may change this fruit")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({ "code": "not_owner" }));

    let payload = assert_error_response(
        error,
        StatusCode::UNAUTHORIZED,
        Some(expected_trace_id.as_str()),
    )
    .await;

    assert_eq!(payload.code(), ErrorCode::Unauthorized);
    assert_eq!(payload.reason(), Some("not_owner"));
}

#[rstest]
#[actix_web::test]
async fn errors_without_trace_omit_the_header() {
    let payload =
        assert_error_response(Error::not_found("missing"), StatusCode::NOT_FOUND, None).await;
    assert_eq!(payload.trace_id(), None);
}

#[rstest]
fn error_page_location_encodes_message() {
    assert_eq!(
        error_page_location("only the author may delete this comment"),
        "/error?error=only+the+author+may+delete+this+comment"
    );
    assert_eq!(error_page_location("a&b=c"), "/error?error=a%26b%3Dc");
}

#[rstest]
fn redirect_to_error_page_is_see_other_with_redacted_message(expected_trace_id: String) {
    let error = Error::internal("disk on fire").with_trace_id(expected_trace_id.clone());
    let response = redirect_to_error_page(&error);

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some("/error?error=Internal+server+error")
    );
    assert_eq!(
        response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|v| v.to_str().ok()),
        Some(expected_trace_id.as_str())
    );
}

#[given("a conflict error code")]
fn a_conflict_error_code() -> ErrorCode {
    ErrorCode::Conflict
}

#[when("the adapter maps the code to an HTTP status")]
fn the_adapter_maps_the_code_to_http_status(code: ErrorCode) -> StatusCode {
    status_for(code)
}

#[then("the status is 409 Conflict")]
fn the_status_is_409_conflict(status: StatusCode) {
    assert_eq!(status, StatusCode::CONFLICT);
}

#[test]
fn conflict_code_maps_to_409() {
    the_status_is_409_conflict(the_adapter_maps_the_code_to_http_status(
        a_conflict_error_code(),
    ));
}

#[test]
fn from_actix_error_is_redacted_internal_error() {
    let err: Error = actix_web::error::ErrorBadRequest("boom").into();

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), INTERNAL_MESSAGE);
    assert!(err.details().is_none());
}
