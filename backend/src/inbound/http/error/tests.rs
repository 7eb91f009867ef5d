//! Tests for HTTP error mapping.

use super::*;
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("no auth"), StatusCode::UNAUTHORIZED)]
#[case(Error::not_found("User profile not found"), StatusCode::NOT_FOUND)]
#[case(
    Error::conflict("You can only add up to 10 emergency contacts"),
    StatusCode::CONFLICT
)]
#[case(
    Error::unprocessable("No emergency contacts found. Please add emergency contacts first."),
    StatusCode::UNPROCESSABLE_ENTITY
)]
#[case(Error::service_unavailable("store down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), status);
}

async fn assert_error_response(
    error: Error,
    expected_status: StatusCode,
    expected_trace_id: Option<&str>,
) -> serde_json::Value {
    let response = ResponseError::error_response(&error);
    assert_eq!(response.status(), expected_status);

    let header = response.headers().get(TRACE_ID_HEADER);
    match expected_trace_id {
        Some(expected) => {
            let trace_id = header
                .expect("trace-id header is set by error_response")
                .to_str()
                .expect("trace-id is ascii");
            assert_eq!(trace_id, expected);
        }
        None => assert!(header.is_none(), "trace-id header should be absent"),
    }

    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    serde_json::from_slice(&bytes).expect("error JSON decodes")
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted(expected_trace_id: String) {
    let error = Error::internal("SMS gateway credentials not configured")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({"secret": "x"}));

    let body = assert_error_response(
        error,
        StatusCode::INTERNAL_SERVER_ERROR,
        Some(expected_trace_id.as_str()),
    )
    .await;

    assert_eq!(
        body,
        json!({
            "code": "internal_error",
            "message": "Internal server error",
            "traceId": TRACE_ID,
        })
    );
}

#[rstest]
#[actix_web::test]
async fn precondition_errors_keep_message_and_details(expected_trace_id: String) {
    let error = Error::unprocessable("No emergency contacts found. Please add emergency contacts first.")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({"code": "no_contacts"}));

    let body = assert_error_response(
        error,
        StatusCode::UNPROCESSABLE_ENTITY,
        Some(expected_trace_id.as_str()),
    )
    .await;

    assert_eq!(body["code"], "unprocessable");
    assert_eq!(
        body["message"],
        "No emergency contacts found. Please add emergency contacts first."
    );
    assert_eq!(body["details"], json!({"code": "no_contacts"}));
}

#[rstest]
#[actix_web::test]
async fn error_without_trace_id_omits_trace_header() {
    let error = Error::invalid_request("bad").with_details(json!({"field": "name"}));

    let body = assert_error_response(error, StatusCode::BAD_REQUEST, None).await;
    assert!(body.get("traceId").is_none());
    assert_eq!(body["details"], json!({"field": "name"}));
}

#[test]
fn from_actix_error_is_redacted_internal_error() {
    let err: Error = actix_web::error::ErrorBadRequest("boom").into();

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), "Internal server error");
    assert_eq!(err.details(), None);
}
