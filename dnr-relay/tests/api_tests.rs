//! Integration tests for the dnr-relay HTTP surface
//!
//! Tests cover:
//! - Contact submission success / validation / delivery failures
//! - No-rollback behaviour when the confirmation fails
//! - CORS preflight and CORS headers on every response
//! - Health and build info endpoints

mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
};
use common::{app_with, RecordingTransport, BUSINESS_ADDRESS};
use serde_json::{json, Value};
use tower::util::ServiceExt; // for `oneshot` method

/// Test helper: POST a body to the contact endpoint
fn contact_request(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/send-contact-email")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

/// Test helper: Extract JSON body from response
async fn extract_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

fn assert_cors_headers(response: &Response) {
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_HEADERS],
        "authorization, x-client-info, apikey, content-type"
    );
}

fn valid_submission() -> Value {
    json!({
        "name": "Jo",
        "email": "jo@example.com",
        "phone": "",
        "vehicleType": "",
        "message": "Need a quote"
    })
}

// =============================================================================
// Contact submission
// =============================================================================

#[tokio::test]
async fn test_valid_submission_sends_both_emails() {
    let transport = RecordingTransport::always_ok();
    let app = app_with(transport.clone());

    let response = app
        .oneshot(contact_request(valid_submission().to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors_headers(&response);
    assert_eq!(
        extract_json(response).await,
        json!({ "success": true, "message": "Emails sent successfully" })
    );

    let sent = transport.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].to, vec![BUSINESS_ADDRESS.to_string()]);
    assert_eq!(sent[0].subject, "New Enquiry from Jo");
    assert_eq!(sent[1].to, vec!["jo@example.com".to_string()]);
    assert_eq!(sent[1].subject, "Thank you for contacting DNR Transmissions");
}

#[tokio::test]
async fn test_empty_name_is_rejected_without_sending() {
    let transport = RecordingTransport::always_ok();
    let app = app_with(transport.clone());

    let body = json!({ "name": "", "email": "a@b.com", "message": "hi" });
    let response = app.oneshot(contact_request(body.to_string())).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_cors_headers(&response);
    assert_eq!(
        extract_json(response).await,
        json!({ "error": "Name, email, and message are required" })
    );
    assert!(transport.sent().is_empty());
}

#[tokio::test]
async fn test_whitespace_only_message_is_rejected() {
    let transport = RecordingTransport::always_ok();
    let app = app_with(transport.clone());

    let body = json!({ "name": "Jo", "email": "jo@example.com", "message": "   \n" });
    let response = app.oneshot(contact_request(body.to_string())).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(transport.sent().is_empty());
}

#[tokio::test]
async fn test_null_optional_fields_still_send_both_emails() {
    let transport = RecordingTransport::always_ok();
    let app = app_with(transport.clone());

    let body = json!({
        "name": "Jo",
        "email": "jo@example.com",
        "phone": null,
        "vehicleType": null,
        "message": "hi"
    });
    let response = app.oneshot(contact_request(body.to_string())).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let sent = transport.sent();
    assert_eq!(sent.len(), 2);
    assert!(sent[0].html.contains("Not provided"));
    assert!(sent[0].html.contains("Not specified"));
}

#[tokio::test]
async fn test_null_name_is_required_fields_error() {
    let transport = RecordingTransport::always_ok();
    let app = app_with(transport.clone());

    let body = json!({ "name": null, "email": "jo@example.com", "message": "hi" });
    let response = app.oneshot(contact_request(body.to_string())).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        extract_json(response).await,
        json!({ "error": "Name, email, and message are required" })
    );
    assert!(transport.sent().is_empty());
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let transport = RecordingTransport::always_ok();
    let app = app_with(transport.clone());

    let response = app.oneshot(contact_request("{not json")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(extract_json(response).await, json!({ "error": "invalid request body" }));
    assert!(transport.sent().is_empty());
}

#[tokio::test]
async fn test_first_send_failure_skips_confirmation() {
    let transport = RecordingTransport::failing_on(&[1]);
    let app = app_with(transport.clone());

    let response = app
        .oneshot(contact_request(valid_submission().to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_cors_headers(&response);
    assert_eq!(extract_json(response).await, json!({ "error": "send 1 rejected" }));
    assert_eq!(transport.sent().len(), 1, "confirmation must not be attempted");
}

#[tokio::test]
async fn test_second_send_failure_is_still_an_error() {
    let transport = RecordingTransport::failing_on(&[2]);
    let app = app_with(transport.clone());

    let response = app
        .oneshot(contact_request(valid_submission().to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(extract_json(response).await, json!({ "error": "send 2 rejected" }));

    let sent = transport.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].to, vec![BUSINESS_ADDRESS.to_string()]);
}

// =============================================================================
// CORS
// =============================================================================

#[tokio::test]
async fn test_options_preflight_returns_empty_response_with_cors() {
    let transport = RecordingTransport::always_ok();
    let app = app_with(transport.clone());

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/send-contact-email")
        .header(header::ORIGIN, "https://dnrtransmissions.co.za")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::from("ignored payload"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert!(response.status().is_success());
    assert_cors_headers(&response);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(bytes.is_empty());
    assert!(transport.sent().is_empty());
}

// =============================================================================
// Health / build info
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let app = app_with(RecordingTransport::always_ok());

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "dnr-relay");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_build_info_endpoint() {
    let app = app_with(RecordingTransport::always_ok());

    let request = Request::builder()
        .uri("/build_info")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response).await;
    assert!(body["git_hash"].is_string());
    assert!(body["build_profile"].is_string());
    assert!(body["uptime_seconds"].as_i64().unwrap() >= 0);
}

#[tokio::test]
async fn test_get_on_contact_endpoint_not_allowed() {
    let app = app_with(RecordingTransport::always_ok());

    let request = Request::builder()
        .uri("/send-contact-email")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
