//! Authenticated client behavior: bearer attachment and status mapping.

mod common;

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

use botica_api::{ApiError, Session};

#[tokio::test]
async fn bearer_token_attached_when_present() {
    let backend = common::start_with_session(Session::with_token("secret-token")).await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(header("authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::envelope(json!([]))))
        .expect(1)
        .mount(&backend.server)
        .await;

    backend.client.get_json("/products").await.unwrap();
}

#[tokio::test]
async fn no_authorization_header_without_token() {
    let backend = common::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::envelope(json!([]))))
        .mount(&backend.server)
        .await;

    backend.client.get_json("/products").await.unwrap();

    let requests = backend.server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn status_401_maps_to_auth_failure_and_keeps_token() {
    let session = Session::with_token("expired-token");
    let backend = common::start_with_session(session.clone()).await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "expired" })))
        .mount(&backend.server)
        .await;

    match backend.client.get_json("/products").await {
        Err(ApiError::AuthFailed { status, message }) => {
            assert_eq!(status, 401);
            assert_eq!(message, "expired");
        }
        other => panic!("expected auth failure, got {:?}", other),
    }

    // The contract only notifies; it never clears the stored token
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn statuses_above_401_are_treated_as_auth_failures() {
    let backend = common::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "boom" })))
        .mount(&backend.server)
        .await;

    match backend.client.get_json("/products").await {
        Err(ApiError::AuthFailed { status, .. }) => assert_eq!(status, 500),
        other => panic!("expected auth failure, got {:?}", other),
    }
}

#[tokio::test]
async fn status_400_is_a_plain_rejection() {
    let backend = common::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "message": "bad page number" })),
        )
        .mount(&backend.server)
        .await;

    match backend.client.get_json("/products").await {
        Err(ApiError::Rejected { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "bad page number");
        }
        other => panic!("expected rejection, got {:?}", other),
    }
}

#[tokio::test]
async fn error_body_without_message_gets_fallback() {
    let backend = common::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&backend.server)
        .await;

    match backend.client.get_json("/products").await {
        Err(ApiError::AuthFailed { message, .. }) => {
            assert_eq!(message, "unexpected server error");
        }
        other => panic!("expected auth failure, got {:?}", other),
    }
}
