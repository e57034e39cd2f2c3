// tests/integration/tier_update_tests.rs

use crate::common::{app_helper, auth_helper, test_data};
use axum::http::{Method, StatusCode};
use httpmock::prelude::*;
use serde_json::json;

const URI: &str = "/api/v1/translations/admin/subscription";
const TIER_PATH: &str = "/kness-app-api/api/v1/client/subscription/member@example.com/tier";

#[tokio::test]
async fn test_update_tier_returns_unwrapped_payload() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(TIER_PATH)
                .json_body(json!({"tier": "pro"}));
            then.status(200).json_body(json!({"data": {"tier": "pro"}}));
        })
        .await;

    let admin = test_data::admin();
    let app = app_helper::setup_app(&server, vec![admin.clone()]);
    let token = auth_helper::token_for(&admin);

    let (status, body) = auth_helper::send_json(
        &app,
        auth_helper::create_authenticated_request(
            Method::PUT,
            URI,
            &token,
            Some(json!({"email": "member@example.com", "tier": "pro"})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"tier": "pro"}));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_update_tier_returns_raw_payload_without_envelope() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(TIER_PATH);
            then.status(200)
                .json_body(json!({"email": "member@example.com", "tier": "standard"}));
        })
        .await;

    let admin = test_data::admin();
    let app = app_helper::setup_app(&server, vec![admin.clone()]);
    let token = auth_helper::token_for(&admin);

    let (status, body) = auth_helper::send_json(
        &app,
        auth_helper::create_authenticated_request(
            Method::PUT,
            URI,
            &token,
            Some(json!({"email": "member@example.com", "tier": "standard"})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"email": "member@example.com", "tier": "standard"}));
}

#[tokio::test]
async fn test_invalid_tier_is_rejected_without_remote_call() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.any_request();
            then.status(200).json_body(json!({}));
        })
        .await;

    let admin = test_data::admin();
    let app = app_helper::setup_app(&server, vec![admin.clone()]);
    let token = auth_helper::token_for(&admin);

    let (status, body) = auth_helper::send_json(
        &app,
        auth_helper::create_authenticated_request(
            Method::PUT,
            URI,
            &token,
            Some(json!({"email": "member@example.com", "tier": "gold"})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "validation_error");
    assert_eq!(
        body["message"],
        "Invalid tier. Allowed values: standard, plus, pro"
    );
    assert_eq!(mock.calls_async().await, 0);
}

#[tokio::test]
async fn test_empty_email_is_rejected_without_remote_call() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.any_request();
            then.status(200).json_body(json!({}));
        })
        .await;

    let admin = test_data::admin();
    let app = app_helper::setup_app(&server, vec![admin.clone()]);
    let token = auth_helper::token_for(&admin);

    let (status, body) = auth_helper::send_json(
        &app,
        auth_helper::create_authenticated_request(
            Method::PUT,
            URI,
            &token,
            Some(json!({"email": "", "tier": "pro"})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "validation_errors");
    assert!(body["validation_errors"]["email"].is_array());
    assert_eq!(mock.calls_async().await, 0);
}

#[tokio::test]
async fn test_remote_error_is_surfaced_with_status_and_body() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(TIER_PATH);
            then.status(500).body("internal error");
        })
        .await;

    let admin = test_data::admin();
    let app = app_helper::setup_app(&server, vec![admin.clone()]);
    let token = auth_helper::token_for(&admin);

    let (status, body) = auth_helper::send_json(
        &app,
        auth_helper::create_authenticated_request(
            Method::PUT,
            URI,
            &token,
            Some(json!({"email": "member@example.com", "tier": "plus"})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error_type"], "upstream_error");
    assert_eq!(body["details"]["status"], 500);
    assert_eq!(body["details"]["body"], "internal error");
}

#[tokio::test]
async fn test_remote_not_found_keeps_status() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(TIER_PATH);
            then.status(404).body(r#"{"message":"user not found"}"#);
        })
        .await;

    let admin = test_data::admin();
    let app = app_helper::setup_app(&server, vec![admin.clone()]);
    let token = auth_helper::token_for(&admin);

    let (status, body) = auth_helper::send_json(
        &app,
        auth_helper::create_authenticated_request(
            Method::PUT,
            URI,
            &token,
            Some(json!({"email": "member@example.com", "tier": "plus"})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["details"]["body"], r#"{"message":"user not found"}"#);
}

#[tokio::test]
async fn test_unreachable_remote_is_bad_gateway() {
    let admin = test_data::admin();
    let app = app_helper::build_app(
        app_helper::test_config_with_base("http://127.0.0.1:9"),
        std::sync::Arc::new(app_helper::InMemoryDirectory::new(vec![admin.clone()])),
    );
    let token = auth_helper::token_for(&admin);

    let (status, body) = auth_helper::send_json(
        &app,
        auth_helper::create_authenticated_request(
            Method::PUT,
            URI,
            &token,
            Some(json!({"email": "member@example.com", "tier": "pro"})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error_type"], "bad_gateway");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Failed to update subscription"));
}

#[tokio::test]
async fn test_update_tier_requires_admin() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.any_request();
            then.status(200).json_body(json!({}));
        })
        .await;

    let member = test_data::member();
    let app = app_helper::setup_app(&server, vec![member.clone()]);
    let token = auth_helper::token_for(&member);

    let (status, _) = auth_helper::send_json(
        &app,
        auth_helper::create_authenticated_request(
            Method::PUT,
            URI,
            &token,
            Some(json!({"email": "member@example.com", "tier": "pro"})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(mock.calls_async().await, 0);
}
