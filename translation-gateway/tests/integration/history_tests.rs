// tests/integration/history_tests.rs

use crate::common::{app_helper, auth_helper, test_data};
use axum::http::{Method, StatusCode};
use httpmock::prelude::*;
use serde_json::json;

const HISTORY_PATH: &str = "/open_web_ui_api/deepl/cache/history";

#[tokio::test]
async fn test_history_passes_remote_body_through() {
    let server = MockServer::start_async().await;
    let remote_body = json!({
        "success": true,
        "count": 2,
        "total": 12,
        "history": [
            {"id": "h2", "source_text": "Hello", "translated_text": "Привіт"},
            {"id": "h1", "source_text": "Bye", "translated_text": "Бувай"}
        ],
        "extra": "kept"
    });
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(HISTORY_PATH)
                .query_param("limit", "2")
                .query_param("offset", "10")
                .query_param("email", "member@example.com");
            then.status(200).json_body(remote_body.clone());
        })
        .await;

    let member = test_data::member();
    let app = app_helper::setup_app(&server, vec![member.clone()]);
    let token = auth_helper::token_for(&member);

    let (status, body) = auth_helper::send_json(
        &app,
        auth_helper::create_authenticated_request(
            Method::GET,
            "/api/v1/translations/history?limit=2&offset=10",
            &token,
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, remote_body);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_history_uses_default_pagination() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(HISTORY_PATH)
                .query_param("limit", "50")
                .query_param("offset", "0");
            then.status(200)
                .json_body(json!({"success": true, "count": 0, "total": 0, "history": []}));
        })
        .await;

    let member = test_data::member();
    let app = app_helper::setup_app(&server, vec![member.clone()]);
    let token = auth_helper::token_for(&member);

    let (status, _) = auth_helper::send_json(
        &app,
        auth_helper::create_authenticated_request(
            Method::GET,
            "/api/v1/translations/history",
            &token,
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_history_forwards_out_of_range_values_unchanged() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(HISTORY_PATH)
                .query_param("limit", "-5")
                .query_param("offset", "100000");
            then.status(200)
                .json_body(json!({"success": true, "count": 0, "total": 0, "history": []}));
        })
        .await;

    let member = test_data::member();
    let app = app_helper::setup_app(&server, vec![member.clone()]);
    let token = auth_helper::token_for(&member);

    let (status, _) = auth_helper::send_json(
        &app,
        auth_helper::create_authenticated_request(
            Method::GET,
            "/api/v1/translations/history?limit=-5&offset=100000",
            &token,
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_history_falls_back_on_404() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(HISTORY_PATH);
            then.status(404).body("not found");
        })
        .await;

    let member = test_data::member();
    let app = app_helper::setup_app(&server, vec![member.clone()]);
    let token = auth_helper::token_for(&member);

    let (status, body) = auth_helper::send_json(
        &app,
        auth_helper::create_authenticated_request(
            Method::GET,
            "/api/v1/translations/history",
            &token,
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"success": false, "count": 0, "total": 0, "history": []})
    );
}

#[tokio::test]
async fn test_history_falls_back_when_unreachable() {
    let member = test_data::member();
    let app = app_helper::build_app(
        app_helper::test_config_with_base("http://127.0.0.1:9"),
        std::sync::Arc::new(app_helper::InMemoryDirectory::new(vec![member.clone()])),
    );
    let token = auth_helper::token_for(&member);

    let (status, body) = auth_helper::send_json(
        &app,
        auth_helper::create_authenticated_request(
            Method::GET,
            "/api/v1/translations/history",
            &token,
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"success": false, "count": 0, "total": 0, "history": []})
    );
}

#[tokio::test]
async fn test_pending_user_cannot_read_history() {
    let server = MockServer::start_async().await;
    let pending = test_data::pending();
    let app = app_helper::setup_app(&server, vec![pending.clone()]);
    let token = auth_helper::token_for(&pending);

    let (status, _) = auth_helper::send_json(
        &app,
        auth_helper::create_authenticated_request(
            Method::GET,
            "/api/v1/translations/history",
            &token,
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}
