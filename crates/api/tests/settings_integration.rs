//! Integration tests for system settings endpoints.

mod common;

use axum::http::{Method, StatusCode};
use common::{get_request, json_request, parse_response_body, test_app, unique_suffix};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_put_setting_twice_keeps_last_value() {
    let app = test_app().await;
    let uri = format!("/api/v1/settings/poll_interval_{}", unique_suffix());

    for value in ["30", "60"] {
        let response = app
            .clone()
            .oneshot(json_request(
                Method::PUT,
                &uri,
                json!({"value": value, "setting_type": "integer"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let body = parse_response_body(app.oneshot(get_request(&uri)).await.unwrap()).await;
    assert_eq!(body["setting_value"], "60");
    assert_eq!(body["setting_type"], "integer");
}

#[tokio::test]
async fn test_put_setting_defaults_type() {
    let app = test_app().await;

    let response = app
        .oneshot(json_request(
            Method::PUT,
            &format!("/api/v1/settings/site_name_{}", unique_suffix()),
            json!({"value": "Main NOC"}),
        ))
        .await
        .unwrap();

    assert_eq!(parse_response_body(response).await["setting_type"], "string");
}

#[tokio::test]
async fn test_put_setting_rejects_bad_key_and_type() {
    let app = test_app().await;

    let bad_key = app
        .clone()
        .oneshot(json_request(Method::PUT, "/api/v1/settings/Bad-Key", json!({"value": "1"})))
        .await
        .unwrap();
    assert_eq!(bad_key.status(), StatusCode::BAD_REQUEST);

    let bad_type = app
        .oneshot(json_request(
            Method::PUT,
            "/api/v1/settings/good_key",
            json!({"value": "1", "setting_type": "blob"}),
        ))
        .await
        .unwrap();
    assert_eq!(bad_type.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_put_setting_rejects_overlong_key() {
    let app = test_app().await;
    let uri = format!("/api/v1/settings/{}", "a".repeat(101));

    let response = app
        .clone()
        .oneshot(json_request(Method::PUT, &uri, json!({"value": "1"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(parse_response_body(response).await["error"], "validation_error");

    let response = app.oneshot(get_request(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_settings() {
    let app = test_app().await;

    let response = app.oneshot(get_request("/api/v1/settings")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(parse_response_body(response).await["settings"].is_array());
}

#[tokio::test]
async fn test_get_missing_setting_is_not_found() {
    let app = test_app().await;

    let response = app
        .oneshot(get_request(&format!("/api/v1/settings/missing_{}", unique_suffix())))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
