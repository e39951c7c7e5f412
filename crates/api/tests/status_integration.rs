//! Integration tests for the liveness endpoints.

mod common;

use axum::http::{header, StatusCode};
use common::{create_test_app, get_request, parse_response_body, test_config};
use patient_commons_api::middleware::REQUEST_ID_HEADER;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_app_status() {
    let app = create_test_app(test_config());

    let response = app.oneshot(get_request("/status/app")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json"
    );
    assert_eq!(
        parse_response_body(response).await,
        json!({ "message": "I am up, for sure" })
    );
}

#[tokio::test]
async fn test_db_status() {
    let app = create_test_app(test_config());

    let response = app.oneshot(get_request("/status/db")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        parse_response_body(response).await,
        json!({ "message": "DB is up" })
    );
}

#[tokio::test]
async fn test_status_sets_request_id() {
    let app = create_test_app(test_config());

    let response = app.oneshot(get_request("/status/app")).await.unwrap();

    let request_id = response.headers().get(REQUEST_ID_HEADER);
    assert!(request_id.is_some());
    assert!(!request_id.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = create_test_app(test_config());

    let response = app.oneshot(get_request("/status/cache")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
