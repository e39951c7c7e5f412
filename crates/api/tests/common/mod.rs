//! Common test utilities for integration tests.
//!
//! Builds the router with in-memory collaborators so no test talks to Twilio.

// Not every integration test uses every helper.
#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request},
    response::Response,
    Router,
};
use domain::services::MockSmsSender;
use patient_commons_api::{
    app::{create_app, AppState},
    config::Config,
    services::PdfGenerator,
};

/// Test configuration with the embedded defaults.
pub fn test_config() -> Config {
    Config::load_for_test(&[]).expect("Failed to load test config")
}

/// Create a test application router backed by the given SMS mock.
pub fn create_test_app_with_sms(config: Config, sms: MockSmsSender) -> Router {
    let pdf = PdfGenerator::new(config.pdf.clone());
    let state = AppState {
        config: Arc::new(config),
        sms: Arc::new(sms),
        pdf: Arc::new(pdf),
    };
    create_app(state)
}

/// Create a test application router with a recording SMS mock.
pub fn create_test_app(config: Config) -> Router {
    create_test_app_with_sms(config, MockSmsSender::new())
}

/// Build a JSON request.
pub fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Build a GET request.
pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Parse response body as JSON.
pub async fn parse_response_body(response: Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null)
}

/// Read the raw response body.
pub async fn response_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}
