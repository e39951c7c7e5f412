//! Liveness endpoints.

use axum::{http::header, response::IntoResponse};

pub const APP_STATUS_BODY: &str = r#"{"message": "I am up, for sure"}"#;
pub const DB_STATUS_BODY: &str = r#"{"message": "DB is up"}"#;

/// `GET /status/app`: 200 whenever the process is serving requests.
pub async fn app_status() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/json")], APP_STATUS_BODY)
}

/// `GET /status/db`: static answer. This service owns no database
/// connection, so there is nothing to check.
pub async fn db_status() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/json")], DB_STATUS_BODY)
}
