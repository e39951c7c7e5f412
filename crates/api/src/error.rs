use std::collections::BTreeMap;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::services::SmsError;
use serde::Serialize;
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::services::pdf::PdfError;

/// Every error a handler can return. `IntoResponse` is the one place where
/// errors become HTTP responses.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Improper request: {0}")]
    ImproperRequest(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Validation failed for {} field(s)", .0.len())]
    FieldValidation(BTreeMap<String, String>),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Resource creation failed: {0}")]
    ResourceCreation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// One entry of the list-shaped error body.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetail {
    pub code: String,
    pub detailed_message: String,
    pub message: String,
}

impl ErrorDetail {
    fn new(status: StatusCode, detailed_message: impl Into<String>) -> Self {
        Self {
            code: status.as_u16().to_string(),
            detailed_message: detailed_message.into(),
            message: status.canonical_reason().unwrap_or_default().to_string(),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::ImproperRequest(_)
            | ApiError::Validation(_)
            | ApiError::FieldValidation(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::ResourceCreation(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::Unauthorized(msg) | ApiError::Validation(msg) => (status, msg).into_response(),
            ApiError::FieldValidation(fields) => (status, Json(fields)).into_response(),
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                let body = vec![ErrorDetail::new(status, "An internal error occurred")];
                (status, Json(body)).into_response()
            }
            ApiError::NotFound(msg)
            | ApiError::Forbidden(msg)
            | ApiError::ImproperRequest(msg)
            | ApiError::Conflict(msg)
            | ApiError::ResourceCreation(msg) => {
                (status, Json(vec![ErrorDetail::new(status, msg)])).into_response()
            }
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields = BTreeMap::new();
        collect_field_errors(&errors, "", &mut fields);
        ApiError::FieldValidation(fields)
    }
}

/// Flattens nested validation errors into `path -> message`, keeping the
/// first message reported for each path.
fn collect_field_errors(
    errors: &ValidationErrors,
    prefix: &str,
    out: &mut BTreeMap<String, String>,
) {
    for (field, kind) in errors.errors() {
        let path = join_path(prefix, &to_camel_case(field));
        match kind {
            ValidationErrorsKind::Field(list) => {
                if let Some(first) = list.first() {
                    let message = first
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("invalid value ({})", first.code));
                    out.entry(path).or_insert(message);
                }
            }
            ValidationErrorsKind::Struct(inner) => collect_field_errors(inner, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_field_errors(inner, &format!("{}[{}]", path, index), out);
                }
            }
        }
    }
}

fn join_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", prefix, field)
    }
}

fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = !out.is_empty();
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<SmsError> for ApiError {
    fn from(err: SmsError) -> Self {
        ApiError::Internal(error_chain(&err))
    }
}

impl From<PdfError> for ApiError {
    fn from(err: PdfError) -> Self {
        ApiError::Internal(error_chain(&err))
    }
}

/// Renders an error and its sources as `outer: cause: root cause`.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut rendered = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        rendered.push_str(": ");
        rendered.push_str(&cause.to_string());
        source = cause.source();
    }
    rendered
}
