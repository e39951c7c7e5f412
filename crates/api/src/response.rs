//! Success envelope shared by handlers.

use axum::http::StatusCode;
use serde::Serialize;

/// `{"success": {"code": <status>, "message": <message>}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuccessResponse {
    pub success: SuccessBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuccessBody {
    pub code: u16,
    pub message: String,
}

/// Builds the success envelope for `status` and `message`.
pub fn success_response(status: StatusCode, message: impl Into<String>) -> SuccessResponse {
    SuccessResponse {
        success: SuccessBody {
            code: status.as_u16(),
            message: message.into(),
        },
    }
}
