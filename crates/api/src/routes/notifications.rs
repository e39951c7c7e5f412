//! SMS notification endpoint.

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::ValidatedJson;
use crate::response::{success_response, SuccessResponse};

/// Request payload for sending an SMS.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendSmsRequest {
    #[validate(length(min = 1, message = "Recipient number is required"))]
    pub to: String,

    #[validate(length(
        min = 1,
        max = 1600,
        message = "Message must be between 1 and 1600 characters"
    ))]
    pub message: String,
}

/// `POST /api/v1/notifications/sms`
pub async fn send_sms(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SendSmsRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let delivery = state.sms.send_sms(&request.to, &request.message).await?;

    info!(sid = %delivery.sid, "SMS accepted by provider");

    Ok(Json(success_response(
        StatusCode::OK,
        format!("SMS sent with SID: {}", delivery.sid),
    )))
}
