//! Patient metadata endpoints.

use axum::{http::StatusCode, Json};
use domain::models::PatientMetaRequest;
use tracing::info;

use crate::error::ApiError;
use crate::extractors::ValidatedJson;
use crate::response::{success_response, SuccessResponse};

/// `POST /api/v1/patient-meta/validate`
///
/// Binds and validates a patient metadata payload without storing it.
pub async fn validate_patient_meta(
    ValidatedJson(request): ValidatedJson<PatientMetaRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    info!(
        allergies = request.allergies.as_ref().map_or(0, Vec::len),
        vitals = request.vitals.as_ref().map_or(0, Vec::len),
        has_history = request.medical_history.is_some(),
        "Patient metadata validated"
    );

    Ok(Json(success_response(
        StatusCode::OK,
        "Patient metadata is valid",
    )))
}
