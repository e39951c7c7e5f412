//! Document rendering endpoint.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::ValidatedJson;

/// Request payload for rendering a PDF.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RenderPdfRequest {
    #[validate(length(min = 1, message = "HTML content is required"))]
    pub html: String,
}

/// `POST /api/v1/documents/pdf`
pub async fn render_pdf(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RenderPdfRequest>,
) -> Result<Response, ApiError> {
    let bytes = state.pdf.generate_pdf_async(request.html).await?;

    Ok(([(header::CONTENT_TYPE, "application/pdf")], bytes).into_response())
}
