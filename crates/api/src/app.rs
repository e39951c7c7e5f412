use axum::{
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Router,
};
use domain::services::SmsSender;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::request_logging;
use crate::routes::{documents, notifications, patient_meta, status};
use crate::services::{PdfGenerator, TwilioSmsService};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub sms: Arc<dyn SmsSender>,
    pub pdf: Arc<PdfGenerator>,
}

impl AppState {
    /// Wires the production collaborators from configuration.
    pub fn from_config(config: Config) -> Result<Self, domain::services::SmsError> {
        let sms = TwilioSmsService::new(config.twilio.clone())?;
        if !sms.is_configured() {
            tracing::warn!("Twilio credentials not set; SMS sending is disabled");
        }
        let pdf = PdfGenerator::new(config.pdf.clone());

        Ok(Self {
            config: Arc::new(config),
            sms: Arc::new(sms),
            pdf: Arc::new(pdf),
        })
    }
}

pub fn create_app(state: AppState) -> Router {
    let config = state.config.clone();

    let cors = if config.server.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .server
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Status routes stay at the root for load balancer health checks
    let status_routes = Router::new()
        .route("/status/app", get(status::app_status))
        .route("/status/db", get(status::db_status));

    let api_routes = Router::new()
        .route(
            "/api/v1/patient-meta/validate",
            post(patient_meta::validate_patient_meta),
        )
        .route("/api/v1/notifications/sms", post(notifications::send_sms))
        .route("/api/v1/documents/pdf", post(documents::render_pdf));

    Router::new()
        .merge(status_routes)
        .merge(api_routes)
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(middleware::from_fn(request_logging))
        .with_state(state)
}
