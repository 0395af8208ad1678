use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use chrono::{DateTime, Utc};
use relay_core_health_contracts::{HealthFeatureService, HealthStatus};
use relay_email_contracts::EmailDeliveryError;
use relay_utils::relay_version;
use serde::Serialize;

use crate::{errors::error, models::ApiSuccess};

/// `development` for debug builds, `production` otherwise.
pub const BUILD_ENVIRONMENT: &str = if cfg!(debug_assertions) {
    "development"
} else {
    "production"
};

pub fn router(service: Arc<impl HealthFeatureService>) -> Router<()> {
    Router::new()
        .route(
            "/api/health",
            routing::get(health).fallback(super::not_found),
        )
        .route(
            "/api/test-email",
            routing::get(test_email).fallback(super::not_found),
        )
        .with_state(service)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    message: &'static str,
    email_configured: bool,
    timestamp: DateTime<Utc>,
    /// seconds
    uptime: f64,
    version: &'static str,
    environment: &'static str,
}

async fn health(service: State<Arc<impl HealthFeatureService>>) -> Json<HealthResponse> {
    let HealthStatus {
        email_configured,
        timestamp,
        uptime,
    } = service.get_status();

    Json(HealthResponse {
        status: "healthy",
        message: "Server is running smoothly",
        email_configured,
        timestamp,
        uptime: uptime.as_secs_f64(),
        version: relay_version(),
        environment: BUILD_ENVIRONMENT,
    })
}

async fn test_email(service: State<Arc<impl HealthFeatureService>>) -> Response {
    match service.verify_delivery().await {
        Ok(()) => Json(ApiSuccess::new("Email transporter is configured correctly")).into_response(),
        Err(err) => error(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Email configuration error: {}", describe(&err)),
        ),
    }
}

/// A description of the failure that does not leak provider responses.
fn describe(err: &EmailDeliveryError) -> &'static str {
    match err {
        EmailDeliveryError::Auth(_) => "authentication with the email provider failed",
        EmailDeliveryError::Envelope(_) => "the email provider rejected the sender address",
        EmailDeliveryError::Other(_) => "the email provider could not be reached",
    }
}
