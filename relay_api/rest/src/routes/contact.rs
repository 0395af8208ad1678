use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use relay_core_contact_contracts::{ContactFeatureService, ContactSubmitError};

use crate::{
    errors::error,
    extractors::payload::Payload,
    models::{
        contact::{ApiContactForm, ApiMissingFields, ApiMissingFieldsError},
        ApiSuccess,
    },
};

pub fn router(service: Arc<impl ContactFeatureService>) -> Router<()> {
    Router::new()
        .route(
            "/api/contact",
            routing::post(submit).fallback(super::not_found),
        )
        .with_state(service)
}

async fn submit(
    service: State<Arc<impl ContactFeatureService>>,
    Payload(form): Payload<ApiContactForm>,
) -> Response {
    match service.submit(form.into()).await {
        Ok(()) => Json(ApiSuccess::new(
            "Thank you! Your message has been sent successfully.",
        ))
        .into_response(),
        Err(ContactSubmitError::MissingFields(missing)) => (
            StatusCode::BAD_REQUEST,
            Json(ApiMissingFieldsError {
                success: false,
                error: "All fields are required",
                missing: ApiMissingFields(missing),
            }),
        )
            .into_response(),
        Err(ContactSubmitError::InvalidEmailFormat) => error(
            StatusCode::BAD_REQUEST,
            "Please provide a valid email address",
        ),
        Err(ContactSubmitError::FieldTooLong { field, max }) => error(
            StatusCode::BAD_REQUEST,
            format!("{field} must be at most {max} characters"),
        ),
        Err(ContactSubmitError::DeliveryAuth(_)) => error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Email authentication failed. Please check server configuration.",
        ),
        Err(ContactSubmitError::DeliveryEnvelope(_)) => error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Invalid email address. Please check your email and try again.",
        ),
        Err(ContactSubmitError::DeliveryUnknown(_)) => error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to send message. Please try again later.",
        ),
    }
}
