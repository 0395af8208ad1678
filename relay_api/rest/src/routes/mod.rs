use axum::{
    extract::OriginalUri,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

pub mod contact;
pub mod health;
pub mod index;

pub const AVAILABLE_ENDPOINTS: &[&str] = &[
    "GET /",
    "GET /api/health",
    "POST /api/contact",
    "GET /api/test-email",
];

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NotFoundResponse {
    success: bool,
    error: String,
    message: &'static str,
    available_endpoints: &'static [&'static str],
}

pub async fn not_found(method: Method, OriginalUri(uri): OriginalUri) -> Response {
    let response = NotFoundResponse {
        success: false,
        error: format!("Cannot {method} {uri}"),
        message: "Endpoint not found",
        available_endpoints: AVAILABLE_ENDPOINTS,
    };
    (StatusCode::NOT_FOUND, Json(response)).into_response()
}
