use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::ApiError;

pub fn internal_server_error(err: impl Into<anyhow::Error>) -> Response {
    let err = err.into();
    tracing::error!("internal server error: {err}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiError {
            message: Some("Something went wrong on our end. Please try again later."),
            ..ApiError::new("Internal server error")
        }),
    )
        .into_response()
}

pub fn error(code: StatusCode, error: impl Into<String>) -> Response {
    (code, Json(ApiError::new(error))).into_response()
}
