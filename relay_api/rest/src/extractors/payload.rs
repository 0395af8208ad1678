use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::errors::error;

/// Request body sent either as json or as an url encoded form.
pub struct Payload<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = Response;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = request
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"));

        let result = if is_form {
            Form::<T>::from_request(request, state)
                .await
                .map(|Form(value)| value)
                .map_err(IntoResponse::into_response)
        } else {
            Json::<T>::from_request(request, state)
                .await
                .map(|Json(value)| value)
                .map_err(IntoResponse::into_response)
        };

        result.map(Self).map_err(|rejection| {
            debug!(status = %rejection.status(), "rejected request body");
            error(StatusCode::BAD_REQUEST, "Invalid request body")
        })
    }
}
