use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::warn;

pub fn add<S: Clone + Send + Sync + 'static>(
    allowed_origins: &[String],
) -> impl FnOnce(Router<S>) -> Router<S> {
    let origins = allowed_origins
        .iter()
        .filter_map(|origin| {
            if origin == "*" {
                warn!("wildcard cors origins cannot be combined with credentials, ignoring");
                return None;
            }
            origin
                .parse::<HeaderValue>()
                .inspect_err(|err| warn!(%origin, "ignoring invalid cors origin: {err}"))
                .ok()
        })
        .collect::<Vec<_>>();

    let layer = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true);

    move |router| router.layer(layer)
}
