use axum::{routing, Json, Router};
use relay_utils::relay_version;
use serde::Serialize;

pub fn router() -> Router<()> {
    Router::new().route("/", routing::get(index).fallback(super::not_found))
}

#[derive(Serialize)]
struct IndexResponse {
    message: &'static str,
    version: &'static str,
    endpoints: Endpoints,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Endpoints {
    health: &'static str,
    contact: &'static str,
    test_email: &'static str,
}

async fn index() -> Json<IndexResponse> {
    Json(IndexResponse {
        message: "Contact relay is running!",
        version: relay_version(),
        endpoints: Endpoints {
            health: "GET /api/health",
            contact: "POST /api/contact",
            test_email: "GET /api/test-email",
        },
    })
}
