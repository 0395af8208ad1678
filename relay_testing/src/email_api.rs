//! A fake of a Resend style transactional email api.
//!
//! Requests must carry `Authorization: Bearer <key>`. Recipients in the
//! reserved `.invalid` top level domain are rejected with `422`, everything
//! else is accepted and kept in memory.

use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    sync::{Arc, Mutex},
};

use anyhow::Context;
use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::net::TcpListener;
use tracing::info;
use url::Url;
use uuid::Uuid;

pub async fn start_server(host: IpAddr, port: u16, key: String) -> anyhow::Result<()> {
    info!("Starting email api testing server on {host}:{port}");
    info!("Email api endpoint: http://{host}:{port}/");
    info!("Key: {key:?}");
    info!("Recipients in the .invalid top level domain are rejected");

    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind to {host}:{port}"))?;
    axum::serve(listener, router(ApiState::new(key)))
        .await
        .context("Failed to start HTTP server")
}

/// A running instance of the fake api on a random local port.
#[derive(Debug, Clone)]
pub struct FakeEmailApi {
    pub endpoint: Url,
    state: Arc<ApiState>,
}

impl FakeEmailApi {
    pub async fn spawn(key: &str) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(SocketAddr::from((Ipv4Addr::LOCALHOST, 0)))
            .await
            .context("Failed to bind to a local port")?;
        let addr = listener.local_addr()?;

        let state = ApiState::new(key.into());
        let router = router(Arc::clone(&state));
        tokio::spawn(async move { axum::serve(listener, router).await });

        Ok(Self {
            endpoint: format!("http://{addr}/").parse()?,
            state,
        })
    }

    /// All emails accepted so far, oldest first.
    pub fn received(&self) -> Vec<ReceivedEmail> {
        self.state.received.lock().unwrap().clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceivedEmail {
    pub from: String,
    pub to: Vec<String>,
    #[serde(default)]
    pub reply_to: Vec<String>,
    pub subject: String,
    pub text: String,
    pub html: Option<String>,
}

#[derive(Debug)]
struct ApiState {
    key: String,
    received: Mutex<Vec<ReceivedEmail>>,
}

impl ApiState {
    fn new(key: String) -> Arc<Self> {
        Arc::new(Self {
            key,
            received: Default::default(),
        })
    }

    fn authorize(&self, headers: &HeaderMap) -> Result<(), Response> {
        let token = headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));

        if token == Some(self.key.as_str()) {
            Ok(())
        } else {
            Err(error(StatusCode::UNAUTHORIZED, "API key is invalid"))
        }
    }
}

fn router(state: Arc<ApiState>) -> Router<()> {
    Router::new()
        .route("/emails", routing::post(send).get(list))
        .route("/domains", routing::get(domains))
        .with_state(state)
}

async fn send(
    state: State<Arc<ApiState>>,
    headers: HeaderMap,
    Json(email): Json<ReceivedEmail>,
) -> Response {
    if let Err(response) = state.authorize(&headers) {
        return response;
    }

    if email.to.is_empty() || email.to.iter().any(|to| to.contains(".invalid")) {
        return error(StatusCode::UNPROCESSABLE_ENTITY, "Invalid `to` field.");
    }

    state.received.lock().unwrap().push(email);

    Json(json!({ "id": Uuid::now_v7() })).into_response()
}

async fn list(state: State<Arc<ApiState>>) -> Json<Vec<ReceivedEmail>> {
    Json(state.received.lock().unwrap().clone())
}

async fn domains(state: State<Arc<ApiState>>, headers: HeaderMap) -> Response {
    if let Err(response) = state.authorize(&headers) {
        return response;
    }

    Json(json!({ "data": [] })).into_response()
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}
