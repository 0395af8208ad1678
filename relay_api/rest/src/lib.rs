use std::{net::IpAddr, sync::Arc};

use anyhow::Context;
use axum::Router;
use relay_core_contact_contracts::ContactFeatureService;
use relay_core_health_contracts::HealthFeatureService;
use tokio::net::TcpListener;
use tracing::info;

mod errors;
mod extractors;
mod middlewares;
mod models;
mod routes;

#[derive(Debug, Clone)]
pub struct RestServer<Health, Contact> {
    health: Health,
    contact: Contact,
    config: RestServerConfig,
}

#[derive(Debug, Clone)]
pub struct RestServerConfig {
    /// Origins allowed to make cross origin requests, e.g.
    /// `https://www.example.com`.
    pub allowed_origins: Arc<[String]>,
}

impl<Health, Contact> RestServer<Health, Contact>
where
    Health: HealthFeatureService,
    Contact: ContactFeatureService,
{
    pub fn new(health: Health, contact: Contact, config: RestServerConfig) -> Self {
        Self {
            health,
            contact,
            config,
        }
    }

    pub async fn serve(self, host: IpAddr, port: u16) -> anyhow::Result<()> {
        let router = self.router();
        let listener = TcpListener::bind((host, port))
            .await
            .with_context(|| format!("Failed to bind to {host}:{port}"))?;
        info!("Listening on http://{}", listener.local_addr()?);
        axum::serve(listener, router)
            .await
            .context("Failed to start HTTP server")
    }

    pub fn router(self) -> Router<()> {
        let router = Router::new()
            .merge(routes::index::router())
            .merge(routes::health::router(self.health.into()))
            .merge(routes::contact::router(self.contact.into()))
            .fallback(routes::not_found);

        let router = middlewares::panic_handler::add(router);
        let router = middlewares::trace::add(router);
        let router = middlewares::request_id::add(router);
        middlewares::cors::add(&self.config.allowed_origins)(router)
    }
}
