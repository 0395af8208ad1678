use relay_config::Config;
use relay_shared_contracts::time::TimeService;
use relay_shared_impl::time::TimeServiceImpl;
use tracing::{info, warn};

use crate::{
    email,
    environment::{ConfigProvider, Provider},
};

pub async fn serve(config: Config) -> anyhow::Result<()> {
    let started_at = TimeServiceImpl.now();

    info!(transport = ?config.email.transport, "Creating email transport");
    let email = email::connect(&config.email, &config.contact.site_name)?;
    if !config.email.credentials_configured() {
        warn!("Email credentials are not configured, contact form submissions will fail");
    }

    info!(
        recipient = %config.contact.recipient,
        schema = ?config.contact.schema,
        "Relaying contact form submissions"
    );

    let config_provider = ConfigProvider::new(&config, started_at);
    let provider = Provider::new(config_provider, email);
    let server = provider.rest_server();
    info!(
        "Starting http server on {}:{}",
        config.http.host, config.http.port
    );
    server.serve(config.http.host, config.http.port).await
}
