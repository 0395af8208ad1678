use relay_config::Config;
use tracing::{info, warn};

use crate::email;

/// Fails if the email transport cannot be created from `config`.
pub fn check_config(config: Config, verbose: bool) -> anyhow::Result<()> {
    email::connect(&config.email, &config.contact.site_name)?;

    if verbose {
        println!("{config:#?}");
    }

    if !config.email.credentials_configured() {
        warn!("Email credentials are not configured");
    }

    info!("Config is valid");

    Ok(())
}
