use clap::Subcommand;
use relay_config::Config;
use relay_email_contracts::{Email, EmailBody, EmailService};
use relay_models::email_address::EmailAddressWithName;
use tracing::info;

use crate::email;

#[derive(Debug, Subcommand)]
pub enum EmailCommand {
    /// Check that the email provider accepts the configured credentials
    Verify,
    /// Test email deliverability
    Test { recipient: EmailAddressWithName },
}

impl EmailCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            EmailCommand::Verify => verify(config).await,
            EmailCommand::Test { recipient } => test(config, recipient).await,
        }
    }
}

async fn verify(config: Config) -> anyhow::Result<()> {
    let email_service = email::connect(&config.email, &config.contact.site_name)?;
    email_service.verify().await?;
    info!("Email transport is configured correctly");
    Ok(())
}

async fn test(config: Config, recipient: EmailAddressWithName) -> anyhow::Result<()> {
    let email_service = email::connect(&config.email, &config.contact.site_name)?;

    email_service
        .send(Email {
            recipient,
            reply_to: None,
            subject: "Email Deliverability Test".into(),
            body: EmailBody {
                text: "Email deliverability seems to be working!".into(),
                html: None,
            },
        })
        .await?;

    info!("Test email has been sent");
    Ok(())
}
