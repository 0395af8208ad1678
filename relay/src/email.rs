use anyhow::Context;
use relay_config::{EmailConfig, EmailTransport};
use relay_email_impl::{api::ApiEmailServiceImpl, smtp::SmtpEmailServiceImpl, EmailServiceImpl};

/// Create the email transport selected by `config.transport`. No connection
/// is opened yet.
pub fn connect(config: &EmailConfig, site_name: &str) -> anyhow::Result<EmailServiceImpl> {
    let from = config.sender(site_name)?;

    match config.transport {
        EmailTransport::Smtp => SmtpEmailServiceImpl::new(
            &config.smtp.url,
            config.smtp.credentials(),
            *config.timeout,
            from,
        )
        .map(Into::into)
        .context("Failed to create smtp transport"),
        EmailTransport::Api => ApiEmailServiceImpl::new(
            config.api.endpoint.clone(),
            config.api.key().map(Into::into),
            *config.timeout,
            from,
        )
        .map(Into::into)
        .context("Failed to create email api client"),
    }
}
