use api::ApiEmailServiceImpl;
use relay_email_contracts::{Email, EmailDeliveryError, EmailService};
use smtp::SmtpEmailServiceImpl;

pub mod api;
mod http;
pub mod smtp;

/// The transport selected at startup.
#[derive(Debug, Clone)]
pub enum EmailServiceImpl {
    Smtp(SmtpEmailServiceImpl),
    Api(ApiEmailServiceImpl),
}

impl EmailService for EmailServiceImpl {
    async fn send(&self, email: Email) -> Result<(), EmailDeliveryError> {
        match self {
            Self::Smtp(smtp) => smtp.send(email).await,
            Self::Api(api) => api.send(email).await,
        }
    }

    async fn verify(&self) -> Result<(), EmailDeliveryError> {
        match self {
            Self::Smtp(smtp) => smtp.verify().await,
            Self::Api(api) => api.verify().await,
        }
    }
}

impl From<SmtpEmailServiceImpl> for EmailServiceImpl {
    fn from(value: SmtpEmailServiceImpl) -> Self {
        Self::Smtp(value)
    }
}

impl From<ApiEmailServiceImpl> for EmailServiceImpl {
    fn from(value: ApiEmailServiceImpl) -> Self {
        Self::Api(value)
    }
}
