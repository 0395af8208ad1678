use std::future::Future;

use relay_models::email_address::EmailAddressWithName;
use thiserror::Error;

/// Delivers emails through some external provider.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait EmailService: Send + Sync + 'static {
    /// Send a single email. Never retried.
    fn send(&self, email: Email) -> impl Future<Output = Result<(), EmailDeliveryError>> + Send;

    /// Check that the provider is reachable and accepts the configured
    /// credentials.
    fn verify(&self) -> impl Future<Output = Result<(), EmailDeliveryError>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub recipient: EmailAddressWithName,
    pub reply_to: Option<EmailAddressWithName>,
    pub subject: String,
    pub body: EmailBody,
}

/// Plain text body with an optional html alternative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailBody {
    pub text: String,
    pub html: Option<String>,
}

#[derive(Debug, Error)]
pub enum EmailDeliveryError {
    /// The provider rejected the credentials.
    #[error("Authentication failed: {0}")]
    Auth(anyhow::Error),
    /// The provider rejected the sender or a recipient.
    #[error("Invalid envelope: {0}")]
    Envelope(anyhow::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EmailDeliveryError {
    /// Short, secret free name of the error class.
    pub fn class(&self) -> &'static str {
        match self {
            Self::Auth(_) => "auth",
            Self::Envelope(_) => "envelope",
            Self::Other(_) => "unknown",
        }
    }
}

#[cfg(feature = "mock")]
impl MockEmailService {
    pub fn with_send(mut self, email: Email) -> Self {
        self.expect_send()
            .once()
            .with(mockall::predicate::eq(email))
            .return_once(|_| Box::pin(std::future::ready(Ok(()))));
        self
    }

    pub fn with_send_error(mut self, email: Email, error: EmailDeliveryError) -> Self {
        self.expect_send()
            .once()
            .with(mockall::predicate::eq(email))
            .return_once(move |_| Box::pin(std::future::ready(Err(error))));
        self
    }

    pub fn with_verify(mut self, result: Result<(), EmailDeliveryError>) -> Self {
        self.expect_verify()
            .once()
            .return_once(move || Box::pin(std::future::ready(result)));
        self
    }
}
