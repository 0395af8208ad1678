use std::future::Future;

use relay_email_contracts::EmailDeliveryError;
use relay_models::contact::{ContactForm, MissingFields, SubmissionField};
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactFeatureService: Send + Sync + 'static {
    /// Validate a contact form and relay it to the configured inbox.
    ///
    /// Exactly one email is sent per successful call. Invalid forms are
    /// rejected before any email is built.
    fn submit(&self, form: ContactForm) -> impl Future<Output = Result<(), ContactSubmitError>> + Send;
}

#[derive(Debug, Error)]
pub enum ContactSubmitError {
    #[error("Missing required fields: {0}")]
    MissingFields(MissingFields),
    #[error("Invalid email address format.")]
    InvalidEmailFormat,
    #[error("The field {field} is longer than {max} characters.")]
    FieldTooLong { field: SubmissionField, max: usize },
    #[error("The email provider rejected the credentials.")]
    DeliveryAuth(#[source] anyhow::Error),
    #[error("The email provider rejected the envelope.")]
    DeliveryEnvelope(#[source] anyhow::Error),
    #[error("Failed to deliver the email: {0}")]
    DeliveryUnknown(#[source] anyhow::Error),
}

impl From<EmailDeliveryError> for ContactSubmitError {
    fn from(value: EmailDeliveryError) -> Self {
        match value {
            EmailDeliveryError::Auth(err) => Self::DeliveryAuth(err),
            EmailDeliveryError::Envelope(err) => Self::DeliveryEnvelope(err),
            EmailDeliveryError::Other(err) => Self::DeliveryUnknown(err),
        }
    }
}

#[cfg(feature = "mock")]
impl MockContactFeatureService {
    pub fn with_submit(mut self, form: ContactForm, result: Result<(), ContactSubmitError>) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(form))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}
