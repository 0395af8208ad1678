use std::time::Duration;

use anyhow::anyhow;
use lettre::{
    message::{header, MessageBuilder, MultiPart},
    transport::smtp::{self, authentication::Credentials},
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use relay_email_contracts::{Email, EmailDeliveryError};
use relay_models::email_address::EmailAddressWithName;
use relay_utils::Apply;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct SmtpEmailServiceImpl {
    from: EmailAddressWithName,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpEmailServiceImpl {
    /// Create a transport for an url like `smtps://smtp.example.com:465`.
    /// No connection is opened until the first email is sent.
    pub fn new(
        url: &str,
        credentials: Option<(&str, &str)>,
        timeout: Duration,
        from: EmailAddressWithName,
    ) -> anyhow::Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::from_url(url)?
            .timeout(Some(timeout))
            .apply_map(credentials, |builder, (username, password)| {
                builder.credentials(Credentials::new(username.into(), password.into()))
            })
            .build();

        Ok(Self { from, transport })
    }

    pub(crate) async fn send(&self, email: Email) -> Result<(), EmailDeliveryError> {
        let message = build_message(&self.from, email).map_err(EmailDeliveryError::Envelope)?;

        debug!("sending email via smtp");
        let response = self.transport.send(message).await.map_err(classify)?;
        if !response.is_positive() {
            return Err(EmailDeliveryError::Other(anyhow!(
                "smtp server replied with {}",
                response.code()
            )));
        }

        Ok(())
    }

    pub(crate) async fn verify(&self) -> Result<(), EmailDeliveryError> {
        self.transport
            .test_connection()
            .await
            .map_err(classify)?
            .then_some(())
            .ok_or_else(|| anyhow!("Failed to connect to smtp server").into())
    }
}

fn build_message(from: &EmailAddressWithName, email: Email) -> anyhow::Result<Message> {
    let builder = Message::builder()
        .from(from.0.clone())
        .to(email.recipient.0)
        .apply_map(email.reply_to.map(|x| x.0), MessageBuilder::reply_to)
        .subject(email.subject);

    let message = match email.body.html {
        Some(html) => builder.multipart(MultiPart::alternative_plain_html(email.body.text, html))?,
        None => builder
            .header(header::ContentType::TEXT_PLAIN)
            .body(email.body.text)?,
    };

    Ok(message)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ErrorClass {
    Auth,
    Envelope,
    Other,
}

fn classify(err: smtp::Error) -> EmailDeliveryError {
    let code = err
        .status()
        .and_then(|code| code.to_string().parse::<u16>().ok());
    let class = error_class(code, err.is_client(), &err.to_string());
    let err = anyhow::Error::new(err);
    match class {
        ErrorClass::Auth => EmailDeliveryError::Auth(err),
        ErrorClass::Envelope => EmailDeliveryError::Envelope(err),
        ErrorClass::Other => EmailDeliveryError::Other(err),
    }
}

fn error_class(code: Option<u16>, client_error: bool, message: &str) -> ErrorClass {
    match code {
        // authentication required, too weak, rejected or needs encryption
        Some(454 | 530 | 534 | 535 | 538) => ErrorClass::Auth,
        // bad parameters, mailbox unavailable, mailbox name not allowed
        Some(501 | 550 | 553 | 555) => ErrorClass::Envelope,
        Some(_) => ErrorClass::Other,
        None if client_error && message.to_lowercase().contains("authentication") => {
            ErrorClass::Auth
        }
        None => ErrorClass::Other,
    }
}
