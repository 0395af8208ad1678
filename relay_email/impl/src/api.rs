use std::time::Duration;

use anyhow::{anyhow, Context};
use relay_email_contracts::{Email, EmailDeliveryError};
use relay_models::{email_address::EmailAddressWithName, Sensitive};
use relay_utils::Apply;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::http::HttpClient;

/// Sends emails through a transactional email api (Resend compatible).
#[derive(Debug, Clone)]
pub struct ApiEmailServiceImpl {
    from: EmailAddressWithName,
    endpoint: Url,
    key: Option<Sensitive<String>>,
    client: HttpClient,
}

impl ApiEmailServiceImpl {
    pub fn new(
        mut endpoint: Url,
        key: Option<String>,
        timeout: Duration,
        from: EmailAddressWithName,
    ) -> anyhow::Result<Self> {
        if !endpoint.path().ends_with('/') {
            let path = format!("{}/", endpoint.path());
            endpoint.set_path(&path);
        }

        let client = HttpClient::new(timeout).context("Failed to create http client")?;

        Ok(Self {
            from,
            endpoint,
            key: key.map(Into::into),
            client,
        })
    }

    pub(crate) async fn send(&self, email: Email) -> Result<(), EmailDeliveryError> {
        let request = SendEmailRequest {
            from: self.from.to_string(),
            to: vec![email.recipient.to_string()],
            reply_to: email.reply_to.iter().map(ToString::to_string).collect(),
            subject: email.subject,
            text: email.body.text,
            html: email.body.html,
        };

        debug!("sending email via api");
        let response = self
            .authorized(self.client.post(self.url("emails")?))
            .json(&request)
            .send()
            .await
            .context("Failed to reach email api")?;

        check_response(response).await
    }

    pub(crate) async fn verify(&self) -> Result<(), EmailDeliveryError> {
        let response = self
            .authorized(self.client.get(self.url("domains")?))
            .send()
            .await
            .context("Failed to reach email api")?;

        check_response(response).await
    }

    fn url(&self, path: &str) -> Result<Url, EmailDeliveryError> {
        self.endpoint
            .join(path)
            .with_context(|| format!("Failed to build email api url for {path:?}"))
            .map_err(Into::into)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.apply_map(self.key.as_deref(), |request, key| request.bearer_auth(key))
    }
}

async fn check_response(response: Response) -> Result<(), EmailDeliveryError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }

    let message = response
        .json::<ErrorResponse>()
        .await
        .ok()
        .and_then(|body| body.message)
        .unwrap_or_else(|| status.to_string());
    let err = anyhow!("Email api responded with {status}: {message}");

    Err(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => EmailDeliveryError::Auth(err),
        StatusCode::UNPROCESSABLE_ENTITY => EmailDeliveryError::Envelope(err),
        _ => EmailDeliveryError::Other(err),
    })
}

#[derive(Serialize)]
struct SendEmailRequest {
    from: String,
    to: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    reply_to: Vec<String>,
    subject: String,
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    message: Option<String>,
}
