use std::sync::Arc;

use relay_core_contact_contracts::{ContactFeatureService, ContactSubmitError};
use relay_email_contracts::{Email, EmailBody, EmailService};
use relay_models::{
    contact::{ContactForm, Submission, SubmissionSchema},
    email_address::EmailAddressWithName,
};
use tracing::{debug, error, info};

mod render;
mod validate;

#[derive(Debug, Clone)]
pub struct ContactFeatureServiceImpl<Email> {
    email: Email,
    config: ContactFeatureConfig,
}

#[derive(Debug, Clone)]
pub struct ContactFeatureConfig {
    pub recipient: Arc<EmailAddressWithName>,
    pub site_name: Arc<str>,
    pub schema: SubmissionSchema,
    /// Attach an html alternative to the plain text body.
    pub html: bool,
}

impl<Email> ContactFeatureServiceImpl<Email> {
    pub fn new(email: Email, config: ContactFeatureConfig) -> Self {
        Self { email, config }
    }
}

impl<EmailS> ContactFeatureService for ContactFeatureServiceImpl<EmailS>
where
    EmailS: EmailService,
{
    #[tracing::instrument(skip_all)]
    async fn submit(&self, form: ContactForm) -> Result<(), ContactSubmitError> {
        let submission = validate::validate(&form, self.config.schema)
            .inspect_err(|err| debug!(email = ?form.email, "rejected contact form: {err}"))?;

        let author = submission.author();
        let result = self.email.send(self.build_email(&submission)).await;

        match &result {
            Ok(()) => info!(
                name = %author.name,
                email = %author.email,
                "relayed contact form submission"
            ),
            Err(err) => error!(
                name = %author.name,
                email = %author.email,
                class = err.class(),
                "failed to relay contact form submission: {err}"
            ),
        }

        result.map_err(Into::into)
    }
}

impl<EmailS> ContactFeatureServiceImpl<EmailS> {
    fn build_email(&self, submission: &Submission) -> Email {
        let author = submission.author();
        Email {
            recipient: (*self.config.recipient).clone(),
            reply_to: Some(author.email.clone().with_name(author.name.to_string())),
            subject: render::subject(submission),
            body: EmailBody {
                text: render::text(submission, &self.config.site_name),
                html: self
                    .config
                    .html
                    .then(|| render::html(submission, &self.config.site_name)),
            },
        }
    }
}
