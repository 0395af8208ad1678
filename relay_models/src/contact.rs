use std::sync::LazyLock;

use nutype::nutype;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::email_address::EmailAddress;

/// Submitter addresses must look like `local@domain.tld` before they are
/// parsed as a mailbox.
pub static SUBMITTER_EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// A contact form as received from a client. Nothing has been validated yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub service: Option<String>,
}

impl ContactForm {
    /// Returns the raw value of `field`, treating blank values as absent.
    pub fn get(&self, field: SubmissionField) -> Option<&str> {
        match field {
            SubmissionField::Name => self.name.as_deref(),
            SubmissionField::Email => self.email.as_deref(),
            SubmissionField::Message => self.message.as_deref(),
            SubmissionField::Phone => self.phone.as_deref(),
            SubmissionField::Location => self.location.as_deref(),
            SubmissionField::Service => self.service.as_deref(),
        }
        .map(str::trim)
        .filter(|value| !value.is_empty())
    }
}

/// The set of fields a deployment collects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionSchema {
    /// `name`, `email` and `message`, all required.
    #[default]
    Basic,
    /// `name`, `email`, `phone`, `location` and `service` are required,
    /// `message` is optional.
    Extended,
}

impl SubmissionSchema {
    pub fn required_fields(self) -> &'static [SubmissionField] {
        match self {
            Self::Basic => &[
                SubmissionField::Name,
                SubmissionField::Email,
                SubmissionField::Message,
            ],
            Self::Extended => &[
                SubmissionField::Name,
                SubmissionField::Email,
                SubmissionField::Phone,
                SubmissionField::Location,
                SubmissionField::Service,
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionField {
    Name,
    Email,
    Message,
    Phone,
    Location,
    Service,
}

impl SubmissionField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
            Self::Phone => "phone",
            Self::Location => "location",
            Self::Service => "service",
        }
    }

    /// Maximum number of characters accepted for this field. Must agree with
    /// the `len_char_max` of the corresponding newtype.
    pub fn max_len(self) -> usize {
        match self {
            Self::Name | Self::Location | Self::Service => 256,
            Self::Email => 320,
            Self::Message => 10000,
            Self::Phone => 64,
        }
    }
}

impl std::fmt::Display for SubmissionField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The required fields of a schema that were absent from a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingFields {
    pub schema: SubmissionSchema,
    pub fields: Vec<SubmissionField>,
}

impl MissingFields {
    pub fn is_missing(&self, field: SubmissionField) -> bool {
        self.fields.contains(&field)
    }
}

impl std::fmt::Display for MissingFields {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            field.fmt(f)?;
        }
        Ok(())
    }
}

/// A fully validated submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Basic(BasicSubmission),
    Extended(ExtendedSubmission),
}

impl Submission {
    pub fn author(&self) -> &ContactAuthor {
        match self {
            Self::Basic(submission) => &submission.author,
            Self::Extended(submission) => &submission.author,
        }
    }

    pub fn message(&self) -> Option<&SubmissionMessage> {
        match self {
            Self::Basic(submission) => Some(&submission.message),
            Self::Extended(submission) => submission.message.as_ref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactAuthor {
    pub name: SubmitterName,
    pub email: EmailAddress,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicSubmission {
    pub author: ContactAuthor,
    pub message: SubmissionMessage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtendedSubmission {
    pub author: ContactAuthor,
    pub phone: SubmitterPhone,
    pub location: SubmitterLocation,
    pub service: RequestedService,
    pub message: Option<SubmissionMessage>,
}

#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 256),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Display, Serialize, Deserialize)
)]
pub struct SubmitterName(String);

#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 10000),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Display, Serialize, Deserialize)
)]
pub struct SubmissionMessage(String);

#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 64),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Display, Serialize, Deserialize)
)]
pub struct SubmitterPhone(String);

#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 256),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Display, Serialize, Deserialize)
)]
pub struct SubmitterLocation(String);

#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 256),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Display, Serialize, Deserialize)
)]
pub struct RequestedService(String);
