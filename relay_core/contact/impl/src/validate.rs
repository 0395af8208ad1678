use relay_core_contact_contracts::ContactSubmitError;
use relay_models::{
    contact::{
        BasicSubmission, ContactAuthor, ContactForm, ExtendedSubmission, MissingFields,
        Submission, SubmissionField, SubmissionSchema, SUBMITTER_EMAIL_REGEX,
    },
    email_address::EmailAddress,
};

/// Turn a raw form into a submission of the given schema.
///
/// Checks run in order: presence of all required fields, then the email
/// format, then field lengths. The first failing check wins.
pub(crate) fn validate(
    form: &ContactForm,
    schema: SubmissionSchema,
) -> Result<Submission, ContactSubmitError> {
    let missing = schema
        .required_fields()
        .iter()
        .copied()
        .filter(|&field| form.get(field).is_none())
        .collect::<Vec<_>>();
    if !missing.is_empty() {
        return Err(ContactSubmitError::MissingFields(MissingFields {
            schema,
            fields: missing,
        }));
    }

    let required = |field| {
        form.get(field).ok_or_else(|| {
            ContactSubmitError::MissingFields(MissingFields {
                schema,
                fields: vec![field],
            })
        })
    };

    let email = parse_email(required(SubmissionField::Email)?)
        .ok_or(ContactSubmitError::InvalidEmailFormat)?;

    let author = ContactAuthor {
        name: parse(SubmissionField::Name, required(SubmissionField::Name)?)?,
        email,
    };

    Ok(match schema {
        SubmissionSchema::Basic => Submission::Basic(BasicSubmission {
            author,
            message: parse(SubmissionField::Message, required(SubmissionField::Message)?)?,
        }),
        SubmissionSchema::Extended => Submission::Extended(ExtendedSubmission {
            author,
            phone: parse(SubmissionField::Phone, required(SubmissionField::Phone)?)?,
            location: parse(SubmissionField::Location, required(SubmissionField::Location)?)?,
            service: parse(SubmissionField::Service, required(SubmissionField::Service)?)?,
            message: form
                .get(SubmissionField::Message)
                .map(|message| parse(SubmissionField::Message, message))
                .transpose()?,
        }),
    })
}

fn parse_email(value: &str) -> Option<EmailAddress> {
    (SUBMITTER_EMAIL_REGEX.is_match(value)
        && value.chars().count() <= SubmissionField::Email.max_len())
    .then(|| value.parse().ok())
    .flatten()
}

fn parse<T>(field: SubmissionField, value: &str) -> Result<T, ContactSubmitError>
where
    T: for<'a> TryFrom<&'a str>,
{
    T::try_from(value).map_err(|_| ContactSubmitError::FieldTooLong {
        field,
        max: field.max_len(),
    })
}

#[cfg(test)]
mod tests {
    use relay_utils::assert_matches;

    use super::*;

    fn basic_form() -> ContactForm {
        ContactForm {
            name: Some("Jane Doe".into()),
            email: Some("jane@example.com".into()),
            message: Some("Hello".into()),
            ..Default::default()
        }
    }

    fn extended_form() -> ContactForm {
        ContactForm {
            name: Some("Jane Doe".into()),
            email: Some("jane@example.com".into()),
            phone: Some("+1 555 0100".into()),
            location: Some("Starkville, MS".into()),
            service: Some("Web Development".into()),
            ..Default::default()
        }
    }

    #[test]
    fn basic_ok() {
        let submission = validate(&basic_form(), SubmissionSchema::Basic).unwrap();
        assert_matches!(&submission, Submission::Basic(_));
        assert_eq!(*submission.author().name, "Jane Doe");
        assert_eq!(submission.author().email.as_str(), "jane@example.com");
        assert_eq!(submission.message().map(|m| m.as_str()), Some("Hello"));
    }

    #[test]
    fn basic_ignores_extended_fields() {
        let form = ContactForm {
            phone: Some("123".into()),
            ..basic_form()
        };
        assert_matches!(
            validate(&form, SubmissionSchema::Basic),
            Ok(Submission::Basic(_))
        );
    }

    #[test]
    fn missing_fields_are_all_reported() {
        let form = ContactForm {
            name: None,
            message: Some("   ".into()),
            ..basic_form()
        };

        let result = validate(&form, SubmissionSchema::Basic);

        assert_matches!(
            result,
            Err(ContactSubmitError::MissingFields(MissingFields { schema: SubmissionSchema::Basic, fields }))
                if *fields == [SubmissionField::Name, SubmissionField::Message]
        );
    }

    #[test]
    fn missing_fields_precede_invalid_email() {
        let form = ContactForm {
            email: Some("not-an-email".into()),
            message: None,
            ..basic_form()
        };
        assert_matches!(
            validate(&form, SubmissionSchema::Basic),
            Err(ContactSubmitError::MissingFields(_))
        );
    }

    #[test]
    fn invalid_email() {
        for email in ["not-an-email", "jane@example", "jane doe@example.com", "a@b@c.de"] {
            let form = ContactForm {
                email: Some(email.into()),
                ..basic_form()
            };
            assert_matches!(
                validate(&form, SubmissionSchema::Basic),
                Err(ContactSubmitError::InvalidEmailFormat)
            );
        }
    }

    #[test]
    fn field_too_long() {
        let form = ContactForm {
            name: Some("x".repeat(257)),
            ..basic_form()
        };
        assert_matches!(
            validate(&form, SubmissionSchema::Basic),
            Err(ContactSubmitError::FieldTooLong {
                field: SubmissionField::Name,
                max: 256
            })
        );
    }

    #[test]
    fn extended_ok_without_message() {
        let submission = validate(&extended_form(), SubmissionSchema::Extended).unwrap();
        let Submission::Extended(submission) = submission else {
            panic!("expected extended submission");
        };
        assert_eq!(*submission.service, "Web Development");
        assert_eq!(*submission.location, "Starkville, MS");
        assert_eq!(submission.message, None);
    }

    #[test]
    fn extended_with_message() {
        let form = ContactForm {
            message: Some("Call me".into()),
            ..extended_form()
        };
        let submission = validate(&form, SubmissionSchema::Extended).unwrap();
        assert_eq!(submission.message().map(|m| m.as_str()), Some("Call me"));
    }

    #[test]
    fn extended_missing_fields() {
        let form = ContactForm {
            phone: None,
            service: None,
            ..extended_form()
        };
        assert_matches!(
            validate(&form, SubmissionSchema::Extended),
            Err(ContactSubmitError::MissingFields(MissingFields { fields, .. }))
                if *fields == [SubmissionField::Phone, SubmissionField::Service]
        );
    }
}
