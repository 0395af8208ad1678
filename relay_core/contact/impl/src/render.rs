use relay_models::contact::Submission;

struct Layout<'a> {
    heading: &'static str,
    fields: Vec<(&'static str, &'a str)>,
    message: Option<&'a str>,
}

impl<'a> Layout<'a> {
    fn of(submission: &'a Submission) -> Self {
        let author = submission.author();
        let mut fields = vec![("Name", author.name.as_str()), ("Email", author.email.as_str())];

        let heading = match submission {
            Submission::Basic(_) => "New Contact Form Submission",
            Submission::Extended(submission) => {
                fields.extend([
                    ("Phone", submission.phone.as_str()),
                    ("Location", submission.location.as_str()),
                    ("Service", submission.service.as_str()),
                ]);
                "New Service Request"
            }
        };

        Self {
            heading,
            fields,
            message: submission.message().map(|message| message.as_str()),
        }
    }
}

pub(crate) fn subject(submission: &Submission) -> String {
    let name = single_line(&submission.author().name);
    match submission {
        Submission::Basic(_) => format!("New Contact Form Message from {name}"),
        Submission::Extended(submission) => {
            format!("New {} Request from {name}", single_line(&submission.service))
        }
    }
}

pub(crate) fn text(submission: &Submission, site_name: &str) -> String {
    let layout = Layout::of(submission);

    let mut out = format!("{}\n\n", layout.heading);
    for (label, value) in &layout.fields {
        out.push_str(&format!("{label}: {value}\n"));
    }
    if let Some(message) = layout.message {
        out.push_str(&format!("Message:\n{message}\n"));
    }
    out.push_str(&format!(
        "\nThis message was sent from the {site_name} website contact form.\n"
    ));
    out
}

pub(crate) fn html(submission: &Submission, site_name: &str) -> String {
    let layout = Layout::of(submission);

    let mut out = format!("<h2>{}</h2>\n", layout.heading);
    for (label, value) in &layout.fields {
        out.push_str(&format!(
            "<p><strong>{label}:</strong> {}</p>\n",
            escape_html(value)
        ));
    }
    if let Some(message) = layout.message {
        out.push_str(&format!(
            "<p><strong>Message:</strong></p>\n<p>{}</p>\n",
            escape_html(message).replace("\r\n", "<br>").replace('\n', "<br>")
        ));
    }
    out.push_str(&format!(
        "<hr>\n<p>This message was sent from the {} website contact form.</p>\n",
        escape_html(site_name)
    ));
    out
}

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Collapse all whitespace runs, so user input cannot break header lines.
fn single_line(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}
