use chrono::{DateTime, Utc};

use super::super::helpers::prepare_html_template;
use crate::domain::ContactSubmission;

const SUBJECT_PREFIX: &str = "Seaside Partners –";

pub fn operator_subject() -> String {
    format!("{SUBJECT_PREFIX} New contact form submission")
}

pub fn confirmation_subject() -> String {
    format!("{SUBJECT_PREFIX} We received your message")
}

pub fn operator_email_text(submission: &ContactSubmission, received_at: &DateTime<Utc>) -> String {
    format!(
        "New contact submission\n\n\
         Name: {}\n\
         Email: {}\n\
         Phone: {}\n\n\
         Message:\n{}\n\n\
         Received: {}",
        submission.name,
        submission.email.as_ref(),
        submission.phone,
        submission.message,
        received_at.to_rfc3339(),
    )
}

pub fn operator_email_html(
    submission: &ContactSubmission,
    received_at: &DateTime<Utc>,
) -> Result<String, anyhow::Error> {
    let received = received_at.to_rfc3339();
    prepare_html_template(
        &[
            ("name", submission.name.as_str()),
            ("email", submission.email.as_ref()),
            ("phone", submission.phone.as_str()),
            ("message", submission.message.as_str()),
            ("received", received.as_str()),
        ],
        "operator_notification.html",
    )
}

pub fn confirmation_email_text(submission: &ContactSubmission) -> String {
    format!(
        "Thanks {},\n\n\
         We received your message and will get back to you soon.\n\n\
         Your message:\n{}",
        submission.name, submission.message,
    )
}

pub fn confirmation_email_html(submission: &ContactSubmission) -> Result<String, anyhow::Error> {
    prepare_html_template(
        &[
            ("name", submission.name.as_str()),
            ("message", submission.message.as_str()),
        ],
        "submitter_confirmation.html",
    )
}
