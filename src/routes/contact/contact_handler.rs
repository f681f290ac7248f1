use actix_web::{HttpResponse, web};
use chrono::Utc;
use lettre::message::Mailbox;

use super::errors::ContactError;
use super::helpers::{
    confirmation_email_html, confirmation_email_text, confirmation_subject, operator_email_html,
    operator_email_text, operator_subject,
};
use super::types::{FormData, SubmissionAccepted};
use crate::configuration::MailSettings;
use crate::domain::ContactSubmission;
use crate::email_client::{EmailClient, MailerError};

#[tracing::instrument(
    name = "Handling a contact form submission.",
    skip(body, mail_settings),
    fields(submitter_email = tracing::field::Empty)
)]
pub async fn submit_contact(
    body: web::Bytes,
    mail_settings: web::Data<MailSettings>,
) -> Result<HttpResponse, ContactError> {
    let form: FormData = serde_json::from_slice(&body).map_err(ContactError::MalformedInput)?;

    let submission: ContactSubmission = form.try_into().map_err(ContactError::ValidationFailed)?;
    tracing::Span::current().record(
        "submitter_email",
        tracing::field::display(submission.email.as_ref()),
    );

    let email_client = mail_settings.client().map_err(|e| {
        tracing::error!(error.cause_chain = ?e, "Could not build the mail transport");
        ContactError::ServerMisconfigured(e)
    })?;
    let operator: Mailbox = mail_settings
        .operator()
        .map_err(|e| ContactError::ServerMisconfigured(MailerError::InvalidAddress(e)))?;

    notify_operator(&email_client, operator.clone(), &submission).await?;

    if mail_settings.send_client_copy && !submission.email.as_ref().is_empty() {
        // Detached on purpose: the submission is already accepted, so the
        // confirmation copy is only ever observed by the log.
        tokio::spawn(async move {
            if let Err(e) = send_confirmation(&email_client, operator, &submission).await {
                tracing::warn!(
                    error.cause_chain = ?e,
                    "Failed to send the confirmation copy to the submitter"
                );
            }
        });
    }

    Ok(HttpResponse::Ok().json(SubmissionAccepted {
        message: "Message sent. We will contact you shortly.".to_owned(),
    }))
}

pub async fn contact_method_not_allowed() -> Result<HttpResponse, ContactError> {
    Err(ContactError::MethodNotAllowed)
}

#[tracing::instrument(
    name = "Sending the operator notification",
    skip(email_client, operator, submission)
)]
async fn notify_operator(
    email_client: &EmailClient,
    operator: Mailbox,
    submission: &ContactSubmission,
) -> Result<(), ContactError> {
    let received_at = Utc::now();
    let html = operator_email_html(submission, &received_at)?;
    let text = operator_email_text(submission, &received_at);

    let reply_to: Mailbox = submission
        .email
        .as_ref()
        .parse()
        .map_err(|e: lettre::address::AddressError| {
            ContactError::TransportError(MailerError::InvalidAddress(e))
        })?;

    email_client
        .send_email(operator, reply_to, operator_subject(), html, text)
        .await
        .map_err(|e| {
            tracing::error!(error.cause_chain = ?e, "Failed to send the operator notification");
            ContactError::TransportError(e)
        })
}

#[tracing::instrument(
    name = "Sending the confirmation copy to the submitter",
    skip(email_client, operator, submission)
)]
async fn send_confirmation(
    email_client: &EmailClient,
    operator: Mailbox,
    submission: &ContactSubmission,
) -> Result<(), anyhow::Error> {
    let html = confirmation_email_html(submission)?;
    let text = confirmation_email_text(submission);
    let recipient: Mailbox = submission.email.as_ref().parse()?;

    email_client
        .send_email(recipient, operator, confirmation_subject(), html, text)
        .await?;

    Ok(())
}
