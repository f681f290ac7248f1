use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use secrecy::ExposeSecret;

use crate::configuration::MailSettings;

/// Well-known implicit-SSL submission port. Every other port starts out in
/// plaintext and upgrades via STARTTLS.
const SMTPS_PORT: u16 = 465;
const SUBMISSION_PORT: u16 = 587;

#[derive(thiserror::Error, Debug)]
pub enum MailerError {
    #[error("SMTP credentials are not configured")]
    MissingCredentials,
    #[error("Invalid mail address in configuration")]
    InvalidAddress(#[from] lettre::address::AddressError),
    #[error("Failed to assemble the email message")]
    Message(#[from] lettre::error::Error),
    #[error("SMTP transport failure")]
    Transport(#[from] lettre::transport::smtp::Error),
}

#[derive(Clone)]
pub struct EmailClient {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
}

impl EmailClient {
    /// Binds a session descriptor to the resolved host/port/credentials.
    /// Nothing is sent on the wire here: connection and handshake are
    /// deferred to the first send, and a missing credential pair fails
    /// before any network activity.
    pub fn new(config: &MailSettings) -> Result<Self, MailerError> {
        let (username, password) = match (&config.username, &config.password) {
            (Some(username), Some(password)) => (username, password),
            _ => return Err(MailerError::MissingCredentials),
        };

        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
            .port(config.port)
            .credentials(Credentials::new(
                username.clone(),
                password.expose_secret().to_owned(),
            ))
            .tls(tls_policy(config)?)
            .timeout(Some(config.timeout()))
            .build();

        Ok(Self {
            transport,
            sender: config.sender()?,
        })
    }

    #[tracing::instrument(
        name = "Handing an email to the SMTP transport",
        skip(self, reply_to, subject, html_content, text_content),
        fields(recipient = %recipient)
    )]
    pub async fn send_email(
        &self,
        recipient: Mailbox,
        reply_to: Mailbox,
        subject: String,
        html_content: String,
        text_content: String,
    ) -> Result<(), MailerError> {
        let message = Message::builder()
            .from(self.sender.clone())
            .to(recipient)
            .reply_to(reply_to)
            .subject(subject)
            .multipart(MultiPart::alternative_plain_html(
                text_content,
                html_content,
            ))?;

        self.transport.send(message).await?;

        Ok(())
    }
}

fn tls_policy(config: &MailSettings) -> Result<Tls, MailerError> {
    let parameters = TlsParameters::builder(config.host.clone())
        .dangerous_accept_invalid_certs(!config.tls_strict)
        .build()?;

    Ok(match config.port {
        SMTPS_PORT => Tls::Wrapper(parameters),
        SUBMISSION_PORT => Tls::Required(parameters),
        _ => Tls::Opportunistic(parameters),
    })
}
