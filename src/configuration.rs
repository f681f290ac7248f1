use std::time::Duration;

use lettre::Address;
use lettre::address::AddressError;
use lettre::message::Mailbox;
use secrecy::SecretString;
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::email_client::{EmailClient, MailerError};

pub const ORGANIZATION_NAME: &str = "Seaside Partners";
pub const DEFAULT_FROM_MAILBOX: &str = "Seaside Partners <info@seasidepartners.org>";

#[derive(serde::Deserialize, Debug, Clone)]
pub struct Settings {
    pub app: ApplicationSettings,
    pub mail: MailSettings,
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct MailSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<SecretString>,
    pub contact_to: String,
    pub from_override: Option<String>,
    pub send_client_copy: bool,
    pub tls_strict: bool,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_secs: u64,
}

impl MailSettings {
    pub fn client(&self) -> Result<EmailClient, MailerError> {
        EmailClient::new(self)
    }

    /// Mailbox the operator notification is delivered to.
    pub fn operator(&self) -> Result<Mailbox, AddressError> {
        self.contact_to.parse()
    }

    /// From mailbox: explicit override, then a display name wrapped around
    /// the credential user, then the organizational default.
    pub fn sender(&self) -> Result<Mailbox, AddressError> {
        if let Some(from) = &self.from_override {
            return from.parse();
        }

        if let Some(user) = &self.username {
            if let Ok(address) = user.parse::<Address>() {
                return Ok(Mailbox::new(Some(ORGANIZATION_NAME.to_owned()), address));
            }
        }

        DEFAULT_FROM_MAILBOX.parse()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            "production" => Ok(Environment::Production),
            other => Err(format!(
                "{other} is not supported environment. Try to use `local` or `production`",
            )),
        }
    }
}

/// Flat variables exposed by the deployment platform, mapped onto the nested
/// configuration keys. Applied last, so they win over files and `APP_*`.
const PLATFORM_OVERRIDES: &[(&str, &str)] = &[
    ("MAIL_HOST", "mail.host"),
    ("MAIL_PORT", "mail.port"),
    ("MAIL_USER", "mail.username"),
    ("MAIL_PASSWORD", "mail.password"),
    ("CONTACT_TO", "mail.contact_to"),
    ("MAIL_FROM_OVERRIDE", "mail.from_override"),
    ("SEND_CLIENT_COPY", "mail.send_client_copy"),
    ("TLS_STRICT", "mail.tls_strict"),
];

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().expect("Failed to determine current directory");
    let conf_dir = base_path.join("configuration");
    let env: Environment = std::env::var("APP_ENV")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .expect("Failed to parse APP_ENV");

    let mut builder = config::Config::builder()
        .add_source(
            config::File::with_name(
                conf_dir
                    .join("base")
                    .to_str()
                    .expect("Failed to read base configuration"),
            )
            .required(true),
        )
        .add_source(
            config::File::with_name(
                conf_dir
                    .join(env.as_str())
                    .to_str()
                    .expect("Failed to read environment configuration"),
            )
            .required(true),
        )
        .add_source(
            config::Environment::with_prefix("APP")
                .separator("__")
                .prefix_separator("_"),
        );

    for (var, key) in PLATFORM_OVERRIDES {
        if let Ok(value) = std::env::var(var) {
            builder = builder.set_override(*key, value)?;
        }
    }

    builder.build()?.try_deserialize::<Settings>()
}
