use std::net::TcpListener;

use once_cell::sync::Lazy;
use secrecy::SecretString;
use seaside_contact::configuration::{Settings, get_configuration};
use seaside_contact::telemetry::{get_subscriber, init_subscriber};

use crate::mock_smtp::MockSmtpServer;

static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub struct TestApp {
    pub address: String,
    pub mail_server: MockSmtpServer,
    pub api_client: reqwest::Client,
}

impl TestApp {
    pub async fn post_contact(&self, body: &serde_json::Value) -> reqwest::Response {
        self.api_client
            .post(format!("{}/api/contact", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_contact_raw(&self, body: String) -> reqwest::Response {
        self.api_client
            .post(format!("{}/api/contact", self.address))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn request_contact(&self, method: reqwest::Method) -> reqwest::Response {
        self.api_client
            .request(method, format!("{}/api/contact", self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }
}

pub fn valid_body() -> serde_json::Value {
    serde_json::json!({
        "name": "Jo",
        "email": "jo@x.com",
        "phone": "1234567",
        "message": "I need help with a dispute"
    })
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(|_| {}).await
}

pub async fn spawn_app_with(customise: impl FnOnce(&mut Settings)) -> TestApp {
    build_app(MockSmtpServer::start().await, customise).await
}

pub async fn spawn_app_with_faulty_mail() -> TestApp {
    build_app(MockSmtpServer::start_faulty().await, |_| {}).await
}

async fn build_app(
    mail_server: MockSmtpServer,
    customise: impl FnOnce(&mut Settings),
) -> TestApp {
    Lazy::force(&TRACING);

    let mut config = get_configuration().expect("Failed to read configuration");
    config.mail.host = "127.0.0.1".to_string();
    config.mail.port = mail_server.port();
    config.mail.username = Some("intake@seasidepartners.org".to_string());
    config.mail.password = Some(SecretString::from("smtp-pass".to_string()));
    config.mail.contact_to = "info@seasidepartners.org".to_string();
    config.mail.timeout_secs = 5;
    customise(&mut config);

    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port.");
    let port = listener.local_addr().unwrap().port();
    let server =
        seaside_contact::startup::run(listener, config.mail).expect("Failed to build server.");

    let _ = tokio::spawn(server);

    TestApp {
        address: format!("http://127.0.0.1:{port}"),
        mail_server,
        api_client: reqwest::Client::new(),
    }
}
