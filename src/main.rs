use seaside_contact::configuration::get_configuration;
use seaside_contact::startup::Application;
use seaside_contact::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("seaside-contact".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let config = get_configuration().expect("Failed to read configuration");

    let app = Application::build(config)?;
    tracing::info!("Listening on port {}", app.get_port());
    app.run_until_stopped().await?;

    Ok(())
}
