use studio_intake::config::get_configuration;
use studio_intake::startup::Application;
use studio_intake::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let subscriber = get_subscriber(
        String::from("studio_intake"),
        String::from("info"),
        std::io::stdout,
    );

    init_subscriber(subscriber);

    let config = get_configuration().map_err(|err| {
        tracing::error!("Failed to load configuration: {:?}", err);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, err)
    })?;

    Application::build(config).await?.run_until_stop().await
}
