use clap::Parser;
use event_feed_gateway::{app, config::GatewayConfig, startup};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    startup::init_logging();

    let config = GatewayConfig::parse();

    info!("Initializing cache and graph api clients...");
    let services = startup::build_services(&config).await?;

    let app = app::build_router(services);
    startup::serve(&config, app).await
}
