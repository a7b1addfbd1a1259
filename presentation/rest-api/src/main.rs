use dotenvy::dotenv;

mod api;
mod config;
mod setup;

use config::app_config::AppConfig;
use setup::{dependency_injection::DependencyContainer, server::Server};

/// REST API Entry Point
///
/// Loads configuration, publishes the restaurant dataset, wires the
/// recommendation pipeline and starts the HTTP server.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load environment variables (before the filter reads RUST_LOG)
    dotenv().ok();

    // 2. Initialize tracing with RUST_LOG env filter
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // 3. Load configuration
    let config = AppConfig::from_env()?;

    // 4. Wire dependencies and load the dataset
    let container = DependencyContainer::new(&config).await?;

    // 5. Run server
    Server::run(config, container).await?;

    Ok(())
}
