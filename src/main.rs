// Stormglass forecast collector v0.1
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod errors;
mod services;
mod spots;

use config::AppConfig;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stormglass_collector=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    tracing::info!(
        "Collecting {} spots into {}",
        spots::SPOTS.len(),
        config.output_dir.display()
    );

    if let Err(e) = services::collector::run(&config).await {
        tracing::error!("Collection run failed: {}", e);
        std::process::exit(1);
    }
}
