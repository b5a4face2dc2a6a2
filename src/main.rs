use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use tripwise::api::AppState;
use tripwise::config::{LoggingConfig, TripWiseConfig};
use tripwise::gemini::GeminiClient;
use tripwise::weather::WeatherClient;
use tripwise::web;

#[tokio::main]
async fn main() -> Result<()> {
    let config = TripWiseConfig::load()?;
    init_logging(&config.logging);

    tracing::info!("Starting TripWise v{}", tripwise::VERSION);
    if config.weather.api_key.is_none() {
        tracing::warn!("No weather API key configured; /weather and /places will reject requests");
    }
    if config.gemini.api_key.is_none() {
        tracing::warn!("No Gemini API key configured; recommendation endpoints will degrade");
    }

    let state = Arc::new(AppState {
        weather: WeatherClient::new(&config.weather)?,
        gemini: GeminiClient::new(&config.gemini)?,
    });

    web::run(state, &config.server.host, config.server.port).await
}

fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tripwise={},info", logging.level)));

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(false).json())
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(false).compact())
            .init();
    }
}
