use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use oil_news::aggregator::NewsAggregator;
use oil_news::config::Config;
use oil_news::routes::{self, AppState};

const CONFIG_PATH: &str = "feeds.toml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "oil_news=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match Config::load(CONFIG_PATH) {
        Ok(config) => config,
        Err(e) => {
            warn!("Could not load {}: {}; using built-in feeds", CONFIG_PATH, e);
            Config::default()
        }
    };
    info!(
        "Loaded {} feeds, refreshing every {} minutes",
        config.feeds.len(),
        config.refresh_interval
    );

    // Start aggregator; the first refresh runs in the background
    let (news, _refresh_task) = NewsAggregator::spawn(&config)?;

    let state = Arc::new(AppState { news });
    let app = routes::router(state).layer(TraceLayer::new_for_http());

    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    info!("Server starting on http://localhost:{}", port);

    axum::serve(listener, app).await?;

    Ok(())
}
