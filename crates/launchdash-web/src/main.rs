//! Launch records dashboard server
//!
//! Run with: cargo run -p launchdash-web

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use launchdash_common::DashConfig;
use launchdash_data::Dataset;
use launchdash_web::{router::build_router, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("launchdash=debug,tower_http=info,info")),
        )
        .init();

    info!("Starting launch records dashboard...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config = DashConfig::load()?;

    // The dataset must be usable before the UI starts
    let dataset = Dataset::load(&config.data.path)
        .with_context(|| format!("Could not load launch records from {}", config.data.path))?;
    let (min, max) = dataset
        .payload_bounds()
        .with_context(|| format!("{} contains no launch records", config.data.path))?;
    info!(
        "Dataset ready: {} records, sites {:?}, payload {} - {} kg",
        dataset.len(),
        dataset.sites(),
        min,
        max
    );

    let bind_addr = config.server.bind.clone();
    let state = AppState::new(dataset, config)?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("🚀 Dashboard listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
