//! Parkwise Quote Service Binary

use std::net::SocketAddr;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use parkwise_pricing::ServiceConfig;
use parkwise_quote::{create_router, AppState, SERVICE_VERSION};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    info!("Starting Parkwise quote service v{}", SERVICE_VERSION);

    // Load configuration
    let config = ServiceConfig::load()?;
    info!("Loaded configuration: {:?}", config);

    let quoter = config.build_quoter()?;
    info!(
        "Pricing config: threshold={}, slope={}, peaks={:?}, lot offset={}min",
        config.pricing.surge_threshold,
        config.pricing.surge_slope,
        config.pricing.peak_windows,
        config.lot_utc_offset_minutes
    );
    info!("Subscriber roster: {} plates", quoter.roster().len());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let app = create_router(AppState::new(quoter));

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for shutdown signal: {}", e);
        }
        info!("Received shutdown signal");
    };

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Quote API listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Shutting down Parkwise quote service");
    Ok(())
}
