//! search-relay: entry point
//!
//! Loads settings, refuses to start without search credentials, then serves
//! the relay API.

use anyhow::Result;
use search_relay::{
    config,
    web::{create_router, AppState},
};
use std::net::SocketAddr;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; variables may come from the real environment.
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    info!("Starting search-relay v{}", search_relay::VERSION);

    // Load configuration
    let settings = config::load()?;
    if let Err(e) = settings.validate() {
        error!("CRITICAL ERROR: {}", e);
        return Err(e.into());
    }
    info!(
        model = %settings.summarizer.model,
        ollama = %settings.summarizer.base_url,
        "Configuration loaded"
    );

    // Create application state
    let state = AppState::new(settings.clone())?;

    // Create router
    let app = create_router(state);

    // Bind address
    let addr = SocketAddr::new(settings.server.bind_address.parse()?, settings.server.port);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server is running on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
