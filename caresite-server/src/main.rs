//! caresite-server — website-configuration backend
//!
//! Long-running service that:
//! - Registers hospital/pharmacy accounts and issues JWT token pairs
//! - Maintains the one-website-setup-per-account registry
//! - Stores and publishes per-account business profiles

use caresite_server::{AppState, Config, api};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "caresite_server=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    tracing::info!("Starting caresite-server (env: {})", config.environment);

    let state = AppState::new(&config).await?;
    let app = api::router(state);

    let addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("caresite-server listening on {addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
