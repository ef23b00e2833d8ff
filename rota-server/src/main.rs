//! rota-server — Employee shift scheduling backend
//!
//! Long-running service that:
//! - Manages employees and their daily shift assignments (morning/evening/night)
//! - Records employee slot preferences used when building the schedule
//! - Mediates shift hand-overs through a two-party (employee + admin) approval workflow

mod api;
mod auth;
mod config;
mod db;
mod state;

use config::Config;
use state::AppState;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rota_server=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    tracing::info!("Starting rota-server (env: {})", config.environment);

    // Initialize application state (connects + runs migrations)
    let state = AppState::new(&config).await?;

    let app = api::create_router(state);

    let http_addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&http_addr).await?;
    tracing::info!("rota-server HTTP listening on {http_addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
