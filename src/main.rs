use anyhow::Context;
use tracing_subscriber::EnvFilter;

use cake_api::database::DatabaseManager;
use cake_api::{app, AppConfig, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, CAKE_API_PORT, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("cake_api=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env();
    tracing::info!("Starting Cake API in {:?} mode", config.environment);

    let store = DatabaseManager::connect(config.database_url(), &config.database)
        .await
        .context("failed to connect to cake store")?;
    tracing::info!(backend = store.backend(), "Cake store ready");

    let bind_addr = config.bind_addr();
    let app = app(AppState::new(store, config));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Cake API listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Cake API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
    }
}
