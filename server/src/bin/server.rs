//! Server binary: serves `/api/7tv` until Ctrl+C.

use tracing_subscriber::EnvFilter;

use seventv_cosmetics_lib::app::SharedState;
use seventv_cosmetics_lib::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting 7TV cosmetics server");

    let config = seventv_cosmetics_lib::init_config()?;
    let state = SharedState::new(config)?;

    server::start_server(state, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for shutdown signal: {e}");
            std::future::pending::<()>().await;
        }
        tracing::info!("Shutting down...");
    })
    .await
}
