//! HTTP front end for 7TV cosmetics lookups.

pub mod app;
pub mod config;
pub mod server;

use config::AppConfig;

/// Load .env from multiple candidate paths.
fn load_dotenv() {
    let candidates = [".env", "../.env", "../../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::info!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::info!("No .env file found, using system environment variables");
}

/// Load `.env`, then build and validate the runtime config.
pub fn init_config() -> Result<AppConfig, anyhow::Error> {
    load_dotenv();

    let config = AppConfig::load()?;
    tracing::info!(
        port = config.server_port,
        seventv = %config.seventv_api_url,
        identity = %config.identity_api_url,
        cache_ttl = config.cache_ttl_seconds,
        "Settings loaded"
    );
    Ok(config)
}
