//! Asset management API server.
//!
//! Reads configuration from `$ASSET_MANAGEMENT_CONFIG` or
//! `~/.config/asset-management/config.toml`. See the `asset-management-server`
//! binary in `cli/` for command-line overrides.

use tracing::{error, info};

use asset_management::config::AppConfig;
use asset_management::default_config_path;
use asset_management::server::{init_tracing, ServerHandle, ServerOptions};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = default_config_path();
    let config = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            init_tracing(&cfg);
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            let cfg = AppConfig::default();
            init_tracing(&cfg);
            error!("Failed to load config from {}: {}. Using defaults.", config_path.display(), e);
            cfg
        }
    };

    let handle = ServerHandle::start(ServerOptions {
        config,
        ..ServerOptions::default()
    })
    .await?;

    handle.install_signal_handler();
    info!("Press Ctrl+C to shut down gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;
    Ok(())
}
