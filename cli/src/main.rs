//! Asset management API: CLI server
//!
//! ```sh
//! # Run with default config (~/.config/asset-management/config.toml)
//! asset-management-server
//!
//! # Custom config path and port
//! asset-management-server --config /etc/asset-management/config.toml --port 8081
//!
//! # Throwaway in-memory store, nothing written to disk
//! asset-management-server --memory
//!
//! # Validate config without starting
//! asset-management-server --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use asset_management::config::AppConfig;
use asset_management::server::{init_tracing, ServerHandle, ServerOptions};

/// REST API for tracking assets, their assignments and returns.
#[derive(Parser, Debug)]
#[command(
    name = "asset-management-server",
    version,
    about = "Asset management REST API server",
    long_about = "Asset management REST API: users, assets, assignments and return requests.\n\n\
                  Default config: ~/.config/asset-management/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "ASSET_MANAGEMENT_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Keep all data in memory instead of the configured database.
    #[arg(long)]
    memory: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,

    /// Skip creating the default admin and categories.
    #[arg(long)]
    no_seed: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .unwrap_or_else(asset_management::default_config_path);

    let loaded = AppConfig::load(&config_path);
    let mut config = match &loaded {
        Ok(cfg) => cfg.clone(),
        Err(_) => AppConfig::default(),
    };
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }

    // Tracing first so the messages below are formatted
    init_tracing(&config);
    match loaded {
        Ok(_) => info!("Configuration loaded from {}", config_path.display()),
        Err(e) => {
            error!("Failed to load config from {}: {}", config_path.display(), e);
            if cli.check {
                return Err(e.into());
            }
            error!("Using default configuration.");
        }
    }

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(port) = cli.port {
        info!("CLI override: port = {}", port);
        config.server.port = port;
    }
    if let Some(ref level) = cli.log_level {
        info!("CLI override: log_level = {}", level);
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   Address     : {}", config.server.address());
        println!("   Public URL  : {}", config.server.base_url());
        println!(
            "   Database    : {}",
            if cli.memory { "in-memory" } else { config.database.url.as_str() }
        );
        println!(
            "   Page size   : {} (max {})",
            config.pagination.default_page_size, config.pagination.max_page_size
        );
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
        in_memory: cli.memory,
        seed: !cli.no_seed,
    })
    .await?;

    handle.install_signal_handler();
    info!("Press Ctrl+C to shut down gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
