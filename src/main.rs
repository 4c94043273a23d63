//! Paraglide booking admin server
//!
//! ```sh
//! # Run with default config (~/.config/paraglide-bookings/config.toml)
//! paraglide-bookings
//!
//! # Custom config path and port
//! paraglide-bookings --config /etc/paraglide/config.toml --port 9000
//!
//! # Validate config without starting
//! paraglide-bookings --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use paraglide_bookings::config::{default_config_path, AppConfig, ConfigError};
use paraglide_bookings::server::{init_tracing, ServerHandle, ServerOptions};

/// Booking administration backend for the paragliding marketplace.
#[derive(Parser, Debug)]
#[command(name = "paraglide-bookings", version, about)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "PARAGLIDE_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.unwrap_or_else(default_config_path);
    let loaded = AppConfig::load(&config_path);

    let mut config = match &loaded {
        Ok(cfg) => cfg.clone(),
        Err(_) => AppConfig::default(),
    };
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    init_tracing(&config);

    match loaded {
        Ok(_) => info!("Configuration loaded from {}", config_path.display()),
        Err(ConfigError::NotFound(path)) => {
            info!("No config at {}; using defaults", path.display())
        }
        Err(e) => {
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
        }
    }

    if let Some(port) = cli.port {
        info!("CLI override: port = {}", port);
        config.server.port = port;
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API address : {}", config.server.address());
        println!("   Database    : {}", config.database.connection_url());
        println!("   Log level   : {}", config.logging.level);
        println!("   Admin       : {} ({})", config.admin.display_name, config.admin.locale);
        return Ok(());
    }

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
    })
    .await?;

    handle.install_signal_handler();
    info!("Press Ctrl+C to shut down gracefully.");

    handle.wait().await;
    Ok(())
}
