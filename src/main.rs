//! Health check server.
//!
//! ```text
//!  POST /health-check ["http://a", "http://b", ...]
//!        │
//!        ▼
//!  ┌─────────────┐   one task per URL   ┌─────────┐
//!  │ dispatcher  │─────────────────────▶│  probe  │──┐
//!  │             │─────────────────────▶│  probe  │──┤  result queue
//!  │             │─────────────────────▶│  probe  │──┤  (capacity = N)
//!  └─────────────┘                      └─────────┘  │
//!        ▲                                           │
//!        └──────── collector: exactly N receives ◀───┘
//!        │
//!        ▼
//!  200 [{"url": "...", "status": "UP" | "DOWN"}, ...]
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use fanout::config::{load_config, validate_config, AppConfig, ConfigError};
use fanout::lifecycle::wait_for_signal;
use fanout::observability::init_logging;
use fanout::HttpServer;

#[derive(Parser)]
#[command(name = "fanout")]
#[command(about = "Concurrent HTTP health check server", long_about = None)]
struct Args {
    /// Path to a TOML config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    init_logging(&config.observability)?;
    tracing::info!("fanout v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        probe_timeout_secs = config.health_check.timeout_secs,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let server = HttpServer::new(config)?;
    server.run(listener, wait_for_signal()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
