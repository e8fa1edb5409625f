//! Component service.
//!
//! Hosts component endpoints for the orchestration platform on
//! `0.0.0.0:8080` by default.
//!
//! ```text
//!     POST /echo, /files, ...
//!     ──────────────────────▶ http server ──▶ extract (value|file, args) ──▶ handler
//!                                 │                                           │
//!     JSON response               ▼                                           │
//!     ◀────────────────────── middleware (trace, request id, limits) ◀────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use loko_extensions::components::reference_components;
use loko_extensions::config::loader::{self, default_config, load_config};
use loko_extensions::http::HttpServer;
use loko_extensions::lifecycle::{signals, Shutdown};
use loko_extensions::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "loko-extensions")]
#[command(about = "Component service for the orchestration platform", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the bind address (e.g. 0.0.0.0:8080).
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => default_config()?,
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
        config = loader::finish(config)?;
    }

    logging::init_logging(&config.observability);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "loko-extensions starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        max_body_size = config.limits.max_body_size,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    signals::spawn_signal_handler(shutdown.clone());

    let server = HttpServer::new(config, reference_components());
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
