//! Passthrough Gateway
//!
//! Relays three REST endpoints to an upstream API, built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                         ┌──────────────────────────────────────────────────┐
//!                         │                PASSTHROUGH GATEWAY               │
//!                         │                                                  │
//!     Client Request      │  ┌─────────┐    ┌──────────┐    ┌────────────┐   │
//!     ────────────────────┼─▶│  http   │───▶│ routing  │───▶│  gateway   │   │
//!                         │  │ server  │    │  table   │    │  forward   │   │
//!                         │  └─────────┘    └──────────┘    └─────┬──────┘   │
//!                         │                                       │          │
//!                         │                                       ▼          │
//!     Client Response     │  ┌──────────┐   ┌──────────┐    ┌────────────┐   │
//!     ◀───────────────────┼──│ response │◀──│  decode  │◀───│ transport  │◀──┼── Upstream
//!                         │  │ mapping  │   │ by shape │    │ + deadline │   │   API
//!                         │  └──────────┘   └──────────┘    └────────────┘   │
//!                         │                                                  │
//!                         │  config · observability · lifecycle              │
//!                         └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use passthrough_gateway::config::load_config;
use passthrough_gateway::http::HttpServer;
use passthrough_gateway::lifecycle::{spawn_signal_handler, Shutdown};
use passthrough_gateway::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "passthrough-gateway")]
#[command(about = "Relay fixed REST endpoints to an upstream API", long_about = None)]
struct Args {
    /// Path to a TOML config file. Defaults reproduce the built-in routes.
    #[arg(short, long, env = "GATEWAY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration before logging so the configured level applies.
    let config = load_config(args.config.as_deref())?;
    logging::init(&config.observability);

    tracing::info!("passthrough-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        upstream_timeout_ms = config.timeouts.upstream_ms,
        routes = config.routes.len(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    spawn_signal_handler(shutdown.clone());

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
