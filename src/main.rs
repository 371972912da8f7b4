//! Locale Gateway
//!
//! Sits in front of a multilingual site and makes sure every page URL
//! carries a locale prefix.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌───────────────────────────────────────────────┐
//!                      │                LOCALE GATEWAY                 │
//!                      │                                               │
//!   Client Request     │  ┌──────────┐   ┌────────┐   ┌─────────────┐  │
//!   ───────────────────┼─▶│request id│──▶│ trace  │──▶│   locale    │  │
//!                      │  └──────────┘   └────────┘   │ middleware  │  │
//!                      │                              └──────┬──────┘  │
//!                      │                   Redirect ◀────────┤         │
//!   ◀──── 3xx Location ┼───────────────────────────          │Continue │
//!                      │                              ┌──────▼──────┐  │
//!   ◀──── Response ────┼──────────────────────────────│   forward   │──┼──▶ Origin
//!                      │                              └─────────────┘  │
//!                      └───────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use locale_gateway::config::{load_config, GatewayConfig};
use locale_gateway::lifecycle::{wait_for_signal, Shutdown};
use locale_gateway::observability::{logging, metrics};
use locale_gateway::HttpServer;

#[derive(Parser)]
#[command(name = "locale-gateway")]
#[command(about = "Locale-prefix redirect gateway", long_about = None)]
struct Args {
    /// Path to the TOML configuration file (defaults apply when omitted).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };

    logging::init_logging(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = ?args.config,
        "locale-gateway starting"
    );

    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.url,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let server = HttpServer::new(config.clone())?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let shutdown_rx = shutdown.subscribe();
    tokio::spawn(async move {
        wait_for_signal().await;
        shutdown.trigger();
    });

    server.run(listener, shutdown_rx).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
