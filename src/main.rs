//! Config Endpoint Service
//!
//! A small HTTP service that returns a hardcoded load-balancer configuration
//! document and accepts unhealthy-target notifications. Built with Tokio and
//! Axum.
//!
//! Startup order: parse CLI → load configuration → initialize tracing →
//! bind listener → serve until interrupted.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lb_configd::config::{load_config, AppConfig, DEFAULT_LOG_FILTER};
use lb_configd::http::HttpServer;

/// Serve a load-balancer configuration document over HTTP.
#[derive(Parser, Debug)]
#[command(name = "lb-configd", version, about)]
struct Args {
    /// Path to configuration file (compiled-in defaults when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level filter (e.g., "lb_configd=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };

    // Filter priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    let registry =
        tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::new(&log_filter));
    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "lb-configd starting");

    tracing::info!(
        bind_address = %config.listener.bind_address,
        routers = config.document.routers.len(),
        services = config.document.services.len(),
        "Configuration loaded"
    );

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    // Create and run HTTP server
    let server = HttpServer::new(&config)?;
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
