//! Coresense Daemon
//!
//! HTTP telemetry service exposing CPU utilization and per-core
//! temperatures on a single endpoint.

mod config;
mod state;
mod web;

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use coresense_sensors::SystemSensors;
use state::AppState;

#[derive(Parser)]
#[command(name = "coresensed")]
#[command(about = "CPU utilization and core temperature telemetry daemon")]
#[command(version)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Listen address override (e.g. 0.0.0.0:8080)
    #[arg(short, long)]
    listen: Option<String>,

    /// hwmon chip name override for the temperature group
    #[arg(long)]
    chip: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Setup logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let mut config = match &cli.config {
        Some(path) => {
            let config = Config::load(path).context("Failed to load configuration")?;
            info!("Loaded configuration from: {}", path);
            config
        }
        None => Config::default(),
    };
    if let Some(listen) = cli.listen {
        config.listen = listen;
    }
    if let Some(chip) = cli.chip {
        config.sensors.chip = chip;
    }

    // Initialize application state
    let sensors = SystemSensors::new(&config.sensors.chip);
    let state = Arc::new(AppState::new(Box::new(sensors)));

    let app = web::create_router(state);
    let addr: SocketAddr = config.listen.parse().context("Invalid listen address")?;
    let listener = TcpListener::bind(addr).await?;
    info!(
        "Serving readings for sensor group '{}' on http://{}",
        config.sensors.chip, addr
    );

    // Setup Unix signal handlers
    let mut sigterm = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;
    let mut sigint = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::interrupt())?;

    // Run server with shutdown handling
    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down");
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down");
        }
    }

    Ok(())
}
