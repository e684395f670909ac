//! tsp-provider - Tweet ingestion service entry point
//!
//! Listens for tweets on POST /tweets and runs each one through the
//! score → save → publish pipeline against the local sidecar.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter};
use tsp_common::config::DEFAULT_LOG_LEVEL;
use tsp_common::{ConfigOverrides, ConfigResolver};
use tsp_provider::{build_router, AppState};

/// Command-line arguments for tsp-provider
#[derive(Parser, Debug)]
#[command(name = "tsp-provider")]
#[command(about = "Tweet sentiment provider service")]
#[command(version)]
struct Args {
    /// Port to listen on (default 3001)
    #[arg(short, long)]
    port: Option<u16>,

    /// Sidecar HTTP port (overrides DAPR_HTTP_PORT)
    #[arg(long)]
    sidecar_port: Option<u16>,

    /// TOML config file (overrides TSP_CONFIG)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Filter directives for our crates at `level`, used when RUST_LOG is unset
fn filter_directives(level: &str) -> String {
    format!("tsp_provider={level},tsp_common={level},tower_http=info")
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Tracing goes up before config resolution so its notices are recorded.
    // The level from the TOML file is applied afterwards through the reload
    // handle unless RUST_LOG is set.
    let env_filter = EnvFilter::try_from_default_env().ok();
    let filter_from_env = env_filter.is_some();
    let (filter, filter_handle) = reload::Layer::new(
        env_filter.unwrap_or_else(|| EnvFilter::new(filter_directives(DEFAULT_LOG_LEVEL))),
    );
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting tsp-provider v{}", env!("CARGO_PKG_VERSION"));

    let config = ConfigResolver::new(ConfigOverrides {
        config_path: args.config,
        listen_port: args.port,
        sidecar_port: args.sidecar_port,
    })
    .resolve()
    .context("Failed to resolve configuration")?;

    if !filter_from_env && config.log_level != DEFAULT_LOG_LEVEL {
        filter_handle
            .reload(EnvFilter::new(filter_directives(&config.log_level)))
            .context("Failed to apply configured log level")?;
        info!("Log level: {}", config.log_level);
    }
    info!("Sidecar: {}", config.sidecar.base_url());

    let app = build_router(AppState::new(config.sidecar.clone()));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.listen_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("Port: {}", config.listen_port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on SIGINT or SIGTERM
///
/// A handler that cannot be installed never fires; the other one still does.
async fn shutdown_signal() {
    let interrupt = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Ctrl+C handler unavailable: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("SIGTERM handler unavailable: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let received = tokio::select! {
        _ = interrupt => "SIGINT",
        _ = terminate => "SIGTERM",
    };
    info!("Received {}, draining in-flight requests", received);
}
