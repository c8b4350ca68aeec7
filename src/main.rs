//! Posts Service
//!
//! CRUD over an in-memory collection of posts, served with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ─────────────▶ request id ─▶ trace ─▶ timeout ─▶ dispatch
//!                                                        │
//!                                          routing::resolve(method, path)
//!                                                        │
//!                          ┌──────────────┬──────────────┼──────────────┐
//!                          ▼              ▼              ▼              ▼
//!                     list_posts     create_post     get_post      delete_post
//!                          └──────────────┴──────┬───────┴──────────────┘
//!                                                ▼
//!                                    PostStore (Mutex<HashMap>)
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tokio::net::TcpListener;

use posts_service::config::{load_config, validate_config, ConfigError, ServiceConfig};
use posts_service::http::HttpServer;
use posts_service::lifecycle::{wait_for_shutdown_signal, Shutdown};
use posts_service::observability::{logging, metrics};

#[derive(Parser, Debug)]
#[command(name = "posts-service", version, about = "In-memory posts HTTP API")]
struct Args {
    /// Path to a TOML config file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listen address (e.g. 127.0.0.1:8080).
    #[arg(short, long)]
    bind: Option<SocketAddr>,
}

fn load(args: &Args) -> Result<ServiceConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind.to_string();
    }
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load(&args)?;

    logging::init_logging(&config.observability)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config_file = ?args.config,
        "posts-service starting"
    );
    tracing::info!(
        bind_address = %config.listener.bind_address,
        max_body_bytes = config.limits.max_body_bytes,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Started on port {}", local_addr.port());
    tracing::info!("Press Ctrl+C to stop");

    let grace = Duration::from_secs(config.timeouts.shutdown_grace_secs);
    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    let mut server_task = tokio::spawn(server.run(listener, shutdown.subscribe()));

    tokio::select! {
        result = &mut server_task => {
            // Server exited without being asked to
            result??;
            return Ok(());
        }
        _ = wait_for_shutdown_signal() => shutdown.trigger(),
    }

    match tokio::time::timeout(grace, server_task).await {
        Ok(result) => result??,
        Err(_) => tracing::warn!(grace_secs = grace.as_secs(), "Drain deadline passed, exiting"),
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
