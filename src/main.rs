//! taskd — task-management HTTP API.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use taskd::config::{load_config, ServerConfig};
use taskd::{HttpServer, RecordStore};

#[derive(Parser)]
#[command(name = "taskd", about = "Task-management HTTP API", version)]
struct Args {
    /// Path to the TOML configuration file; defaults are used when absent.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = match args.config {
        Some(path) => load_config(&path)?,
        None => ServerConfig::default(),
    };

    // Initialize tracing subscriber; RUST_LOG overrides the configured level
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(config.observability.env_filter_directive())
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("taskd v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        db_path = %config.storage.db_path.display(),
        request_timeout_secs = config.timeouts.request_secs,
        log_level = %config.observability.log_level,
        "Configuration loaded"
    );

    let store = Arc::new(RecordStore::open(&config.storage.db_path));

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let server = HttpServer::new(config, store);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
