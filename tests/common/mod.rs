//! Shared helpers for integration tests.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::net::TcpListener;

use taskd::{HttpServer, RecordStore, ServerConfig, Shutdown};

/// Boot the API on an ephemeral local port, backed by the given store file.
///
/// Returns the bound address and a shutdown handle; triggering it stops the
/// server gracefully.
pub async fn start_server(db_path: PathBuf) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let mut config = ServerConfig::default();
    config.listener.bind_address = addr.to_string();
    config.storage.db_path = db_path.clone();

    let store = Arc::new(RecordStore::open(db_path));
    let server = HttpServer::new(config, store);

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        server.run_until(listener, rx).await.unwrap();
    });

    (addr, shutdown)
}
