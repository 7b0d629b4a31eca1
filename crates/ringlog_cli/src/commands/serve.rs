//! Serve command implementation.

use ringlog_server::{LogServer, ServerConfig, ServerResult};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Runs the TCP log server until ctrl-c.
pub async fn run(
    bind: SocketAddr,
    capacity: usize,
    timestamp_interval: u64,
    grace: u64,
) -> ServerResult<()> {
    let interval = if timestamp_interval == 0 {
        None
    } else {
        Some(Duration::from_secs(timestamp_interval))
    };
    let config = ServerConfig::new(bind)
        .with_capacity(capacity)
        .with_timestamp_interval(interval)
        .with_shutdown_grace(Duration::from_secs(grace));

    let server = Arc::new(LogServer::new(config));

    let signal_server = Arc::clone(&server);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("caught signal, exiting");
                signal_server.shutdown();
            }
            Err(e) => warn!(error = %e, "failed to listen for ctrl-c"),
        }
    });

    server.run().await
}
