//! Per-connection read/replay loop.

use crate::error::{ServerError, ServerResult};
use ringlog_core::{CoreError, LogGateway};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::{info, warn};

/// Serves one accepted connection until the peer closes it or the server
/// shuts down.
pub(crate) async fn serve(
    stream: TcpStream,
    peer: SocketAddr,
    gateway: LogGateway,
    running: Arc<AtomicBool>,
    read_buffer_size: usize,
) {
    info!(%peer, "accepted connection");
    match handle(stream, gateway, running, read_buffer_size).await {
        Ok(()) => {}
        Err(ServerError::Core(CoreError::Closed | CoreError::Interrupted)) => {
            // Server shutdown raced the session; nothing to report.
        }
        Err(e) => warn!(%peer, error = %e, "session ended with error"),
    }
    // Dropping the session discarded any unsealed pending bytes.
    info!(%peer, "closed connection");
}

async fn handle(
    mut stream: TcpStream,
    gateway: LogGateway,
    running: Arc<AtomicBool>,
    read_buffer_size: usize,
) -> ServerResult<()> {
    let mut session = gateway.open_session();
    let mut buf = vec![0u8; read_buffer_size];

    loop {
        let n = stream.read(&mut buf).await?;
        if n == 0 {
            return Ok(());
        }
        if !running.load(Ordering::Acquire) {
            return Ok(());
        }

        let sealed = session.write(&buf[..n])?;

        // One replay per chunk that completed at least one record: a
        // per-record replay would be a strict prefix of the next one.
        if sealed > 0 {
            let snapshot = gateway.snapshot()?;
            stream
                .write_all(&snapshot)
                .await
                .map_err(ServerError::Sink)?;
        }
    }
}
