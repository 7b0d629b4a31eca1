//! Send command implementation.

use std::io::Write;
use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

/// Sends one line to a log server and prints the replayed store content.
///
/// The write side is closed after the line is sent, so the server's full
/// replay can be read to end-of-stream.
pub async fn run(addr: SocketAddr, line: &str) -> std::io::Result<()> {
    let mut payload = line.as_bytes().to_vec();
    if !payload.ends_with(b"\n") {
        payload.push(b'\n');
    }

    let mut stream = TcpStream::connect(addr).await?;
    debug!(%addr, bytes = payload.len(), "connected");

    stream.write_all(&payload).await?;
    stream.shutdown().await?;

    let mut replay = Vec::new();
    stream.read_to_end(&mut replay).await?;
    debug!(bytes = replay.len(), "received replay");

    std::io::stdout().write_all(&replay)?;
    Ok(())
}
