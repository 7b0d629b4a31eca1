//! Listener and session registry.

use crate::config::ServerConfig;
use crate::error::ServerResult;
use crate::{connection, ticker};
use ringlog_core::LogGateway;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tokio::task::JoinSet;
use tracing::{info, warn};

/// The log server.
///
/// Owns the shared [`LogGateway`] and the accept loop. Each accepted
/// connection gets its own task and its own session; all sealed records
/// land in the one store. An optional timer task produces a timestamp
/// record on a fixed interval through the same write path.
///
/// # Shutdown
///
/// [`shutdown`](Self::shutdown) stops the accept loop, tears down the
/// gateway (waking any lock waiters), then waits up to the configured
/// grace period for in-flight sessions to finish before aborting the
/// stragglers still blocked in socket I/O.
pub struct LogServer {
    config: ServerConfig,
    gateway: LogGateway,
    running: Arc<AtomicBool>,
    shutdown: Notify,
}

impl LogServer {
    /// Creates a server with an empty store sized per the configuration.
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        let gateway = LogGateway::new(config.capacity);
        Self {
            config,
            gateway,
            running: Arc::new(AtomicBool::new(true)),
            shutdown: Notify::new(),
        }
    }

    /// The gateway backing this server.
    #[must_use]
    pub fn gateway(&self) -> &LogGateway {
        &self.gateway
    }

    /// The server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Requests shutdown. Safe to call from any task, more than once.
    pub fn shutdown(&self) {
        self.shutdown.notify_one();
    }

    /// Binds the configured address and serves until shutdown.
    pub async fn run(&self) -> ServerResult<()> {
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        info!(addr = %listener.local_addr()?, "listening");
        self.serve(listener).await
    }

    /// Serves connections from an already-bound listener until shutdown.
    ///
    /// Exposed separately so callers (and tests) can bind port 0 and learn
    /// the local address before serving.
    pub async fn serve(&self, listener: TcpListener) -> ServerResult<()> {
        let mut sessions: JoinSet<()> = JoinSet::new();

        if let Some(interval) = self.config.timestamp_interval {
            sessions.spawn(ticker::run(
                self.gateway.clone(),
                interval,
                Arc::clone(&self.running),
            ));
        }

        loop {
            tokio::select! {
                _ = self.shutdown.notified() => {
                    info!("caught shutdown signal, exiting");
                    break;
                }
                accepted = listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        sessions.spawn(connection::serve(
                            stream,
                            peer,
                            self.gateway.clone(),
                            Arc::clone(&self.running),
                            self.config.read_buffer_size,
                        ));
                    }
                    Err(e) => warn!(error = %e, "accept failed"),
                },
                // Reap finished sessions so the registry stays bounded.
                Some(_) = sessions.join_next() => {}
            }
        }

        // Stop accepting, invalidate the store, then drain the registry.
        drop(listener);
        self.running.store(false, Ordering::Release);
        self.gateway.teardown();

        let drain = async {
            while sessions.join_next().await.is_some() {}
        };
        if tokio::time::timeout(self.config.shutdown_grace, drain)
            .await
            .is_err()
        {
            warn!("sessions did not stop within grace period, aborting them");
            sessions.abort_all();
            while sessions.join_next().await.is_some() {}
        }

        info!("server stopped");
        Ok(())
    }
}
