//! Server configuration.

use ringlog_core::DEFAULT_CAPACITY;
use std::net::SocketAddr;
use std::time::Duration;

/// Configuration for the log server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to.
    pub bind_addr: SocketAddr,
    /// Number of record slots in the store.
    pub capacity: usize,
    /// Size of the per-connection read buffer.
    pub read_buffer_size: usize,
    /// Interval between periodic timestamp records. `None` disables the
    /// timestamp producer.
    pub timestamp_interval: Option<Duration>,
    /// How long shutdown waits for in-flight sessions before aborting them.
    pub shutdown_grace: Duration,
}

impl ServerConfig {
    /// Creates a configuration bound to the given address.
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            capacity: DEFAULT_CAPACITY,
            read_buffer_size: 1024,
            timestamp_interval: Some(Duration::from_secs(10)),
            shutdown_grace: Duration::from_secs(3),
        }
    }

    /// Sets the store capacity in records.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the per-connection read buffer size.
    pub fn with_read_buffer_size(mut self, size: usize) -> Self {
        self.read_buffer_size = size;
        self
    }

    /// Sets the timestamp interval; `None` disables timestamp records.
    pub fn with_timestamp_interval(mut self, interval: Option<Duration>) -> Self {
        self.timestamp_interval = interval;
        self
    }

    /// Sets the shutdown grace period.
    pub fn with_shutdown_grace(mut self, grace: Duration) -> Self {
        self.shutdown_grace = grace;
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(SocketAddr::from(([0, 0, 0, 0], 9000)))
    }
}
