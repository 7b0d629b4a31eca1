//! # Ringlog Server
//!
//! TCP transport for the ringlog record store.
//!
//! This crate provides:
//! - A listener accepting many concurrent client connections, one task per
//!   connection
//! - Per-connection sessions: inbound bytes accumulate until a newline
//!   seals a record into the shared store
//! - Replay: whenever a client's chunk completes at least one record, the
//!   entire current store content is streamed back to that client
//! - An optional periodic producer writing a timestamp line through the
//!   same path as client writes
//! - Graceful shutdown: stop accepting, tear down the store, join every
//!   session within a grace period
//!
//! # Protocol
//!
//! Raw bytes; newline (`0x0A`) is the sole record delimiter and is
//! included as the last byte of each sealed record. There is no framing,
//! handshake, or authentication.
//!
//! # Example
//!
//! ```rust,ignore
//! use ringlog_server::{LogServer, ServerConfig};
//!
//! let server = LogServer::new(ServerConfig::default());
//! server.run().await?;
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod config;
mod connection;
mod error;
mod server;
mod ticker;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::LogServer;
