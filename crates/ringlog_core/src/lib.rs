//! # Ringlog Core
//!
//! Bounded, append-only store of newline-delimited records.
//!
//! This crate provides:
//! - [`RecordStore`] - fixed-capacity ring of complete records with
//!   oldest-first eviction and byte-offset resolution
//! - [`WriteAccumulator`] - per-session scratch buffer that seals a
//!   [`Record`] whenever a newline is observed
//! - [`LogGateway`] - the single mutual-exclusion domain through which all
//!   store reads and mutations pass
//! - [`Session`] / [`Cursor`] - writer and reader handles bound to one
//!   gateway
//!
//! Transports (a TCP server lives in `ringlog_server`) deliver byte chunks
//! into sessions and stream store content back out; the core never
//! initiates I/O itself.
//!
//! ## Example
//!
//! ```rust
//! use ringlog_core::LogGateway;
//!
//! let gateway = LogGateway::new(4);
//! let mut session = gateway.open_session();
//! session.write(b"hello\n").unwrap();
//! assert_eq!(gateway.snapshot().unwrap(), b"hello\n");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod accumulator;
mod error;
mod gateway;
mod record;
mod session;
mod store;

pub use accumulator::WriteAccumulator;
pub use error::{CoreError, CoreResult};
pub use gateway::LogGateway;
pub use record::Record;
pub use session::{Cursor, Session};
pub use store::{RecordStore, DEFAULT_CAPACITY};

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
