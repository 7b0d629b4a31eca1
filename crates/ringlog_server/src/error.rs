//! Error types for the server.

use ringlog_core::CoreError;
use std::io;
use thiserror::Error;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

/// Errors that can occur while serving connections.
///
/// Every error is local to the session that triggered it; no error in one
/// session affects another session's view of the store.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Socket I/O failed (bind, accept, or receive).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The core store rejected an operation.
    #[error("store error: {0}")]
    Core(#[from] CoreError),

    /// Streaming replay output to a peer failed. The store is unaffected;
    /// only the session being replied to is torn down.
    #[error("failed to deliver output to peer: {0}")]
    Sink(#[source] io::Error),
}
