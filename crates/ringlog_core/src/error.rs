//! Error types for the core store.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in core store operations.
///
/// Offsets past the end of the current content are not errors; those are
/// reported as `None` by the resolver and read paths.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Growing an accumulator or record buffer failed.
    ///
    /// The operation aborts with no partial state committed; the caller's
    /// accumulator is left exactly as it was before the call.
    #[error("out of memory: could not reserve {requested} additional bytes")]
    OutOfMemory {
        /// Number of additional bytes that could not be reserved.
        requested: usize,
    },

    /// A wait for the store lock was abandoned because the gateway began
    /// shutting down. Retryable; no partial record was made visible.
    #[error("operation interrupted by gateway shutdown")]
    Interrupted,

    /// The gateway has been torn down and no longer accepts operations.
    #[error("log gateway is closed")]
    Closed,
}
