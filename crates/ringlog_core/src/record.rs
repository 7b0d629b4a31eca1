//! Sealed log records.

use bytes::Bytes;

/// One newline-terminated byte sequence held by the store.
///
/// A record is immutable once sealed: the accumulator that produced it
/// gives up ownership at hand-off and the payload is never modified
/// afterwards. The final byte of a sealed record is the `0x0A` delimiter
/// that completed it.
///
/// Records are backed by [`Bytes`], so cloning one shares the underlying
/// storage instead of copying the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    data: Bytes,
}

impl Record {
    /// Creates a record from already-sealed bytes.
    ///
    /// Callers are expected to pass a newline-terminated sequence; the
    /// accumulator is the normal production path and guarantees this.
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self { data: data.into() }
    }

    /// Length of the record in bytes, including the trailing newline.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the record holds no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The record payload, trailing newline included.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the record, returning its backing bytes.
    #[must_use]
    pub fn into_bytes(self) -> Bytes {
        self.data
    }
}

impl AsRef<[u8]> for Record {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}
