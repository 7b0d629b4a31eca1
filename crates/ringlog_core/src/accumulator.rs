//! Per-session write accumulation.

use crate::error::{CoreError, CoreResult};
use crate::record::Record;
use bytes::Bytes;

/// Scratch buffer that collects incoming bytes until a newline seals them
/// into a [`Record`].
///
/// Each accumulator is exclusively owned by one session (one device handle
/// or one accepted connection) and is touched only by that session's
/// execution context, so it needs no locking; only the hand-off of sealed
/// records into the shared store does.
///
/// Dropping an accumulator discards any unsealed pending bytes; partial
/// content never becomes a record.
///
/// # Example
///
/// ```rust
/// use ringlog_core::WriteAccumulator;
///
/// let mut acc = WriteAccumulator::new();
/// acc.append(b"AB\nCD").unwrap();
///
/// let sealed = acc.take_if_terminated().unwrap();
/// assert_eq!(sealed.as_bytes(), b"AB\n");
/// assert_eq!(acc.pending_len(), 2); // "CD" waits for the next newline
/// ```
#[derive(Debug, Default)]
pub struct WriteAccumulator {
    pending: Vec<u8>,
}

impl WriteAccumulator {
    /// Creates an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a chunk of incoming bytes to the pending buffer.
    ///
    /// Grows the buffer by exactly `chunk.len()` bytes. If the growth
    /// cannot be satisfied the accumulator is left in its prior state and
    /// [`CoreError::OutOfMemory`] is returned; nothing is partially
    /// appended.
    pub fn append(&mut self, chunk: &[u8]) -> CoreResult<()> {
        self.pending
            .try_reserve(chunk.len())
            .map_err(|_| CoreError::OutOfMemory {
                requested: chunk.len(),
            })?;
        self.pending.extend_from_slice(chunk);
        Ok(())
    }

    /// Seals and returns a record if the pending buffer contains a newline.
    ///
    /// Exactly the bytes up to and including the first newline become the
    /// sealed record; bytes after it stay pending and start the next
    /// accumulation cycle. Returns `None` when no newline has been seen
    /// yet, leaving the buffer intact for further [`append`](Self::append)
    /// calls.
    pub fn take_if_terminated(&mut self) -> Option<Record> {
        let newline = self.pending.iter().position(|&b| b == b'\n')?;
        let trailing = self.pending.split_off(newline + 1);
        let sealed = std::mem::replace(&mut self.pending, trailing);
        Some(Record::new(Bytes::from(sealed)))
    }

    /// Number of unsealed bytes currently pending.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Returns `true` if unsealed bytes are pending.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Discards all pending bytes without sealing them.
    pub fn discard(&mut self) {
        self.pending = Vec::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_record_without_newline() {
        let mut acc = WriteAccumulator::new();
        acc.append(b"partial").unwrap();
        assert!(acc.take_if_terminated().is_none());
        assert_eq!(acc.pending_len(), 7);
    }

    #[test]
    fn seals_on_newline() {
        let mut acc = WriteAccumulator::new();
        acc.append(b"hello\n").unwrap();
        let record = acc.take_if_terminated().unwrap();
        assert_eq!(record.as_bytes(), b"hello\n");
        assert!(!acc.has_pending());
    }

    #[test]
    fn chunked_appends_build_one_record() {
        let mut acc = WriteAccumulator::new();
        acc.append(b"he").unwrap();
        acc.append(b"ll").unwrap();
        assert!(acc.take_if_terminated().is_none());
        acc.append(b"o\n").unwrap();

        let record = acc.take_if_terminated().unwrap();
        assert_eq!(record.as_bytes(), b"hello\n");
    }

    #[test]
    fn trailing_bytes_start_the_next_record() {
        let mut acc = WriteAccumulator::new();
        acc.append(b"AB\nCD").unwrap();

        let sealed = acc.take_if_terminated().unwrap();
        assert_eq!(sealed.as_bytes(), b"AB\n");
        assert_eq!(acc.pending_len(), 2);

        acc.append(b"\n").unwrap();
        let next = acc.take_if_terminated().unwrap();
        assert_eq!(next.as_bytes(), b"CD\n");
    }

    #[test]
    fn multiple_records_in_one_chunk() {
        let mut acc = WriteAccumulator::new();
        acc.append(b"a\nb\nc").unwrap();

        assert_eq!(acc.take_if_terminated().unwrap().as_bytes(), b"a\n");
        assert_eq!(acc.take_if_terminated().unwrap().as_bytes(), b"b\n");
        assert!(acc.take_if_terminated().is_none());
        assert_eq!(acc.pending_len(), 1);
    }

    #[test]
    fn bare_newline_seals_an_empty_line() {
        let mut acc = WriteAccumulator::new();
        acc.append(b"\n").unwrap();
        let record = acc.take_if_terminated().unwrap();
        assert_eq!(record.as_bytes(), b"\n");
    }

    #[test]
    fn discard_drops_pending_bytes() {
        let mut acc = WriteAccumulator::new();
        acc.append(b"half a line").unwrap();
        acc.discard();
        assert!(!acc.has_pending());
        assert!(acc.take_if_terminated().is_none());
    }
}
