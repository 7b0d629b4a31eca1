//! Writer sessions and reader cursors.

use crate::accumulator::WriteAccumulator;
use crate::error::CoreResult;
use crate::gateway::LogGateway;

/// One independent writer context: a private accumulator bound to a shared
/// gateway.
///
/// A transport opens one session per device handle or accepted connection.
/// Bytes written through the session accumulate privately (no locking)
/// until a newline seals them; sealed records are committed to the store
/// under the gateway lock. Dropping the session discards any unsealed
/// pending bytes, so a torn-down connection never leaves a partial record
/// visible to other sessions.
pub struct Session {
    gateway: LogGateway,
    accumulator: WriteAccumulator,
}

impl Session {
    pub(crate) fn new(gateway: LogGateway) -> Self {
        Self {
            gateway,
            accumulator: WriteAccumulator::new(),
        }
    }

    /// Delivers a chunk of producer bytes.
    ///
    /// Appends the chunk to the session's accumulator, then seals and
    /// commits every record the chunk completed. A chunk may complete zero
    /// records (no newline yet), one, or several; bytes after the last
    /// newline stay pending for the next call. Returns the number of
    /// records sealed by this chunk.
    pub fn write(&mut self, chunk: &[u8]) -> CoreResult<usize> {
        self.accumulator.append(chunk)?;

        let mut sealed = 0;
        while let Some(record) = self.accumulator.take_if_terminated() {
            self.gateway.commit(record)?;
            sealed += 1;
        }
        Ok(sealed)
    }

    /// Number of unsealed bytes waiting for a newline.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.accumulator.pending_len()
    }

    /// The gateway this session writes into.
    #[must_use]
    pub fn gateway(&self) -> &LogGateway {
        &self.gateway
    }
}

/// A caller-owned running byte offset into the logical concatenation.
///
/// The store does not track reader positions; each device-style reader
/// supplies its own cursor, mirroring a file position. Reads return bytes
/// from one record at a time and advance the cursor by the amount
/// returned.
///
/// Note that eviction shifts logical offsets: content a cursor has not
/// reached yet can disappear when the oldest record is evicted, in which
/// case the cursor simply continues at whatever now occupies that offset.
#[derive(Debug, Default, Clone, Copy)]
pub struct Cursor {
    offset: u64,
}

impl Cursor {
    /// Creates a cursor at offset zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current byte offset.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Moves the cursor to an absolute offset.
    pub fn seek(&mut self, offset: u64) {
        self.offset = offset;
    }

    /// Moves the cursor back to the start of the concatenation.
    pub fn rewind(&mut self) {
        self.offset = 0;
    }

    /// Reads up to `max_len` bytes at the cursor and advances it.
    ///
    /// `Ok(None)` means the cursor is at or past the end of the current
    /// content; more data may appear later.
    pub fn read(&mut self, gateway: &LogGateway, max_len: usize) -> CoreResult<Option<Vec<u8>>> {
        let chunk = gateway.read_at(self.offset, max_len)?;
        if let Some(bytes) = &chunk {
            self.offset += bytes.len() as u64;
        }
        Ok(chunk)
    }
}
