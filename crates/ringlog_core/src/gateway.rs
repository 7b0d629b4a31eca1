//! The single mutual-exclusion domain over the record store.

use crate::error::{CoreError, CoreResult};
use crate::record::Record;
use crate::session::Session;
use crate::store::RecordStore;
use parking_lot::{Mutex, MutexGuard};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace};

/// How long one bounded lock attempt waits before re-checking for shutdown.
const LOCK_RETRY_INTERVAL: Duration = Duration::from_millis(50);

/// Shared handle through which every store read and mutation passes.
///
/// Exactly one logical store exists per gateway; clones are cheap and all
/// refer to the same store, so a gateway is constructed once at startup and
/// passed to each session (multiple independent gateways can coexist in
/// tests). All `commit` calls are totally ordered by lock acquisition: a
/// reader that takes the lock after a commit sees that record, one that
/// takes it before does not.
///
/// Lock waits are interruptible: a caller blocked on the lock when
/// [`teardown`](Self::teardown) begins gets [`CoreError::Interrupted`], and
/// operations attempted after teardown get [`CoreError::Closed`].
#[derive(Clone)]
pub struct LogGateway {
    shared: Arc<Shared>,
}

struct Shared {
    store: Mutex<RecordStore>,
    open: AtomicBool,
}

impl LogGateway {
    /// Creates a gateway over an empty store with the given slot capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            shared: Arc::new(Shared {
                store: Mutex::new(RecordStore::new(capacity)),
                open: AtomicBool::new(true),
            }),
        }
    }

    /// Opens a writer session holding its own accumulator.
    #[must_use]
    pub fn open_session(&self) -> Session {
        Session::new(self.clone())
    }

    /// Returns `true` until [`teardown`](Self::teardown) runs.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.shared.open.load(Ordering::Acquire)
    }

    /// Acquires the store lock, giving up if the gateway shuts down.
    fn lock(&self) -> CoreResult<MutexGuard<'_, RecordStore>> {
        if !self.is_open() {
            return Err(CoreError::Closed);
        }
        loop {
            if let Some(guard) = self.shared.store.try_lock_for(LOCK_RETRY_INTERVAL) {
                if !self.is_open() {
                    // Teardown won the race while we waited; the store has
                    // been (or is being) cleared. Abandon the operation.
                    return Err(CoreError::Interrupted);
                }
                return Ok(guard);
            }
            if !self.is_open() {
                return Err(CoreError::Interrupted);
            }
        }
    }

    /// Inserts a sealed record, evicting the oldest if the store is full.
    ///
    /// Sealing and insertion are atomic with respect to readers: the record
    /// is either fully visible or not visible at all. The evicted record's
    /// storage is released after the lock is dropped.
    pub fn commit(&self, record: Record) -> CoreResult<()> {
        let evicted = {
            let mut store = self.lock()?;
            store.add(record)
        };
        if let Some(old) = evicted {
            trace!(len = old.len(), "evicted oldest record");
        }
        Ok(())
    }

    /// Reads up to `max_len` bytes starting at `offset` into the logical
    /// concatenation of all held records.
    ///
    /// Copies from the single record the offset resolves into, so a call
    /// may return fewer bytes than `max_len` even when more content exists
    /// at higher offsets; callers advance a [`Cursor`](crate::Cursor) and
    /// call again. `Ok(None)` means no data at that offset yet.
    pub fn read_at(&self, offset: u64, max_len: usize) -> CoreResult<Option<Vec<u8>>> {
        let store = self.lock()?;
        match store.find_by_offset(offset) {
            None => Ok(None),
            Some((record, intra)) => {
                let available = record.len() - intra;
                let n = available.min(max_len);
                Ok(Some(record.as_bytes()[intra..intra + n].to_vec()))
            }
        }
    }

    /// Returns the entire current store content, oldest record first.
    ///
    /// The concatenation is copied out under the lock and the lock released
    /// before the caller does anything with it, so streaming a snapshot to
    /// a slow peer never blocks writers.
    pub fn snapshot(&self) -> CoreResult<Vec<u8>> {
        Ok(self.lock()?.concat())
    }

    /// Total bytes currently held.
    pub fn total_len(&self) -> CoreResult<u64> {
        Ok(self.lock()?.total_len())
    }

    /// Number of records currently held.
    pub fn record_count(&self) -> CoreResult<usize> {
        Ok(self.lock()?.record_count())
    }

    /// Shuts the gateway down: releases every held record and invalidates
    /// future operations.
    ///
    /// Idempotent; the first call performs the teardown and later calls
    /// return immediately. Callers blocked on the lock observe
    /// [`CoreError::Interrupted`].
    pub fn teardown(&self) {
        if !self.shared.open.swap(false, Ordering::AcqRel) {
            return;
        }
        let mut store = self.shared.store.lock();
        let released = store.record_count();
        store.clear();
        debug!(released, "log gateway torn down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_then_snapshot() {
        let gateway = LogGateway::new(4);
        gateway.commit(Record::new(&b"one\n"[..])).unwrap();
        gateway.commit(Record::new(&b"two\n"[..])).unwrap();

        assert_eq!(gateway.snapshot().unwrap(), b"one\ntwo\n");
        assert_eq!(gateway.record_count().unwrap(), 2);
        assert_eq!(gateway.total_len().unwrap(), 8);
    }

    #[test]
    fn read_at_is_bounded_by_one_record() {
        let gateway = LogGateway::new(4);
        gateway.commit(Record::new(&b"hello\n"[..])).unwrap();
        gateway.commit(Record::new(&b"world\n"[..])).unwrap();

        // A large request still stops at the record boundary.
        let chunk = gateway.read_at(0, 1024).unwrap().unwrap();
        assert_eq!(chunk, b"hello\n");

        // Offset into the middle of a record.
        let chunk = gateway.read_at(8, 1024).unwrap().unwrap();
        assert_eq!(chunk, b"rld\n");

        // Short read caps at max_len.
        let chunk = gateway.read_at(0, 2).unwrap().unwrap();
        assert_eq!(chunk, b"he");

        assert!(gateway.read_at(12, 10).unwrap().is_none());
    }

    #[test]
    fn teardown_is_idempotent_and_closes() {
        let gateway = LogGateway::new(2);
        gateway.commit(Record::new(&b"a\n"[..])).unwrap();

        gateway.teardown();
        gateway.teardown();

        assert!(!gateway.is_open());
        assert!(matches!(
            gateway.commit(Record::new(&b"b\n"[..])),
            Err(CoreError::Closed)
        ));
        assert!(matches!(gateway.snapshot(), Err(CoreError::Closed)));
    }

    #[test]
    fn clones_share_one_store() {
        let gateway = LogGateway::new(2);
        let other = gateway.clone();
        gateway.commit(Record::new(&b"shared\n"[..])).unwrap();
        assert_eq!(other.snapshot().unwrap(), b"shared\n");
    }

    #[test]
    fn waiter_interrupted_by_teardown() {
        let gateway = LogGateway::new(2);
        let contended = gateway.clone();

        // Hold the lock from another thread, then tear down while a commit
        // is waiting on it.
        let guard_gateway = gateway.clone();
        let hold = std::thread::spawn(move || {
            let _guard = guard_gateway.shared.store.lock();
            std::thread::sleep(Duration::from_millis(200));
        });

        std::thread::sleep(Duration::from_millis(50));
        gateway.shared.open.store(false, Ordering::Release);

        let result = contended.commit(Record::new(&b"x\n"[..]));
        assert!(matches!(
            result,
            Err(CoreError::Interrupted) | Err(CoreError::Closed)
        ));

        hold.join().unwrap();
    }
}
