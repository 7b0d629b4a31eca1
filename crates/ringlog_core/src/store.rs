//! Fixed-capacity ring of complete records.

use crate::record::Record;

/// Default number of record slots in a store.
pub const DEFAULT_CAPACITY: usize = 10;

/// A fixed-capacity ring holding the N most recently completed records.
///
/// Slots are ordered: `read_pos` names the oldest live record, `write_pos`
/// the slot the next insertion lands in. Once the write cursor completes a
/// full lap the store is full and every insertion evicts the oldest record
/// first. Insertion order is preserved in ring order.
///
/// The store performs no locking; callers serialize access through
/// [`LogGateway`](crate::LogGateway).
///
/// # Example
///
/// ```rust
/// use ringlog_core::{Record, RecordStore};
///
/// let mut store = RecordStore::new(2);
/// store.add(Record::new(&b"hello\n"[..]));
/// store.add(Record::new(&b"world\n"[..]));
///
/// let (record, intra) = store.find_by_offset(6).unwrap();
/// assert_eq!(record.as_bytes(), b"world\n");
/// assert_eq!(intra, 0);
/// ```
#[derive(Debug)]
pub struct RecordStore {
    slots: Vec<Option<Record>>,
    write_pos: usize,
    read_pos: usize,
    full: bool,
}

impl RecordStore {
    /// Creates an empty store with `capacity` record slots.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "record store capacity must be non-zero");
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self {
            slots,
            write_pos: 0,
            read_pos: 0,
            full: false,
        }
    }

    /// Number of record slots.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Inserts a completed record, returning the evicted record if the
    /// store was already full.
    ///
    /// The slot about to be overwritten is vacated before the new record is
    /// assigned, so at most `capacity` records are ever live. The write
    /// cursor advances modulo capacity; when the store was already full the
    /// read cursor advances with it so it keeps naming the oldest record.
    /// The store becomes full the first time the write cursor wraps back to
    /// slot zero.
    pub fn add(&mut self, record: Record) -> Option<Record> {
        let evicted = self.slots[self.write_pos].replace(record);

        self.write_pos = (self.write_pos + 1) % self.capacity();
        if self.full {
            self.read_pos = (self.read_pos + 1) % self.capacity();
        }
        if self.write_pos == 0 {
            self.full = true;
        }

        evicted
    }

    /// Resolves a byte offset into the logical concatenation of all held
    /// records, oldest first.
    ///
    /// Returns the record whose span contains `offset` along with the
    /// intra-record byte offset, or `None` when `offset` is at or past the
    /// end of the current content (a normal end-of-data signal, not an
    /// error).
    ///
    /// Pure over the current state; callers hold the gateway lock so the
    /// store cannot be mutated mid-scan.
    #[must_use]
    pub fn find_by_offset(&self, offset: u64) -> Option<(&Record, usize)> {
        let mut running_total: u64 = 0;
        let mut pos = self.read_pos;

        loop {
            // Caught up with the write cursor before wrapping: every live
            // slot has been visited.
            if !self.full && pos == self.write_pos {
                return None;
            }

            if let Some(record) = &self.slots[pos] {
                let len = record.len() as u64;
                if offset < running_total + len {
                    return Some((record, (offset - running_total) as usize));
                }
                running_total += len;
            }

            pos = (pos + 1) % self.capacity();

            // Completed a full lap of a full store.
            if self.full && pos == self.read_pos {
                return None;
            }
        }
    }

    /// Number of live records.
    #[must_use]
    pub fn record_count(&self) -> usize {
        if self.full {
            self.capacity()
        } else {
            (self.write_pos + self.capacity() - self.read_pos) % self.capacity()
        }
    }

    /// Total bytes across all live records.
    #[must_use]
    pub fn total_len(&self) -> u64 {
        self.iter().map(|r| r.len() as u64).sum()
    }

    /// Returns `true` if no records are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.full && self.write_pos == self.read_pos
    }

    /// Returns `true` if the next insertion will evict the oldest record.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.full
    }

    /// Iterates live records oldest-first.
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        let capacity = self.capacity();
        (0..self.record_count())
            .filter_map(move |i| self.slots[(self.read_pos + i) % capacity].as_ref())
    }

    /// The logical concatenation of all live records, oldest first.
    #[must_use]
    pub fn concat(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.total_len() as usize);
        for record in self.iter() {
            out.extend_from_slice(record.as_bytes());
        }
        out
    }

    /// Releases every held record and restores the empty state.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
        self.write_pos = 0;
        self.read_pos = 0;
        self.full = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(s: &str) -> Record {
        Record::new(s.as_bytes().to_vec())
    }

    #[test]
    fn new_store_is_empty() {
        let store = RecordStore::new(4);
        assert!(store.is_empty());
        assert!(!store.is_full());
        assert_eq!(store.record_count(), 0);
        assert_eq!(store.total_len(), 0);
        assert!(store.find_by_offset(0).is_none());
    }

    #[test]
    #[should_panic(expected = "capacity must be non-zero")]
    fn zero_capacity_rejected() {
        let _ = RecordStore::new(0);
    }

    #[test]
    fn add_below_capacity_evicts_nothing() {
        let mut store = RecordStore::new(3);
        assert!(store.add(record("a\n")).is_none());
        assert!(store.add(record("b\n")).is_none());
        assert_eq!(store.record_count(), 2);
        assert!(!store.is_full());
    }

    #[test]
    fn full_flag_set_on_wrap() {
        let mut store = RecordStore::new(2);
        store.add(record("a\n"));
        assert!(!store.is_full());
        store.add(record("b\n"));
        assert!(store.is_full());
    }

    #[test]
    fn add_when_full_evicts_exactly_the_oldest() {
        let mut store = RecordStore::new(2);
        store.add(record("a\n"));
        store.add(record("b\n"));

        let evicted = store.add(record("c\n")).unwrap();
        assert_eq!(evicted.as_bytes(), b"a\n");
        assert_eq!(store.record_count(), 2);

        let held: Vec<_> = store.iter().map(|r| r.as_bytes().to_vec()).collect();
        assert_eq!(held, vec![b"b\n".to_vec(), b"c\n".to_vec()]);
    }

    #[test]
    fn capacity_invariant_under_many_inserts() {
        let capacity = 5;
        let overfill = 13;
        let mut store = RecordStore::new(capacity);

        for i in 0..overfill {
            store.add(record(&format!("line-{i}\n")));
        }

        assert_eq!(store.record_count(), capacity);
        let held: Vec<_> = store
            .iter()
            .map(|r| String::from_utf8(r.as_bytes().to_vec()).unwrap())
            .collect();
        let expected: Vec<_> = (overfill - capacity..overfill)
            .map(|i| format!("line-{i}\n"))
            .collect();
        assert_eq!(held, expected);
    }

    #[test]
    fn offset_resolution_across_records() {
        let mut store = RecordStore::new(4);
        store.add(record("hello\n"));
        store.add(record("world\n"));

        let (rec, intra) = store.find_by_offset(0).unwrap();
        assert_eq!(rec.as_bytes(), b"hello\n");
        assert_eq!(intra, 0);

        let (rec, intra) = store.find_by_offset(5).unwrap();
        assert_eq!(rec.as_bytes(), b"hello\n");
        assert_eq!(intra, 5);

        let (rec, intra) = store.find_by_offset(6).unwrap();
        assert_eq!(rec.as_bytes(), b"world\n");
        assert_eq!(intra, 0);
        assert_eq!(rec.as_bytes()[intra], b'w');

        let (rec, intra) = store.find_by_offset(11).unwrap();
        assert_eq!(rec.as_bytes(), b"world\n");
        assert_eq!(intra, 5);
    }

    #[test]
    fn offset_at_total_length_is_not_found() {
        let mut store = RecordStore::new(4);
        store.add(record("hello\n"));
        store.add(record("world\n"));

        assert_eq!(store.total_len(), 12);
        assert!(store.find_by_offset(12).is_none());
        assert!(store.find_by_offset(1_000).is_none());
    }

    #[test]
    fn eviction_shifts_logical_offsets() {
        // Capacity 2: inserting foo evicts hello, so offset 0 now lands
        // on world.
        let mut store = RecordStore::new(2);
        store.add(record("hello\n"));
        store.add(record("world\n"));
        store.add(record("foo\n"));

        let (rec, intra) = store.find_by_offset(0).unwrap();
        assert_eq!(rec.as_bytes(), b"world\n");
        assert_eq!(intra, 0);

        let (rec, _) = store.find_by_offset(6).unwrap();
        assert_eq!(rec.as_bytes(), b"foo\n");
        assert_eq!(store.concat(), b"world\nfoo\n");
    }

    #[test]
    fn resolver_terminates_on_wrapped_full_store() {
        let mut store = RecordStore::new(3);
        for s in ["a\n", "b\n", "c\n", "d\n", "e\n"] {
            store.add(record(s));
        }
        // read_pos has wrapped; a full lap must visit each slot once.
        assert_eq!(store.concat(), b"c\nd\ne\n");
        assert!(store.find_by_offset(6).is_none());
        let (rec, _) = store.find_by_offset(4).unwrap();
        assert_eq!(rec.as_bytes(), b"e\n");
    }

    #[test]
    fn concat_matches_byte_at_every_offset() {
        let mut store = RecordStore::new(3);
        for s in ["one\n", "two-two\n", "three\n", "four\n"] {
            store.add(record(s));
        }

        let concat = store.concat();
        for offset in 0..concat.len() as u64 {
            let (rec, intra) = store.find_by_offset(offset).unwrap();
            assert_eq!(rec.as_bytes()[intra], concat[offset as usize]);
        }
    }

    #[test]
    fn clear_releases_everything() {
        let mut store = RecordStore::new(2);
        store.add(record("a\n"));
        store.add(record("b\n"));
        store.add(record("c\n"));

        store.clear();
        assert!(store.is_empty());
        assert!(!store.is_full());
        assert_eq!(store.total_len(), 0);
        assert!(store.find_by_offset(0).is_none());

        // The store is usable again after a reset.
        store.add(record("d\n"));
        assert_eq!(store.concat(), b"d\n");
    }
}
