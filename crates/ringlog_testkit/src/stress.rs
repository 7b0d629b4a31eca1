//! Stress helpers for concurrent writer load.
//!
//! These drive a shared gateway from many OS threads and verify that the
//! store's invariants hold afterwards.

use ringlog_core::LogGateway;
use std::thread;
use std::time::{Duration, Instant};

/// Configuration for stress runs.
#[derive(Debug, Clone)]
pub struct StressConfig {
    /// Number of concurrent writer threads.
    pub writers: usize,
    /// Records each writer seals.
    pub records_per_writer: usize,
    /// Payload bytes per record, excluding the newline.
    pub record_len: usize,
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            writers: 4,
            records_per_writer: 250,
            record_len: 64,
        }
    }
}

/// Result of a stress run.
#[derive(Debug, Clone)]
pub struct StressResult {
    /// Total records sealed across all writers.
    pub sealed_records: usize,
    /// Write calls that returned an error.
    pub failed_writes: usize,
    /// Wall-clock duration of the run.
    pub duration: Duration,
}

impl StressResult {
    /// Records sealed per second.
    #[must_use]
    pub fn records_per_second(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.sealed_records as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Runs `config.writers` threads, each sealing records through its own
/// session, and returns aggregate counts.
///
/// Each writer fills its records with a byte unique to that writer, so
/// [`verify_store`] can detect interleaving afterwards.
pub fn concurrent_writers(gateway: &LogGateway, config: &StressConfig) -> StressResult {
    let start = Instant::now();

    let handles: Vec<_> = (0..config.writers)
        .map(|writer| {
            let gateway = gateway.clone();
            let config = config.clone();
            thread::spawn(move || {
                let mut session = gateway.open_session();
                let fill = b'a' + (writer % 26) as u8;
                let mut line = vec![fill; config.record_len];
                line.push(b'\n');

                let mut sealed = 0usize;
                let mut failed = 0usize;
                for _ in 0..config.records_per_writer {
                    // Split each record across two writes to exercise the
                    // accumulator under contention.
                    let mid = line.len() / 2;
                    match session
                        .write(&line[..mid])
                        .and_then(|_| session.write(&line[mid..]))
                    {
                        Ok(n) => sealed += n,
                        Err(_) => failed += 1,
                    }
                }
                (sealed, failed)
            })
        })
        .collect();

    let mut sealed_records = 0;
    let mut failed_writes = 0;
    for handle in handles {
        if let Ok((sealed, failed)) = handle.join() {
            sealed_records += sealed;
            failed_writes += failed;
        } else {
            failed_writes += 1;
        }
    }

    StressResult {
        sealed_records,
        failed_writes,
        duration: start.elapsed(),
    }
}

/// Checks the store invariants a stress run must preserve.
///
/// - at most `capacity` records are held
/// - every record is newline-terminated with the delimiter only at the end
/// - no record mixes fill bytes from different writers
pub fn verify_store(gateway: &LogGateway) -> Result<(), String> {
    let snapshot = gateway
        .snapshot()
        .map_err(|e| format!("snapshot failed: {e}"))?;
    let count = gateway
        .record_count()
        .map_err(|e| format!("record_count failed: {e}"))?;

    let records: Vec<&[u8]> = snapshot.split_inclusive(|&b| b == b'\n').collect();
    if records.len() != count {
        return Err(format!(
            "snapshot holds {} records but store reports {count}",
            records.len()
        ));
    }

    for record in records {
        let Some((&last, body)) = record.split_last() else {
            return Err("empty record in snapshot".into());
        };
        if last != b'\n' {
            return Err(format!("record not newline-terminated: {record:?}"));
        }
        if body.iter().any(|&b| b == b'\n') {
            return Err(format!("embedded newline in record: {record:?}"));
        }
        if let Some(&first) = body.first() {
            if body.iter().any(|&b| b != first) {
                return Err(format!("record mixes writer bytes: {record:?}"));
            }
        }
    }

    Ok(())
}
