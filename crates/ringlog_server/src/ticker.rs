//! Periodic timestamp producer.

use chrono::{DateTime, Local};
use ringlog_core::{CoreError, LogGateway};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

/// Formats one timestamp record.
///
/// Matches the conventional `timestamp:<day>, <date> <time> <zone>` line,
/// newline-terminated like every other record.
pub(crate) fn format_timestamp_line(now: DateTime<Local>) -> String {
    format!("timestamp:{}\n", now.format("%a, %d %b %Y %H:%M:%S %z"))
}

/// Writes a timestamp record every `interval` until shutdown.
///
/// The producer is an ordinary session: its line goes through the same
/// accumulate/seal/commit path and takes the same lock as any client
/// write.
pub(crate) async fn run(gateway: LogGateway, interval: Duration, running: Arc<AtomicBool>) {
    let mut session = gateway.open_session();
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // interval() fires immediately; the first record should land one full
    // interval after startup.
    ticker.tick().await;

    loop {
        ticker.tick().await;
        if !running.load(Ordering::Acquire) {
            return;
        }

        let line = format_timestamp_line(Local::now());
        match session.write(line.as_bytes()) {
            Ok(_) => debug!("timestamp record written"),
            Err(CoreError::Closed | CoreError::Interrupted) => return,
            Err(e) => warn!(error = %e, "timestamp write failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamp_line_shape() {
        let moment = Local.with_ymd_and_hms(2024, 2, 29, 13, 5, 59).unwrap();
        let line = format_timestamp_line(moment);

        assert!(line.starts_with("timestamp:Thu, 29 Feb 2024 13:05:59"));
        assert!(line.ends_with('\n'));
        // Exactly one record per tick.
        assert_eq!(line.bytes().filter(|&b| b == b'\n').count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn ticker_writes_through_the_common_path() {
        let gateway = LogGateway::new(4);
        let running = Arc::new(AtomicBool::new(true));

        let task = tokio::spawn(run(
            gateway.clone(),
            Duration::from_secs(10),
            Arc::clone(&running),
        ));

        // Paused time: advance past two intervals.
        tokio::time::sleep(Duration::from_secs(25)).await;
        assert_eq!(gateway.record_count().unwrap(), 2);

        let snapshot = gateway.snapshot().unwrap();
        assert!(snapshot.starts_with(b"timestamp:"));

        running.store(false, Ordering::Release);
        gateway.teardown();
        tokio::time::sleep(Duration::from_secs(11)).await;
        task.await.unwrap();
    }
}
