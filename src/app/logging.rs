//! Progress logging utilities.

use std::time::{Duration, Instant};

use log::info;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::error_handling::LookupStats;

/// Logs progress information about domain resolution.
///
/// # Arguments
///
/// * `start_time` - The start time of processing
/// * `stats` - Shared lookup counters
pub fn log_progress(start_time: Instant, stats: &LookupStats) {
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    let completed = stats.completed();
    let rate = if elapsed_secs > 0.0 {
        completed as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Processed {} of {} domains ({} resolved) in {:.2} seconds (~{:.2} domains/sec)",
        completed,
        stats.dispatched(),
        stats.resolved(),
        elapsed_secs,
        rate
    );
}

/// Spawns a task that logs progress every `interval` until `cancel` fires.
pub fn spawn_progress_logger(
    start_time: Instant,
    stats: Arc<LookupStats>,
    interval: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The first tick completes immediately
        ticker.tick().await;
        loop {
            tokio::select! {
                _ = ticker.tick() => log_progress(start_time, &stats),
                _ = cancel.cancelled() => break,
            }
        }
    })
}
