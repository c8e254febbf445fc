//! Lookup statistics tracking.
//!
//! Failed lookups are dropped silently by the workers; these counters are the
//! only trace they leave.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::LookupErrorKind;

/// Thread-safe lookup statistics tracker.
///
/// Tracks dispatched work items, successful resolutions and failures per
/// [`LookupErrorKind`] using atomic counters, so it can be shared across all
/// workers behind an `Arc`. All counters start at zero.
pub struct LookupStats {
    dispatched: AtomicUsize,
    resolved: AtomicUsize,
    errors: HashMap<LookupErrorKind, AtomicUsize>,
}

impl LookupStats {
    /// Creates a tracker with every counter at zero.
    pub fn new() -> Self {
        let mut errors = HashMap::new();
        for kind in LookupErrorKind::iter() {
            errors.insert(kind, AtomicUsize::new(0));
        }

        LookupStats {
            dispatched: AtomicUsize::new(0),
            resolved: AtomicUsize::new(0),
            errors,
        }
    }

    /// Counts one work item handed to the queue.
    pub fn record_dispatched(&self) {
        self.dispatched.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts one lookup that produced a CNAME.
    pub fn record_resolved(&self) {
        self.resolved.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts one failed lookup.
    pub fn record_failure(&self, kind: LookupErrorKind) {
        if let Some(counter) = self.errors.get(&kind) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment lookup error counter for {:?} which is not in the map. \
                 This indicates a bug in LookupStats initialization.",
                kind
            );
        }
    }

    /// Work items dispatched so far.
    pub fn dispatched(&self) -> usize {
        self.dispatched.load(Ordering::SeqCst)
    }

    /// Successful lookups so far.
    pub fn resolved(&self) -> usize {
        self.resolved.load(Ordering::SeqCst)
    }

    /// Get the count for a failure kind.
    pub fn failure_count(&self, kind: LookupErrorKind) -> usize {
        self.errors
            .get(&kind)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Total failed lookups across all kinds.
    pub fn total_failures(&self) -> usize {
        self.errors.values().map(|c| c.load(Ordering::SeqCst)).sum()
    }

    /// Lookups finished so far, successful or not.
    pub fn completed(&self) -> usize {
        self.resolved() + self.total_failures()
    }
}

impl Default for LookupStats {
    fn default() -> Self {
        Self::new()
    }
}
