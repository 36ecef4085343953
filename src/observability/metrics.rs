//! Pipeline metrics tracking.
//!
//! Counters for loads, merges and recomputes, shared cheaply between the
//! service and its worker tasks.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Metrics tracker for the contact list pipeline.
#[derive(Debug, Clone)]
pub struct MetricsTracker {
    loads_total: Arc<AtomicU64>,
    load_failures_total: Arc<AtomicU64>,
    records_loaded_total: Arc<AtomicU64>,
    merged_contacts: Arc<AtomicU64>,
    recomputes_total: Arc<AtomicU64>,
    superseded_total: Arc<AtomicU64>,
    rejected_requests_total: Arc<AtomicU64>,
}

impl MetricsTracker {
    /// Create a new metrics tracker.
    pub fn new() -> Self {
        Self {
            loads_total: Arc::new(AtomicU64::new(0)),
            load_failures_total: Arc::new(AtomicU64::new(0)),
            records_loaded_total: Arc::new(AtomicU64::new(0)),
            merged_contacts: Arc::new(AtomicU64::new(0)),
            recomputes_total: Arc::new(AtomicU64::new(0)),
            superseded_total: Arc::new(AtomicU64::new(0)),
            rejected_requests_total: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Track a completed load and merge.
    pub fn track_load(&self, duration_ms: u128, records: usize, merged: usize) {
        self.loads_total.fetch_add(1, Ordering::Relaxed);
        self.records_loaded_total
            .fetch_add(records as u64, Ordering::Relaxed);
        self.merged_contacts.store(merged as u64, Ordering::Relaxed);

        tracing::info!(
            duration_ms = duration_ms,
            records = records,
            merged = merged,
            "Contacts loaded and merged"
        );
    }

    /// Track a failed load.
    pub fn track_load_failure(&self, reason: &str) {
        self.load_failures_total.fetch_add(1, Ordering::Relaxed);
        tracing::warn!(reason = %reason, "Contact load failed");
    }

    /// Track a published recompute.
    pub fn track_recompute(&self, duration_ms: u128, result_count: usize) {
        self.recomputes_total.fetch_add(1, Ordering::Relaxed);

        tracing::debug!(
            duration_ms = duration_ms,
            result_count = result_count,
            "Recompute published"
        );
    }

    /// Track a recompute result discarded because a newer request exists.
    pub fn track_superseded(&self, generation: u64) {
        self.superseded_total.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(generation = generation, "Stale recompute discarded");
    }

    /// Track a state update rejected as invalid.
    pub fn track_rejected_request(&self, kind: &str) {
        self.rejected_requests_total.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(kind = %kind, "Request rejected");
    }

    pub fn loads_total(&self) -> u64 {
        self.loads_total.load(Ordering::Relaxed)
    }

    pub fn load_failures_total(&self) -> u64 {
        self.load_failures_total.load(Ordering::Relaxed)
    }

    pub fn records_loaded_total(&self) -> u64 {
        self.records_loaded_total.load(Ordering::Relaxed)
    }

    /// Size of the merged set from the latest load.
    pub fn merged_contacts(&self) -> u64 {
        self.merged_contacts.load(Ordering::Relaxed)
    }

    pub fn recomputes_total(&self) -> u64 {
        self.recomputes_total.load(Ordering::Relaxed)
    }

    pub fn superseded_total(&self) -> u64 {
        self.superseded_total.load(Ordering::Relaxed)
    }

    pub fn rejected_requests_total(&self) -> u64 {
        self.rejected_requests_total.load(Ordering::Relaxed)
    }

    /// Print a summary of all metrics.
    pub fn summary(&self) -> String {
        format!(
            "Metrics Summary:\n\
             Loads: {} ({} failed)\n\
             Records Loaded: {}\n\
             Merged Contacts: {}\n\
             Recomputes Published: {}\n\
             Recomputes Superseded: {}\n\
             Rejected Requests: {}",
            self.loads_total(),
            self.load_failures_total(),
            self.records_loaded_total(),
            self.merged_contacts(),
            self.recomputes_total(),
            self.superseded_total(),
            self.rejected_requests_total(),
        )
    }
}

impl Default for MetricsTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// A timer for tracking operation duration.
pub struct Timer {
    start: Instant,
    operation: String,
}

impl Timer {
    /// Start a new timer for the given operation.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            operation: operation.into(),
        }
    }

    /// Finish the timer and return the elapsed time in milliseconds.
    pub fn finish(self) -> u128 {
        let duration_ms = self.start.elapsed().as_millis();

        tracing::trace!(
            operation = %self.operation,
            duration_ms = duration_ms,
            "Operation completed"
        );

        duration_ms
    }

    /// Finish the timer with a specific status.
    pub fn finish_with_status(self, success: bool) -> u128 {
        let duration_ms = self.start.elapsed().as_millis();

        if success {
            tracing::debug!(
                operation = %self.operation,
                duration_ms = duration_ms,
                "Operation succeeded"
            );
        } else {
            tracing::warn!(
                operation = %self.operation,
                duration_ms = duration_ms,
                "Operation failed"
            );
        }

        duration_ms
    }
}
