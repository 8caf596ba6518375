//! Per-session search metrics.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;

/// Counters for searches issued by one filter store.
///
/// Shared behind an `Arc`; every method takes `&self`.
#[derive(Debug, Default)]
pub struct SearchMetrics {
    dispatched: AtomicU64,
    applied: AtomicU64,
    superseded: AtomicU64,
    failed: AtomicU64,
    last_latency_us: AtomicU64,
}

/// A point-in-time copy of [`SearchMetrics`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MetricsSnapshot {
    /// Searches sent to the gateway.
    pub dispatched: u64,
    /// Responses that became the visible result.
    pub applied: u64,
    /// Responses discarded because a newer search had been dispatched.
    pub superseded: u64,
    /// Latest searches that failed.
    pub failed: u64,
    /// Latency of the last applied response (microseconds).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_latency_us: Option<u64>,
}

impl SearchMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a search leaving for the gateway.
    pub fn record_dispatched(&self) {
        self.dispatched.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a response that was applied to the state.
    pub fn record_applied(&self, latency: Duration) {
        self.applied.fetch_add(1, Ordering::Relaxed);
        // Zero is reserved for "nothing recorded yet".
        let us = (latency.as_micros() as u64).max(1);
        self.last_latency_us.store(us, Ordering::Relaxed);
    }

    /// Record a stale response that was discarded.
    pub fn record_superseded(&self) {
        self.superseded.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failure of the latest search.
    pub fn record_failed(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let last = self.last_latency_us.load(Ordering::Relaxed);
        MetricsSnapshot {
            dispatched: self.dispatched.load(Ordering::Relaxed),
            applied: self.applied.load(Ordering::Relaxed),
            superseded: self.superseded.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            last_latency_us: (last != 0).then_some(last),
        }
    }
}

impl MetricsSnapshot {
    /// Searches still waiting for a response.
    pub fn in_flight(&self) -> u64 {
        self.dispatched
            .saturating_sub(self.applied + self.superseded + self.failed)
    }

    /// Format as JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Format as human-readable summary.
    pub fn to_summary(&self) -> String {
        let mut lines = vec![format!(
            "Searches: {} dispatched, {} applied, {} superseded, {} failed",
            self.dispatched, self.applied, self.superseded, self.failed
        )];
        if let Some(us) = self.last_latency_us {
            lines.push(format!(
                "  Last latency: {}us ({:.2}ms)",
                us,
                us as f64 / 1000.0
            ));
        }
        lines.join("\n")
    }
}
