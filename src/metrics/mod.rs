//! Metrics collection module
//!
//! Tracks gateway request counts, failure rates and latencies per operation.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{RwLock, RwLockWriteGuard};

/// Number of latencies kept per operation for the rolling average
const LATENCY_WINDOW: usize = 100;

/// Process-wide request metrics
pub struct Metrics {
    started_at: DateTime<Utc>,
    /// Total gateway requests
    total_requests: AtomicU64,
    operations: RwLock<HashMap<String, OperationCounters>>,
}

#[derive(Default)]
struct OperationCounters {
    successes: u64,
    failures: u64,
    response_times: VecDeque<u64>,
}

impl Metrics {
    /// Create a new metrics instance
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            total_requests: AtomicU64::new(0),
            operations: RwLock::new(HashMap::new()),
        }
    }

    /// Record a finished operation with its latency
    pub fn record(&self, operation: &str, success: bool, time_ms: u64) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);

        let mut operations = self.write();
        let entry = operations.entry(operation.to_string()).or_default();
        if success {
            entry.successes += 1;
        } else {
            entry.failures += 1;
        }

        if entry.response_times.len() >= LATENCY_WINDOW {
            entry.response_times.pop_front();
        }
        entry.response_times.push_back(time_ms);
    }

    /// Get total requests
    pub fn total_requests(&self) -> u64 {
        self.total_requests.load(Ordering::Relaxed)
    }

    /// Point-in-time copy of all counters
    pub fn snapshot(&self) -> MetricsSnapshot {
        let operations = self
            .operations
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let stats = operations
            .iter()
            .map(|(name, counters)| {
                let total = counters.successes + counters.failures;
                let avg_response_time = if counters.response_times.is_empty() {
                    None
                } else {
                    Some(
                        counters.response_times.iter().sum::<u64>()
                            / counters.response_times.len() as u64,
                    )
                };
                let reliability = if total == 0 {
                    100.0
                } else {
                    (counters.successes as f64 / total as f64) * 100.0
                };

                (
                    name.clone(),
                    OperationStats {
                        requests: total,
                        failures: counters.failures,
                        avg_response_time,
                        reliability,
                    },
                )
            })
            .collect();

        MetricsSnapshot {
            started_at: self.started_at,
            total_requests: self.total_requests(),
            operations: stats,
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, OperationCounters>> {
        self.operations
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializable view served at /stats
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub started_at: DateTime<Utc>,
    pub total_requests: u64,
    pub operations: BTreeMap<String, OperationStats>,
}

/// Statistics for a single gateway operation
#[derive(Debug, Clone, Serialize)]
pub struct OperationStats {
    pub requests: u64,
    pub failures: u64,
    /// Rolling average in ms
    pub avg_response_time: Option<u64>,
    pub reliability: f64,
}
