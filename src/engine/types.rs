//! Engine types
//!
//! Statistics reported at the end of a driven run.

use crate::stream::StopReason;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Statistics from a sync run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncStats {
    /// Records pulled from the stream
    pub records_yielded: usize,
    /// Records the oracle reported as changed
    pub records_changed: usize,
    /// Records the oracle reported as unchanged
    pub records_unchanged: usize,
    /// Pages requested
    pub pages_fetched: usize,
    /// Pages that failed and contributed nothing
    pub pages_degraded: usize,
    /// Records the plan promised
    pub planned_count: Option<u64>,
    /// Why the stream ended
    pub stop_reason: Option<StopReason>,
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// When the run finished
    pub finished_at: Option<DateTime<Utc>>,
}

impl SyncStats {
    /// Create new stats starting now
    pub fn new() -> Self {
        Self {
            records_yielded: 0,
            records_changed: 0,
            records_unchanged: 0,
            pages_fetched: 0,
            pages_degraded: 0,
            planned_count: None,
            stop_reason: None,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    /// Count one record and the oracle's verdict on it
    pub fn add_record(&mut self, changed: bool) {
        self.records_yielded += 1;
        if changed {
            self.records_changed += 1;
        } else {
            self.records_unchanged += 1;
        }
    }

    /// Whether the stream ended before consuming every planned page
    pub fn stopped_early(&self) -> bool {
        matches!(
            self.stop_reason,
            Some(StopReason::ItemLimit | StopReason::UnchangedThreshold)
        )
    }

    /// Run duration in milliseconds, once finished
    pub fn duration_ms(&self) -> Option<i64> {
        self.finished_at
            .map(|end| (end - self.started_at).num_milliseconds())
    }
}

impl Default for SyncStats {
    fn default() -> Self {
        Self::new()
    }
}
