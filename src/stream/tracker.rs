//! Unchanged-row tracking for partial runs

use crate::types::Record;
use async_trait::async_trait;

/// Unchanged rows after which a partial run stops
pub const UNCHANGED_THRESHOLD: u64 = 20;

/// Counts rows the host reported as unchanged.
///
/// The counter only ever grows within a run; a changed row does not reset it.
/// With upstreams that list most recently modified records first this acts
/// like a streak, but nothing enforces that.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeTracker {
    unchanged: u64,
    changed: u64,
}

impl ChangeTracker {
    /// Create a tracker with zeroed counters
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the host's verdict for one row
    pub fn record_outcome(&mut self, changed: bool) {
        if changed {
            self.changed += 1;
        } else {
            self.unchanged += 1;
        }
    }

    /// Whether the run should stop. Always false outside partial mode.
    pub fn should_stop(&self, partial: bool) -> bool {
        partial && self.unchanged >= UNCHANGED_THRESHOLD
    }

    /// Rows reported unchanged so far
    pub fn unchanged(&self) -> u64 {
        self.unchanged
    }

    /// Rows reported changed so far
    pub fn changed(&self) -> u64 {
        self.changed
    }
}

/// Decides whether a record differs from what the host stored last time
#[async_trait]
pub trait ChangeOracle: Send + Sync {
    /// True if `record` is new or differs from the stored copy
    async fn has_changed(&self, record: &Record) -> bool;
}

/// Oracle for full runs: every record counts as changed
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysChanged;

#[async_trait]
impl ChangeOracle for AlwaysChanged {
    async fn has_changed(&self, _record: &Record) -> bool {
        true
    }
}
