//! Execution engine module
//!
//! Reference driving loop for a record stream.
//!
//! # Overview
//!
//! The engine module provides:
//! - `SyncEngine` - pulls records, asks a `ChangeOracle` about each one,
//!   reports the verdict back to the stream and forwards the record to a sink
//! - `SyncStats` - what happened during the run

mod types;

pub use types::SyncStats;

use crate::error::Result;
use crate::stream::{ChangeOracle, RecordStream};
use crate::types::Record;
use chrono::Utc;
use tracing::info;

/// Drives a [`RecordStream`] to completion
pub struct SyncEngine {
    oracle: Box<dyn ChangeOracle>,
}

impl SyncEngine {
    /// Create an engine consulting `oracle`
    pub fn new(oracle: Box<dyn ChangeOracle>) -> Self {
        Self { oracle }
    }

    /// Consume `stream`, handing each record to `sink`.
    ///
    /// Only sink errors abort the run; the stream itself never fails.
    pub async fn run<F>(&self, stream: &mut RecordStream, mut sink: F) -> Result<SyncStats>
    where
        F: FnMut(Record) -> Result<()>,
    {
        let mut stats = SyncStats::new();
        stats.planned_count = stream.plan().map(|p| p.effective_total);

        while let Some(record) = stream.next().await {
            let changed = self.oracle.has_changed(&record).await;
            sink(record)?;
            stream.report_row_changed(changed);
            stats.add_record(changed);
        }

        stats.pages_fetched = stream.pages_fetched();
        stats.pages_degraded = stream.pages_degraded();
        stats.stop_reason = stream.stop_reason();
        stats.finished_at = Some(Utc::now());

        info!(
            "Sync finished: {} records ({} changed, {} unchanged), {} pages, {} degraded",
            stats.records_yielded,
            stats.records_changed,
            stats.records_unchanged,
            stats.pages_fetched,
            stats.pages_degraded
        );
        Ok(stats)
    }
}

impl std::fmt::Debug for SyncEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncEngine").finish_non_exhaustive()
    }
}
