//! Snapshot of a previous run's output
//!
//! Loads the JSON-lines file a previous `read` wrote and answers "did this
//! record change?" by comparing against it.

use crate::error::{Error, Result};
use crate::stream::ChangeOracle;
use crate::types::Record;
use async_trait::async_trait;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Records from a previous run, keyed by id
#[derive(Debug, Clone, Default)]
pub struct SnapshotOracle {
    records: HashMap<String, Record>,
}

impl SnapshotOracle {
    /// Create an empty snapshot; every record counts as changed
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a JSON-lines file. A missing file gives an empty snapshot.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("No snapshot at {}, starting empty", path.display());
            return Ok(Self::new());
        }

        let contents = fs::read_to_string(path)
            .map_err(|e| Error::state(format!("Failed to read snapshot file: {e}")))?;
        Self::from_jsonl(&contents)
    }

    /// Parse JSON lines. Blank lines are skipped; records without a string id are ignored.
    pub fn from_jsonl(contents: &str) -> Result<Self> {
        let mut snapshot = Self::new();
        for (n, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let record: Record = serde_json::from_str(line)
                .map_err(|e| Error::state(format!("Bad snapshot line {}: {e}", n + 1)))?;
            snapshot.insert(record);
        }
        debug!("Loaded snapshot with {} records", snapshot.len());
        Ok(snapshot)
    }

    /// Add or replace a record
    pub fn insert(&mut self, record: Record) {
        if let Some(id) = record.id() {
            self.records.insert(id.to_string(), record);
        }
    }

    /// Number of records held
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the snapshot is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn is_unchanged(&self, record: &Record) -> bool {
        record
            .id()
            .and_then(|id| self.records.get(id))
            .is_some_and(|previous| previous == record)
    }
}

#[async_trait]
impl ChangeOracle for SnapshotOracle {
    async fn has_changed(&self, record: &Record) -> bool {
        !self.is_unchanged(record)
    }
}
