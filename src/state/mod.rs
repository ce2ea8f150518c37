//! State module
//!
//! Knowledge carried over from a previous run. Partial runs need it to tell
//! changed records from ones already synchronized.
//!
//! # Overview
//!
//! - `SnapshotOracle` - `ChangeOracle` backed by a previous run's JSON-lines output

mod snapshot;

pub use snapshot::SnapshotOracle;
