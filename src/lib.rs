//! # paged-source
//!
//! Lazy record source for offset-paginated REST listing endpoints.
//!
//! Given a listing URL whose responses look like
//! `{"meta": {"limit", "offset", "total_count"}, "objects": [...]}`, the crate
//! counts the collection from the first page, plans one URL per page, and
//! yields individual records while fetching pages only on demand.
//!
//! ## Features
//!
//! - **Planning**: record count and page URLs from a single request
//! - **Lazy Paging**: one page in memory at a time, strictly sequential
//! - **Fail-Soft Pages**: a page that cannot be fetched contributes nothing
//! - **Early Stop**: item limit, and a partial mode that ends the run once
//!   enough unchanged records were seen
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use paged_source::{PagedSource, RunOptions, SourceConfig};
//! use paged_source::http::HttpClientConfig;
//!
//! #[tokio::main]
//! async fn main() -> paged_source::Result<()> {
//!     let config = SourceConfig::new("https://api.example.com/v1/entries/?format=json");
//!     let source = PagedSource::with_http(config, HttpClientConfig::default())?;
//!
//!     println!("planned: {}", source.count().await?);
//!
//!     let mut stream = source.records(RunOptions::new().with_partial(true)).await?;
//!     while let Some(record) = stream.next().await {
//!         let changed = store(&record);
//!         stream.report_row_changed(changed);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! SourceConfig ──► CountPlanner ──► PagePlan ──► UrlPlanner ──► Vec<Url>
//!                       │                                          │
//!                       └────────────── PageFetcher ◄──────────────┤
//!                                                                  ▼
//!                              host ◄── Record ◄──────────── RecordStream
//!                                └── report_row_changed ──► ChangeTracker
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Source configuration and run options
pub mod config;

/// HTTP client and page fetching
pub mod http;

/// Count and URL planning
pub mod pagination;

/// Lazy record stream and change tracking
pub mod stream;

/// Planning plus iteration behind one handle
pub mod source;

/// Reference driving loop
pub mod engine;

/// Previous-run snapshots
pub mod state;

/// Command-line interface
pub mod cli;

#[cfg(test)]
mod testing;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{RunOptions, SourceConfig};
pub use error::{Error, Result};
pub use source::PagedSource;
pub use stream::{ChangeOracle, ChangeTracker, RecordStream, StopReason};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
