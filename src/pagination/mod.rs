//! Pagination module
//!
//! Offset/limit pagination over a `meta` + `objects` listing envelope.
//!
//! # Overview
//!
//! The first page's `meta` block tells us the page size and the collection
//! size. From those the `CountPlanner` derives a `PagePlan` and the
//! `UrlPlanner` materializes one URL per page by rewriting `offset`.

mod planner;
mod types;

pub use planner::{with_offset, CountPlanner, UrlPlanner};
pub use types::{PageMetadata, PagePlan, OFFSET_PARAM};
