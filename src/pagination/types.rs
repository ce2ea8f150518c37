//! Pagination types
//!
//! The metadata envelope read from the first page and the plan derived from it.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Query parameter carrying the page offset
pub const OFFSET_PARAM: &str = "offset";

/// `meta` section of a listing response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetadata {
    /// Page size chosen by the upstream
    pub limit: u64,
    /// Offset of the page the metadata came from
    pub offset: u64,
    /// Records in the whole upstream collection
    pub total_count: u64,
}

impl PageMetadata {
    /// Extract metadata from a response body.
    ///
    /// All three of `limit`, `offset` and `total_count` must be present as
    /// non-negative integers under `meta`. `url` is only used for the error.
    pub fn from_body(body: &Value, url: &str) -> Result<Self> {
        let meta = body.get("meta");
        let field = |name: &str| {
            meta.and_then(|m| m.get(name))
                .and_then(Value::as_u64)
                .ok_or_else(|| Error::metadata(name, url))
        };

        Ok(Self {
            limit: field("limit")?,
            offset: field("offset")?,
            total_count: field("total_count")?,
        })
    }
}

/// Outcome of counting: page size and how many records the run will attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagePlan {
    /// Page size; never zero
    pub limit: u64,
    /// Pages the run will fetch
    pub total_pages: u64,
    /// `total_pages * limit`
    pub effective_total: u64,
    /// `total_count` as reported upstream
    pub upstream_total: u64,
}

impl PagePlan {
    /// Build a plan from metadata and an optional page cap.
    ///
    /// The effective total is always a whole number of pages, so it can exceed
    /// the upstream count on the last page or undercut it when capped.
    pub fn new(meta: &PageMetadata, page_cap: Option<u64>) -> Result<Self> {
        if meta.limit == 0 {
            return Err(Error::invalid_value(
                "limit",
                "upstream reported a page size of 0",
            ));
        }

        let natural_pages = meta.total_count.div_ceil(meta.limit);
        let total_pages = match page_cap {
            Some(cap) => natural_pages.min(cap),
            None => natural_pages,
        };

        let effective_total = total_pages.checked_mul(meta.limit).ok_or_else(|| {
            Error::invalid_value("total_count", "page count times page size overflows")
        })?;

        Ok(Self {
            limit: meta.limit,
            total_pages,
            effective_total,
            upstream_total: meta.total_count,
        })
    }
}
