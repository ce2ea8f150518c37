//! Count and URL planning
//!
//! Planning happens once per run, before the first record is produced.

use super::types::{PageMetadata, PagePlan, OFFSET_PARAM};
use crate::error::Result;
use crate::http::PageFetcher;
use tracing::info;
use url::Url;

// ============================================================================
// Count Planner
// ============================================================================

/// Determines page size and record count from the first page
#[derive(Debug, Clone, Copy, Default)]
pub struct CountPlanner {
    page_cap: Option<u64>,
}

impl CountPlanner {
    /// Create a planner with an optional page cap
    pub fn new(page_cap: Option<u64>) -> Self {
        Self { page_cap }
    }

    /// Fetch `base_url` once and derive the plan.
    ///
    /// A failed first fetch comes back empty from the fetcher and therefore
    /// surfaces here as missing metadata.
    pub async fn plan(&self, fetcher: &dyn PageFetcher, base_url: &Url) -> Result<PagePlan> {
        let body = fetcher.fetch(base_url).await;
        let meta = PageMetadata::from_body(&body, base_url.as_str())?;
        let plan = PagePlan::new(&meta, self.page_cap)?;

        info!(
            "Planned {} pages of {} ({} records, upstream reports {})",
            plan.total_pages, plan.limit, plan.effective_total, plan.upstream_total
        );
        Ok(plan)
    }
}

// ============================================================================
// URL Planner
// ============================================================================

/// Enumerates page URLs by rewriting the `offset` query parameter
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlPlanner;

impl UrlPlanner {
    /// Every page URL for `plan`, in fetch order
    pub fn enumerate(base_url: &Url, plan: &PagePlan) -> Vec<Url> {
        Self::enumerate_raw(base_url, plan.limit, plan.effective_total)
    }

    /// Every page URL for `effective_total` records at `limit` per page.
    ///
    /// Returns nothing when `limit` is zero.
    pub fn enumerate_raw(base_url: &Url, limit: u64, effective_total: u64) -> Vec<Url> {
        if limit == 0 {
            return Vec::new();
        }

        (0..effective_total.div_ceil(limit))
            .map(|page| with_offset(base_url, limit * page))
            .collect()
    }
}

/// Copy of `url` with `offset` set, leaving every other query pair byte-for-byte intact
pub fn with_offset(url: &Url, offset: u64) -> Url {
    let replacement = format!("{OFFSET_PARAM}={offset}");
    let mut replaced = false;
    let mut pairs: Vec<&str> = Vec::new();

    for pair in url.query().unwrap_or_default().split('&') {
        if pair.is_empty() {
            continue;
        }
        let key = pair.split_once('=').map_or(pair, |(k, _)| k);
        if key == OFFSET_PARAM {
            if !replaced {
                pairs.push(&replacement);
                replaced = true;
            }
        } else {
            pairs.push(pair);
        }
    }
    if !replaced {
        pairs.push(&replacement);
    }

    let mut out = url.clone();
    out.set_query(Some(&pairs.join("&")));
    out
}
