//! Record stream module
//!
//! Lazy, page-by-page iteration over planned page URLs.
//!
//! # Overview
//!
//! - `RecordStream` - pull-based cursor: `next().await` yields one record,
//!   fetching the next page only when the current one is used up
//! - `ChangeTracker` - unchanged-row counter fed by `report_row_changed`
//! - `ChangeOracle` - host seam deciding whether a record changed
//!
//! Two independent guards can end the stream early, both checked before each
//! record is handed out: the item limit, and in partial mode the unchanged
//! threshold. Early stops are normal termination, not errors.

mod tracker;

pub use tracker::{AlwaysChanged, ChangeOracle, ChangeTracker, UNCHANGED_THRESHOLD};

use crate::config::RunOptions;
use crate::http::{page_objects, PageFetcher};
use crate::pagination::PagePlan;
use crate::types::Record;
use futures::Stream;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::{debug, info, warn};
use url::Url;

/// Why a stream ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Every planned page was consumed
    Exhausted,
    /// The item limit was reached
    ItemLimit,
    /// Partial mode saw enough unchanged rows
    UnchangedThreshold,
}

/// Lazy record sequence over a fixed list of page URLs.
///
/// Forward-only and single-use. Pages are fetched strictly in order, one at a
/// time, and never ahead of demand.
pub struct RecordStream {
    fetcher: Arc<dyn PageFetcher>,
    urls: VecDeque<Url>,
    buffer: VecDeque<Value>,
    options: RunOptions,
    tracker: ChangeTracker,
    plan: Option<PagePlan>,
    page_index: usize,
    yielded: usize,
    pages_degraded: usize,
    stopped: Option<StopReason>,
}

impl RecordStream {
    /// Create a stream over `urls`, fetched through `fetcher`
    pub fn new(fetcher: Arc<dyn PageFetcher>, urls: Vec<Url>, options: RunOptions) -> Self {
        Self {
            fetcher,
            urls: urls.into(),
            buffer: VecDeque::new(),
            options,
            tracker: ChangeTracker::new(),
            plan: None,
            page_index: 0,
            yielded: 0,
            pages_degraded: 0,
            stopped: None,
        }
    }

    /// Attach the plan the URLs were derived from
    #[must_use]
    pub fn with_plan(mut self, plan: PagePlan) -> Self {
        self.plan = Some(plan);
        self
    }

    /// Pull the next record, fetching pages as needed.
    ///
    /// Returns `None` once the stream has ended; it stays ended afterwards.
    #[allow(clippy::should_implement_trait)]
    pub async fn next(&mut self) -> Option<Record> {
        loop {
            if self.stopped.is_some() {
                return None;
            }

            if let Some(reason) = self.early_stop() {
                self.finish(reason);
                return None;
            }

            if let Some(object) = self.buffer.pop_front() {
                self.yielded += 1;
                return Some(Record::new(object));
            }

            let Some(url) = self.urls.pop_front() else {
                self.finish(StopReason::Exhausted);
                return None;
            };
            self.load_page(&url).await;
        }
    }

    /// Host feedback after consuming a record: did that row change?
    pub fn report_row_changed(&mut self, changed: bool) {
        self.tracker.record_outcome(changed);
    }

    /// Records handed out so far
    pub fn yielded(&self) -> usize {
        self.yielded
    }

    /// Pages requested so far
    pub fn pages_fetched(&self) -> usize {
        self.page_index
    }

    /// Pages that came back empty because the fetch failed
    pub fn pages_degraded(&self) -> usize {
        self.pages_degraded
    }

    /// Change counters reported by the host
    pub fn tracker(&self) -> &ChangeTracker {
        &self.tracker
    }

    /// Plan the stream was built from, if known
    pub fn plan(&self) -> Option<&PagePlan> {
        self.plan.as_ref()
    }

    /// Why the stream ended; `None` while still running
    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stopped
    }

    /// Adapt into a `futures::Stream` for consumers that never report changes
    pub fn into_stream(self) -> impl Stream<Item = Record> + Send {
        futures::stream::unfold(self, |mut stream| async move {
            let record = stream.next().await?;
            Some((record, stream))
        })
    }

    /// Guard verdict, only while records may remain; a fully drained stream
    /// always ends as `Exhausted`.
    fn early_stop(&self) -> Option<StopReason> {
        if self.buffer.is_empty() && self.urls.is_empty() {
            return None;
        }
        if self.tracker.should_stop(self.options.partial) {
            return Some(StopReason::UnchangedThreshold);
        }
        match self.options.item_limit() {
            Some(limit) if self.yielded >= limit => Some(StopReason::ItemLimit),
            _ => None,
        }
    }

    async fn load_page(&mut self, url: &Url) {
        let body = self.fetcher.fetch(url).await;
        self.page_index += 1;

        if body.is_null() {
            self.pages_degraded += 1;
            warn!("Page {} ({}) contributed no records", self.page_index, url);
            return;
        }

        let objects = page_objects(body);
        debug!(
            "Page {}: {} objects from {}",
            self.page_index,
            objects.len(),
            url
        );
        self.buffer.extend(objects);
    }

    fn finish(&mut self, reason: StopReason) {
        self.buffer.clear();
        self.urls.clear();
        self.stopped = Some(reason);
        info!(
            "Record stream ended ({:?}) after {} records from {} pages",
            reason, self.yielded, self.page_index
        );
    }
}

impl std::fmt::Debug for RecordStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStream")
            .field("remaining_pages", &self.urls.len())
            .field("buffered", &self.buffer.len())
            .field("yielded", &self.yielded)
            .field("tracker", &self.tracker)
            .field("stopped", &self.stopped)
            .finish_non_exhaustive()
    }
}
