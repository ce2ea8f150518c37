//! Paged source
//!
//! Entry point tying planning and iteration together: validates the
//! configuration, counts once, and hands out record streams.

use crate::config::{RunOptions, SourceConfig};
use crate::error::Result;
use crate::http::{HttpClient, HttpClientConfig, HttpPageClient, PageFetcher};
use crate::pagination::{CountPlanner, PagePlan, UrlPlanner};
use crate::stream::RecordStream;
use std::sync::Arc;
use tokio::sync::OnceCell;
use url::Url;

/// A paginated listing endpoint
pub struct PagedSource {
    base_url: Url,
    config: SourceConfig,
    fetcher: Arc<dyn PageFetcher>,
    plan: OnceCell<PagePlan>,
}

impl PagedSource {
    /// Create a source fetching through `fetcher`.
    ///
    /// Fails immediately if `url` is missing or invalid.
    pub fn new(config: SourceConfig, fetcher: Arc<dyn PageFetcher>) -> Result<Self> {
        let base_url = config.base_url()?;
        Ok(Self {
            base_url,
            config,
            fetcher,
            plan: OnceCell::new(),
        })
    }

    /// Create a source fetching over HTTP
    pub fn with_http(config: SourceConfig, http: HttpClientConfig) -> Result<Self> {
        let client = HttpClient::with_config(http)?;
        Self::new(config, Arc::new(HttpPageClient::new(client)))
    }

    /// Validated base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Source configuration
    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    /// Page plan, computed on first use and cached
    pub async fn plan(&self) -> Result<PagePlan> {
        let plan = self
            .plan
            .get_or_try_init(|| async {
                CountPlanner::new(self.config.page_cap())
                    .plan(self.fetcher.as_ref(), &self.base_url)
                    .await
            })
            .await?;
        Ok(*plan)
    }

    /// Records this run will attempt to produce
    pub async fn count(&self) -> Result<u64> {
        Ok(self.plan().await?.effective_total)
    }

    /// Every page URL, in fetch order
    pub async fn urls(&self) -> Result<Vec<Url>> {
        let plan = self.plan().await?;
        Ok(UrlPlanner::enumerate(&self.base_url, &plan))
    }

    /// Start a fresh record stream from page 0
    pub async fn records(&self, options: RunOptions) -> Result<RecordStream> {
        let plan = self.plan().await?;
        let urls = UrlPlanner::enumerate(&self.base_url, &plan);
        Ok(RecordStream::new(self.fetcher.clone(), urls, options).with_plan(plan))
    }
}

impl std::fmt::Debug for PagedSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PagedSource")
            .field("base_url", &self.base_url.as_str())
            .field("config", &self.config)
            .field("plan", &self.plan.get())
            .finish_non_exhaustive()
    }
}
