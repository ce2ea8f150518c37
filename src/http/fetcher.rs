//! Page fetching
//!
//! [`PageFetcher`] is the seam between planning/iteration and the network.
//! Fetching is fail-soft: a page that cannot be retrieved or decoded comes
//! back as `Value::Null`, which callers read as "no data for this page".

use super::client::HttpClient;
use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;
use url::Url;

/// Fetches one page and returns its parsed JSON body
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Perform exactly one GET against `url`.
    ///
    /// Never fails. Transport errors, non-2xx statuses and undecodable bodies
    /// all yield `Value::Null`.
    async fn fetch(&self, url: &Url) -> Value;
}

/// [`PageFetcher`] backed by [`HttpClient`]
#[derive(Debug)]
pub struct HttpPageClient {
    client: HttpClient,
}

impl HttpPageClient {
    /// Wrap an HTTP client
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpPageClient {
    async fn fetch(&self, url: &Url) -> Value {
        match self.client.get_json(url).await {
            Ok(body) => body,
            Err(e) => {
                warn!("Page {} unavailable, treating as empty: {}", url, e);
                Value::Null
            }
        }
    }
}

/// Objects listed on a fetched page; anything without an `objects` array is empty
pub fn page_objects(body: Value) -> Vec<Value> {
    match body {
        Value::Object(mut map) => match map.remove("objects") {
            Some(Value::Array(objects)) => objects,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}
