//! In-memory fetcher shared by unit tests

use crate::http::PageFetcher;
use crate::pagination::with_offset;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Mutex;
use url::Url;

pub const BASE: &str = "http://upstream.test/api/v1/entries/?format=json";

pub fn base_url() -> Url {
    Url::parse(BASE).unwrap()
}

/// Serves canned bodies keyed by URL and remembers every request
#[derive(Default)]
pub struct MockPages {
    pages: HashMap<String, Value>,
    requests: Mutex<Vec<String>>,
}

impl MockPages {
    /// `pages` full pages of `per_page` objects with ids `"{page}-{index}"`.
    ///
    /// The base URL (no offset) serves the same body as offset 0.
    pub fn listing(pages: u64, per_page: u64) -> Self {
        let total = pages * per_page;
        let mut mock = Self::default();
        for page in 0..pages {
            let objects: Vec<Value> = (0..per_page)
                .map(|i| json!({"id": format!("{page}-{i}"), "n": page * per_page + i}))
                .collect();
            let body = page_body(per_page, page * per_page, total, objects);
            if page == 0 {
                mock.pages.insert(BASE.to_string(), body.clone());
            }
            mock.insert(&with_offset(&base_url(), page * per_page), body);
        }
        mock
    }

    pub fn insert(&mut self, url: &Url, body: Value) {
        self.pages.insert(url.to_string(), body);
    }

    pub fn remove(&mut self, url: &Url) {
        self.pages.remove(url.as_str());
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for MockPages {
    async fn fetch(&self, url: &Url) -> Value {
        self.requests.lock().unwrap().push(url.to_string());
        self.pages.get(url.as_str()).cloned().unwrap_or(Value::Null)
    }
}

pub fn page_body(limit: u64, offset: u64, total: u64, objects: Vec<Value>) -> Value {
    json!({
        "meta": {"limit": limit, "offset": offset, "total_count": total},
        "objects": objects,
    })
}
