//! HTTP module
//!
//! Provides the single-attempt HTTP client and the fail-soft page fetcher
//! built on it.
//!
//! # Features
//!
//! - **Page Fetching**: `PageFetcher` trait, one GET per page, never errors
//! - **Rate Limiting**: Optional token bucket pacing using governor
//! - **Default Headers**: Auth tokens and the like set once on the client

mod client;
mod fetcher;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder};
pub use fetcher::{page_objects, HttpPageClient, PageFetcher};
pub use rate_limit::{RateLimiter, RateLimiterConfig};

#[cfg(test)]
mod tests;
