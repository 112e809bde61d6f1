// Remote news feed: fetch, parse (RSS 2.0 or Atom) and reshape into FeedItem

pub mod endpoint;
pub mod fetch;
pub mod map;
pub mod parse;

use async_trait::async_trait;
use brand_site_core::FeedItem;
use brand_site_core::config::FeedConfig;
use thiserror::Error;

pub use endpoint::{FeedResponse, live_feed_response};
pub use fetch::HttpFeedSource;
pub use map::{format_german_date, map_entries};
pub use parse::{FeedEntry, ParsedFeed, parse_feed};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedError {
    /// The feed host answered with a non-2xx status
    #[error("upstream returned {status} {status_text}")]
    Upstream { status: u16, status_text: String },
    #[error("network error: {0}")]
    Network(String),
    #[error("feed parse error: {0}")]
    Parse(String),
}

/// Anything that can hand back the raw bytes of a feed document
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<u8>, FeedError>;
}

/// Fetch, parse and map a feed, keeping at most `limit` items in feed order.
pub async fn load_feed_items(
    source: &dyn FeedSource,
    config: &FeedConfig,
    limit: usize,
) -> Result<Vec<FeedItem>, FeedError> {
    let bytes = source.fetch().await?;
    let parsed = parse_feed(&bytes)?;
    tracing::debug!(entries = parsed.entries.len(), "parsed feed");

    let mut items = map_entries(&parsed, &config.source_name, chrono::Local::now().fixed_offset());
    items.truncate(limit);
    Ok(items)
}
