use brand_site_core::{FeedItem, SiteConfig};
use brand_site_feed::{FeedError, FeedSource, load_feed_items};

/// Build-time snapshot of the news feed, capped at `cache_limit` items
pub async fn collect(
    config: &SiteConfig,
    source: &dyn FeedSource,
) -> Result<Vec<FeedItem>, FeedError> {
    load_feed_items(source, &config.feed, config.feed.cache_limit).await
}
