use brand_site_core::config::FeedConfig;
use serde_json::{Value, json};

use crate::{FeedError, FeedSource, load_feed_items};

/// Status code and JSON body for one call of the live feed endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct FeedResponse {
    pub status: u16,
    pub body: Value,
}

/// Serve the live feed: up to `api_limit` items, or an error payload.
///
/// Upstream HTTP failures keep the upstream status; every other failure is a 500.
pub async fn live_feed_response(source: &dyn FeedSource, config: &FeedConfig) -> FeedResponse {
    match load_feed_items(source, config, config.api_limit).await {
        Ok(items) => match serde_json::to_value(&items) {
            Ok(body) => FeedResponse { status: 200, body },
            Err(err) => internal_error(&err.to_string()),
        },
        Err(FeedError::Upstream {
            status,
            status_text,
        }) => {
            tracing::warn!(status, %status_text, "feed upstream failed");
            FeedResponse {
                status,
                body: json!({
                    "error": format!("Fehler beim Abrufen des Feeds: {}", status_text),
                }),
            }
        }
        Err(err) => {
            tracing::error!(error = %err, "feed request failed");
            internal_error(&err.to_string())
        }
    }
}

fn internal_error(details: &str) -> FeedResponse {
    FeedResponse {
        status: 500,
        body: json!({
            "error": "Fehler beim Laden des Feeds",
            "details": details,
        }),
    }
}
