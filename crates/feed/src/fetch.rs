use async_trait::async_trait;

use crate::{FeedError, FeedSource};

const USER_AGENT: &str = concat!("brand-site/", env!("CARGO_PKG_VERSION"));

/// Feed source backed by a plain HTTP GET.
///
/// No timeout or retry is configured beyond the reqwest defaults.
#[derive(Debug, Clone)]
pub struct HttpFeedSource {
    client: reqwest::Client,
    url: String,
}

impl HttpFeedSource {
    pub fn new(url: impl Into<String>) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|err| FeedError::Network(err.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    async fn fetch(&self) -> Result<Vec<u8>, FeedError> {
        tracing::debug!(url = %self.url, "fetching feed");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|err| FeedError::Network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Upstream {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|err| FeedError::Network(err.to_string()))?;
        Ok(bytes.to_vec())
    }
}
