use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::Client;
use url::Url;

use crate::config::AppConfig;
use crate::{Error, Result};

const USER_AGENT: &str = concat!("paymentsdive-newsletter/", env!("CARGO_PKG_VERSION"));

/// Anything that can hand back the raw bytes of a feed document
#[async_trait::async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Bytes>;
}

/// Feed fetcher over HTTP. One attempt per call, no retry.
pub struct FeedFetcher {
    client: Client,
}

impl FeedFetcher {
    /// Create a new feed fetcher with configuration
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Self::build_client(config.feed.timeout_secs)?;
        Ok(Self { client })
    }

    /// Build HTTP client with the request timeout applied to the whole exchange
    fn build_client(timeout_secs: u64) -> Result<Client> {
        Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(USER_AGENT)
            .default_headers(Self::build_headers())
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(Error::Transport)
    }

    fn build_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "application/rss+xml,application/xml;q=0.9,text/xml;q=0.8,*/*;q=0.5",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        headers
    }
}

#[async_trait::async_trait]
impl FeedSource for FeedFetcher {
    /// GET the feed, failing on transport errors and on any non-2xx status
    async fn fetch(&self, url: &str) -> Result<Bytes> {
        Url::parse(url)?;

        tracing::info!("Fetching feed from: {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(Error::HttpStatus {
                status,
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        tracing::debug!("Received {} bytes from {}", body.len(), url);

        Ok(body)
    }
}
