use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::Client;

use super::models::FeedEntry;
use super::parser::parse_feed;
use crate::config::BotSettings;
use crate::{Error, Result};

const MAX_FEED_BYTES: usize = 5 * 1024 * 1024;
const BOT_USER_AGENT: &str = concat!("arxivbot/", env!("CARGO_PKG_VERSION"));

/// Anything that can produce the current entries of a category feed
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn entries(&self, category: &str) -> Result<Vec<FeedEntry>>;
}

/// Build the HTTP client shared by the fetcher and the notifier
pub fn build_http_client(timeout_secs: u64) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .gzip(true)
        .deflate(true)
        .brotli(true)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(Error::Http)
}

/// Fetches category feeds from a fixed base URL. One request per call, no retries.
pub struct FeedFetcher {
    client: Client,
    base_url: String,
}

impl FeedFetcher {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn from_settings(client: Client, settings: &BotSettings) -> Self {
        Self::new(client, settings.feed_base_url.clone())
    }

    /// Feed URL for a category: the base URL with the category appended
    pub fn feed_url(&self, category: &str) -> String {
        format!("{}{}", self.base_url, category)
    }

    fn build_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "application/rss+xml,application/atom+xml,application/rdf+xml,application/xml;q=0.9,*/*;q=0.8"
            )
        );
        headers.insert(USER_AGENT, HeaderValue::from_static(BOT_USER_AGENT));
        headers
    }

    /// Fetch and parse the feed for `category`
    pub async fn fetch(&self, category: &str) -> Result<Vec<FeedEntry>> {
        let url = self.feed_url(category);

        tracing::info!("Fetching feed from: {}", url);

        let response = self.client
            .get(&url)
            .headers(Self::build_headers())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::FeedParse(format!(
                "HTTP {} for URL: {}",
                status,
                url
            )));
        }

        let content = response.bytes().await?;
        ensure_content_size(content.len(), &url)?;

        let entries = parse_feed(&content)?;
        tracing::debug!("Feed {} returned {} entries", url, entries.len());

        Ok(entries)
    }
}

#[async_trait]
impl FeedSource for FeedFetcher {
    async fn entries(&self, category: &str) -> Result<Vec<FeedEntry>> {
        self.fetch(category).await
    }
}

fn ensure_content_size(size: usize, url: &str) -> Result<()> {
    if size > MAX_FEED_BYTES {
        return Err(Error::FeedParse(format!(
            "Feed too large ({} bytes) for URL: {}",
            size,
            url
        )));
    }
    Ok(())
}
