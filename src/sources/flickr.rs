use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::{form_urlencoded, Url};

use crate::config::Config;
use crate::domain::SearchResponse;
use crate::errors::{SearchError, SearchResult};
use crate::sources::traits::PhotoSource;

/// Queries the public photo feed over HTTP.
pub struct FlickrFeedSource {
    client: Client,
    base_url: String,
}

impl FlickrFeedSource {
    pub fn new(config: &Config) -> Self {
        let mut builder = Client::builder();
        if let Some(timeout) = config.http_timeout {
            builder = builder.timeout(timeout);
        }

        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            base_url: config.feed_url.clone(),
        }
    }

    /// Append the URL-escaped term to the base endpoint
    pub fn request_url(&self, search_term: &str) -> SearchResult<Url> {
        build_url(&self.base_url, search_term)
    }

    fn decode(bytes: &[u8]) -> SearchResult<SearchResponse> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

impl Default for FlickrFeedSource {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

pub fn build_url(base_url: &str, search_term: &str) -> SearchResult<Url> {
    let escaped: String = form_urlencoded::byte_serialize(search_term.as_bytes()).collect();

    Url::parse(&format!("{}{}", base_url, escaped))
        .map_err(|_| SearchError::InvalidUrl(search_term.to_string()))
}

#[async_trait]
impl PhotoSource for FlickrFeedSource {
    async fn fetch(&self, search_term: &str) -> SearchResult<SearchResponse> {
        let url = self.request_url(search_term)?;
        debug!(%url, "requesting photo feed");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        debug!(%status, len = bytes.len(), "feed body received");

        Self::decode(&bytes)
    }
}
