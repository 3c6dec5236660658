use async_trait::async_trait;

use crate::domain::SearchResponse;
use crate::errors::SearchResult;

/// Anything that can answer a tag search with a feed response.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PhotoSource: Send + Sync {
    /// Run one search for `search_term`. Single attempt, no retry.
    async fn fetch(&self, search_term: &str) -> SearchResult<SearchResponse>;
}
