use std::time::Duration;

use crate::errors::{SearchError, SearchResult};

/// Public photo feed queried by tag; the search term is appended verbatim
/// after URL-escaping.
pub const DEFAULT_FEED_URL: &str =
    "https://api.flickr.com/services/feeds/photos_public.gne?format=json&nojsoncallback=1&tags=";

pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub feed_url: String,
    pub debounce: Duration,
    pub http_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_string(),
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            http_timeout: None,
        }
    }
}

impl Config {
    /// Get the directory where the executable is located
    fn exe_dir() -> Option<std::path::PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    pub fn from_env() -> SearchResult<Self> {
        // Try to load .env from executable's directory first
        if let Some(dir) = Self::exe_dir() {
            let env_path = dir.join(".env");
            if env_path.exists() {
                dotenvy::from_path(&env_path).ok();
            }
        }
        // Fall back to current directory
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup (process env in production)
    pub fn from_lookup<F>(lookup: F) -> SearchResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let feed_url = lookup("FLICKR_FEED_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.feed_url);

        let debounce = match lookup("SEARCH_DEBOUNCE_MS") {
            Some(raw) => Duration::from_millis(parse_number("SEARCH_DEBOUNCE_MS", &raw)?),
            None => defaults.debounce,
        };

        let http_timeout = match lookup("HTTP_TIMEOUT_SECS") {
            Some(raw) => Some(Duration::from_secs(parse_number("HTTP_TIMEOUT_SECS", &raw)?)),
            None => None,
        };

        Ok(Self {
            feed_url,
            debounce,
            http_timeout,
        })
    }
}

fn parse_number(key: &str, raw: &str) -> SearchResult<u64> {
    raw.trim()
        .parse()
        .map_err(|_| SearchError::Config(format!("{} must be a whole number, got '{}'", key, raw)))
}
