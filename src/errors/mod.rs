use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Request errors
    #[error("could not build a request URL for \"{0}\"")]
    InvalidUrl(String),

    // Network errors carry the transport's own description
    #[error("{0}")]
    Transport(String),

    // Body did not match the feed's JSON shape
    #[error("{0}")]
    Decode(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(String),

    // User input errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            let url = err.url().map(|u| u.to_string()).unwrap_or_default();
            return SearchError::InvalidUrl(url);
        }
        SearchError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        SearchError::Decode(err.to_string())
    }
}

impl From<std::io::Error> for SearchError {
    fn from(err: std::io::Error) -> Self {
        SearchError::Io(err.to_string())
    }
}

impl SearchError {
    /// Message shown to the user: the failure's description with its first
    /// character upper-cased.
    pub fn user_message(&self) -> String {
        capitalize_first(&self.to_string())
    }
}

pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub type SearchResult<T> = Result<T, SearchError>;
