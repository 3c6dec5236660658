use crate::domain::{displayable_items, SearchItem, SearchResponse};
use crate::errors::SearchResult;

/// What the search screen shows. Exactly one variant holds at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    Success(Vec<SearchItem>),
    Empty,
    Error(String),
}

impl ViewState {
    /// Projects the outcome of one fetch into a state. Incomplete items are
    /// dropped before deciding between `Success` and `Empty`.
    pub fn from_fetch(result: SearchResult<SearchResponse>) -> Self {
        match result {
            Ok(response) => {
                let items = displayable_items(response.items);
                if items.is_empty() {
                    ViewState::Empty
                } else {
                    ViewState::Success(items)
                }
            }
            Err(e) => ViewState::Error(e.user_message()),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn items(&self) -> &[SearchItem] {
        match self {
            ViewState::Success(items) => items,
            _ => &[],
        }
    }
}
