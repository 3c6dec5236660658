use crate::domain::{SearchItem, ViewState};

pub const RETRY_HINT: &str = "Type :retry to try again";

/// Render a state as the search screen would show it.
pub fn render_state(state: &ViewState) -> String {
    match state {
        ViewState::Idle => "Start typing to search...".to_string(),
        ViewState::Loading => "Loading...".to_string(),
        ViewState::Success(items) => render_grid(items),
        ViewState::Empty => "No results found".to_string(),
        ViewState::Error(message) => format!("{}\n{}", message, RETRY_HINT),
    }
}

/// Numbered listing of thumbnails, one entry per photo
pub fn render_grid(items: &[SearchItem]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            format!(
                "{:>3}. {} by {}\n     {}",
                i + 1,
                item.title.as_deref().unwrap_or("Untitled"),
                item.author.as_deref().unwrap_or("unknown"),
                item.thumbnail_url().unwrap_or("-"),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
