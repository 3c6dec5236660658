pub mod item;
pub mod view_state;

pub use item::{displayable_items, MediaRef, SearchItem, SearchResponse};
pub use view_state::ViewState;
