pub mod detail;
pub mod listing;

pub use detail::{extract_image_url, format_published, html_to_text, PhotoDetail};
pub use listing::{render_grid, render_state};
