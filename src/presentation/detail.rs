use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use scraper::Html;
use url::Url;

use crate::domain::SearchItem;

static IMG_SRC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<img src="([^"]+)""#).expect("valid img pattern"));

/// Everything the detail screen shows for one photo, with fallbacks applied.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoDetail {
    pub heading: String,
    pub title: String,
    pub author: String,
    pub image_url: Option<Url>,
    pub description: Option<String>,
    pub embedded_image: Option<Url>,
    pub published: String,
}

impl PhotoDetail {
    pub fn from_item(item: &SearchItem) -> Self {
        let image_url = item.link.as_deref().and_then(|l| Url::parse(l).ok());
        let description = item.description.as_deref().map(html_to_text);
        let embedded_image = item.description.as_deref().and_then(extract_image_url);

        Self {
            heading: item.title.clone().unwrap_or_else(|| "Details".to_string()),
            title: item.title.clone().unwrap_or_else(|| "No title".to_string()),
            author: item
                .author
                .clone()
                .unwrap_or_else(|| "Unknown author".to_string()),
            image_url,
            description,
            embedded_image,
            published: format_published(item.published.as_deref()),
        }
    }

    pub fn format(&self) -> String {
        let mut lines = vec![
            self.heading.clone(),
            "=".repeat(self.heading.chars().count().max(1)),
        ];

        match &self.image_url {
            Some(url) => lines.push(format!("Image: {}", url)),
            None => lines.push("Image unavailable".to_string()),
        }

        lines.push(format!("Title: {}", self.title));
        lines.push(format!("Author: {}", self.author));
        lines.push("Description:".to_string());

        match &self.description {
            Some(text) => {
                lines.push(format!("  {}", text));
                if let Some(url) = &self.embedded_image {
                    lines.push(format!("  Embedded image: {}", url));
                }
            }
            None => lines.push("  No description available".to_string()),
        }

        lines.push(format!("Published: {}", self.published));
        lines.join("\n")
    }
}

/// First `<img src="...">` URL in an HTML fragment. A plain pattern scan,
/// not an HTML parse: only the exact `<img src="` spelling matches.
pub fn extract_image_url(html: &str) -> Option<Url> {
    let caps = IMG_SRC.captures(html)?;
    Url::parse(&caps[1]).ok()
}

/// Extract plain text from HTML content, preserving some structure
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_fragment(html);
    let mut text = String::new();

    for node in document.root_element().descendants() {
        if let Some(text_node) = node.value().as_text() {
            text.push_str(text_node);
        }
        // Block elements separate words
        if let Some(element) = node.value().as_element() {
            match element.name() {
                "p" | "br" | "div" => text.push(' '),
                _ => {}
            }
        }
    }

    // Collapse whitespace and trim
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Medium-style date (`Jan 14, 2025`) in UTC, or "Invalid date".
pub fn format_published(published: Option<&str>) -> String {
    published
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|dt| dt.with_timezone(&Utc).format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| "Invalid date".to_string())
}
