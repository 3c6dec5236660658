use serde::{Deserialize, Serialize};

/// Body of one feed request. Extra keys in the payload are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub items: Vec<SearchItem>,
}

/// One photo entry as the feed delivers it. Every field is optional because
/// the upstream payload is not schema-guaranteed; `null` decodes as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchItem {
    pub title: Option<String>,
    pub link: Option<String>,
    pub media: Option<MediaRef>,
    pub description: Option<String>,
    pub author: Option<String>,
    pub published: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRef {
    #[serde(rename = "m")]
    pub thumbnail_url: String,
}

impl MediaRef {
    pub fn new(thumbnail_url: impl Into<String>) -> Self {
        Self {
            thumbnail_url: thumbnail_url.into(),
        }
    }
}

impl SearchItem {
    /// Returns a displayable copy of `raw`, or `None` if title, media,
    /// description, author or published is missing. The copy's `link`
    /// points at the media thumbnail.
    pub fn validate(raw: SearchItem) -> Option<SearchItem> {
        let SearchItem {
            title,
            media,
            description,
            author,
            published,
            ..
        } = raw;

        let (title, media, description, author, published) =
            (title?, media?, description?, author?, published?);

        Some(SearchItem {
            title: Some(title),
            link: Some(media.thumbnail_url.clone()),
            media: Some(media),
            description: Some(description),
            author: Some(author),
            published: Some(published),
        })
    }

    pub fn thumbnail_url(&self) -> Option<&str> {
        self.media.as_ref().map(|m| m.thumbnail_url.as_str())
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn with_media(mut self, thumbnail_url: impl Into<String>) -> Self {
        self.media = Some(MediaRef::new(thumbnail_url));
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_published(mut self, published: impl Into<String>) -> Self {
        self.published = Some(published.into());
        self
    }
}

/// Keeps only displayable items, in feed order.
pub fn displayable_items(raw: Vec<SearchItem>) -> Vec<SearchItem> {
    raw.into_iter().filter_map(SearchItem::validate).collect()
}
