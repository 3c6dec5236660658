pub mod traits;
pub mod flickr;

pub use traits::PhotoSource;
pub use flickr::{build_url, FlickrFeedSource};

#[cfg(test)]
pub use traits::MockPhotoSource;
