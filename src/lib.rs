//! Debounced tag search over the public Flickr photo feed.
//!
//! Text goes into a [`services::SearchController`], which debounces it,
//! queries a [`sources::PhotoSource`] and publishes a [`domain::ViewState`].

pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod presentation;
pub mod services;
pub mod sources;
