//! Album renderers.
//!
//! A renderer paints an album into the document once; afterwards it reacts
//! to page events (clicks, keys, thumbnail load results) through
//! [`EventSink`]. The two layouts share helpers from [`item`] but no state.

pub mod grid;
pub mod item;
pub mod links;

use std::fmt;
use std::time::Duration;

use vitrine_config::GalleryConfig;
use vitrine_model::{ImageRecord, ImageVariant};

use crate::dom::Document;
use crate::events::PageEvent;

pub use grid::GridGallery;
pub use links::LinkGallery;

/// Paints an ordered album into the page.
pub trait Renderer {
    fn render(&mut self, doc: &mut Document, images: Vec<ImageRecord>);
}

/// Reacts to page events after rendering.
pub trait EventSink {
    /// Returns `true` when the event was consumed.
    fn handle_event(&mut self, doc: &mut Document, event: &PageEvent) -> bool;

    /// Run deferred work that is due at `now`.
    fn advance(&mut self, _doc: &mut Document, _now: Duration) {}
}

/// A renderer that also handles its own events.
pub trait Gallery: Renderer + EventSink + fmt::Debug {}

impl<T: Renderer + EventSink + fmt::Debug> Gallery for T {}

/// Which markup an album is rendered as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GalleryLayout {
    /// Grid of thumbnails opening the full-screen viewer.
    #[default]
    Grid,
    /// Thumbnails linking to the full rendition in a new tab.
    Links,
}

impl GalleryLayout {
    pub fn build(self, config: &GalleryConfig) -> Box<dyn Gallery> {
        let thumbnail = config.transform(ImageVariant::Thumbnail).clone();
        let full = config.transform(ImageVariant::Full).clone();
        match self {
            GalleryLayout::Grid => Box::new(GridGallery::new(thumbnail, full)),
            GalleryLayout::Links => Box::new(LinkGallery::new(thumbnail, full)),
        }
    }
}
