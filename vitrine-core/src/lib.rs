//! Core of the Vitrine portfolio gallery.
//!
//! The crate works against an in-memory [`dom::Document`] rather than a
//! browser, so every behavior is driven by explicit [`events::PageEvent`]s
//! and a host-reported clock:
//!
//! - [`loader::GalleryLoader`] fetches an album through an
//!   [`api::AssetSource`] (ImageKit by default) and reports problems inline.
//! - [`render::GridGallery`] and [`render::LinkGallery`] paint the album;
//!   the grid also drives the full-screen [`carousel`].
//! - [`reveal::ScrollRevealController`], [`lazyload::LazyImageLoader`] and
//!   [`chrome::PageChrome`] provide the page-wide scroll behaviors.
//! - [`page::GalleryPage`] wires all of it together.

pub mod api;
pub mod carousel;
pub mod chrome;
pub mod dom;
pub mod error;
pub mod events;
pub mod lazyload;
pub mod loader;
pub mod observer;
pub mod page;
pub mod render;
pub mod reveal;
pub mod shell;
pub mod status;
pub mod timer;

pub use api::{AssetSource, ImageKitClient};
pub use carousel::{CarouselCommand, CarouselState};
pub use dom::{Document, NodeId};
pub use error::{DocumentError, FetchError, GalleryError};
pub use events::{Key, PageEvent};
pub use loader::{GalleryLoader, LoadOutcome};
pub use page::GalleryPage;
pub use render::{
    EventSink, Gallery, GalleryLayout, GridGallery, LinkGallery, Renderer,
};
pub use shell::PageShell;
pub use status::StatusNotice;
