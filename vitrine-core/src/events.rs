//! Page events a host feeds into [`GalleryPage`](crate::page::GalleryPage).

use crate::carousel::CarouselCommand;
use crate::dom::NodeId;

/// Keyboard keys the widget reacts to; everything else is carried through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Escape,
    Other(String),
}

impl Key {
    /// Map a `KeyboardEvent.key` value.
    pub fn from_key_name(name: &str) -> Self {
        match name {
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            "Escape" | "Esc" => Key::Escape,
            other => Key::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    Click(NodeId),
    KeyDown(Key),
    ImageLoaded { node: NodeId, natural_height: u32 },
    ImageFailed(NodeId),
    Scroll { y: f32 },
    Resize { height: f32 },
    Carousel(CarouselCommand),
}
