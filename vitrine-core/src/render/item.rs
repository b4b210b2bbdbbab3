//! Markup helpers shared by the album layouts.

use std::time::Duration;

use vitrine_model::{ImageRecord, Transform, generate_alt_text};

use crate::dom::{Document, NodeId};

pub const ITEM_TRANSITION: &str = "opacity 0.3s ease, transform 0.3s ease";

/// Style an item so it starts invisible and slightly lowered.
pub fn prepare_hidden(doc: &mut Document, item: NodeId) {
    doc.set_style(item, "opacity", "0");
    doc.set_style(item, "transform", "translateY(20px)");
    doc.set_style(item, "transition", ITEM_TRANSITION);
}

pub fn fade_in(doc: &mut Document, item: NodeId) {
    doc.set_style(item, "opacity", "1");
    doc.set_style(item, "transform", "translateY(0)");
}

/// Append the thumbnail `img` for `record` under `parent`.
pub fn append_thumbnail(
    doc: &mut Document,
    parent: NodeId,
    record: &ImageRecord,
    thumbnail: &Transform,
) -> NodeId {
    let img = doc.append_new(parent, "img");
    doc.set_attr(img, "src", thumbnail.apply(&record.url));
    doc.set_attr(img, "alt", generate_alt_text(&record.name));
    doc.set_attr(img, "loading", "lazy");
    img
}

pub fn stagger(index: usize, step: Duration) -> Duration {
    step.saturating_mul(u32::try_from(index).unwrap_or(u32::MAX))
}

/// Position of `node` in `thumbs`, if it is one of them.
pub fn thumb_index(thumbs: &[NodeId], node: NodeId) -> Option<usize> {
    thumbs.iter().position(|t| *t == node)
}
