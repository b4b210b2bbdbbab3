use std::time::Duration;

use tracing::{debug, warn};
use vitrine_model::{ImageRecord, Transform};

use super::item::{
    append_thumbnail, fade_in, prepare_hidden, stagger, thumb_index,
};
use super::{EventSink, Renderer};
use crate::dom::{Document, NodeId};
use crate::events::PageEvent;
use crate::status::remove_loading;
use crate::timer::Timers;

pub const LINK_GRID_CLASS: &str = "gallery-grid";
pub const LINK_ITEM_CLASS: &str = "gallery-item";

const FADE_STEP: Duration = Duration::from_millis(100);

/// Thumbnails that open the full rendition in a new tab.
#[derive(Debug)]
pub struct LinkGallery {
    thumbnail: Transform,
    full: Transform,
    reveal_class: Option<String>,
    items: Vec<NodeId>,
    thumbs: Vec<NodeId>,
    fades: Timers<NodeId>,
}

impl LinkGallery {
    pub fn new(thumbnail: Transform, full: Transform) -> Self {
        Self {
            thumbnail,
            full,
            reveal_class: None,
            items: Vec::new(),
            thumbs: Vec::new(),
            fades: Timers::new(),
        }
    }

    pub fn with_reveal_class(mut self, class: impl Into<String>) -> Self {
        self.reveal_class = Some(class.into());
        self
    }

    pub fn items(&self) -> &[NodeId] {
        &self.items
    }
}

impl Renderer for LinkGallery {
    fn render(&mut self, doc: &mut Document, images: Vec<ImageRecord>) {
        let Some(container) = doc.first_by_class(LINK_GRID_CLASS) else {
            warn!("no .{LINK_GRID_CLASS} element; nothing rendered");
            return;
        };
        remove_loading(doc);

        self.items.clear();
        self.thumbs.clear();
        self.fades.clear();

        for record in &images {
            let anchor = doc.create_element("a");
            doc.set_attr(anchor, "href", self.full.apply(&record.url));
            doc.set_attr(anchor, "target", "_blank");
            doc.add_class(anchor, LINK_ITEM_CLASS);
            if let Some(class) = &self.reveal_class {
                doc.add_class(anchor, class);
            }
            prepare_hidden(doc, anchor);
            let img = append_thumbnail(doc, anchor, record, &self.thumbnail);
            doc.append_child(container, anchor);

            self.items.push(anchor);
            self.thumbs.push(img);
        }
        debug!(count = images.len(), "link gallery rendered");
    }
}

impl EventSink for LinkGallery {
    fn handle_event(&mut self, doc: &mut Document, event: &PageEvent) -> bool {
        match event {
            PageEvent::ImageLoaded { node, .. } => {
                match thumb_index(&self.thumbs, *node) {
                    Some(index) => {
                        let delay = stagger(index, FADE_STEP);
                        self.fades.schedule(delay, self.items[index]);
                        true
                    }
                    None => false,
                }
            }
            PageEvent::ImageFailed(node) => {
                match thumb_index(&self.thumbs, *node) {
                    Some(index) => {
                        doc.remove(self.items[index]);
                        true
                    }
                    None => false,
                }
            }
            _ => false,
        }
    }

    fn advance(&mut self, doc: &mut Document, now: Duration) {
        for item in self.fades.advance(now) {
            fade_in(doc, item);
        }
    }
}
