//! Deferred `src` assignment for `img.lazyload` elements.

use tracing::trace;

use crate::dom::{Document, NodeId};
use crate::observer::{IntersectionObserver, ObserverOptions};

pub const LAZY_CLASS: &str = "lazyload";
pub const LAZY_LOADED_CLASS: &str = "lazyloaded";
pub const DATA_SRC_ATTR: &str = "data-src";

#[derive(Debug, Default)]
pub struct LazyImageLoader {
    observer: IntersectionObserver,
}

impl LazyImageLoader {
    pub fn new() -> Self {
        Self {
            observer: IntersectionObserver::new(ObserverOptions::default()),
        }
    }

    /// Start watching every lazy image currently in the page.
    pub fn setup(&mut self, doc: &Document) {
        for img in lazy_images(doc) {
            self.observer.observe(img);
        }
    }

    pub fn pending(&self) -> usize {
        self.observer.len()
    }

    /// Swap in sources for images that came into view. Returns how many
    /// images received a source.
    pub fn poll(&mut self, doc: &mut Document) -> usize {
        let mut swapped = 0;
        for entry in self.observer.take_records(doc) {
            if !entry.is_intersecting {
                continue;
            }
            if swap_source(doc, entry.target) {
                swapped += 1;
            }
            self.observer.unobserve(entry.target);
        }
        swapped
    }

    /// Load everything at once, for hosts without intersection support.
    pub fn load_all(doc: &mut Document) -> usize {
        lazy_images(doc)
            .into_iter()
            .filter(|img| swap_source(doc, *img))
            .count()
    }
}

fn lazy_images(doc: &Document) -> Vec<NodeId> {
    doc.elements_by_class(LAZY_CLASS)
        .into_iter()
        .filter(|node| doc.tag(*node) == Some("img"))
        .collect()
}

fn swap_source(doc: &mut Document, img: NodeId) -> bool {
    let Some(src) = doc.attr(img, DATA_SRC_ATTR).map(str::to_string) else {
        return false;
    };
    trace!(src = %src, "lazy image entering view");
    doc.set_attr(img, "src", src);
    doc.remove_class(img, LAZY_CLASS);
    doc.add_class(img, LAZY_LOADED_CLASS);
    doc.remove_attr(img, DATA_SRC_ATTR);
    true
}
