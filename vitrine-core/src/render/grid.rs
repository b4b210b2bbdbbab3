use std::time::Duration;

use tracing::{debug, warn};
use vitrine_model::{ImageRecord, Transform};

use super::item::{
    append_thumbnail, fade_in, prepare_hidden, stagger, thumb_index,
};
use super::{EventSink, Renderer};
use crate::carousel::{CarouselCommand, CarouselState, CarouselView};
use crate::dom::{Document, NodeId};
use crate::events::PageEvent;
use crate::timer::Timers;

pub const GRID_CONTAINER_ID: &str = "masonry-gallery";
pub const GRID_CLASS: &str = "grid-gallery";
pub const GRID_ITEM_CLASS: &str = "grid-item";

const FADE_STEP: Duration = Duration::from_millis(50);

/// Thumbnail grid backed by the full-screen viewer.
#[derive(Debug)]
pub struct GridGallery {
    thumbnail: Transform,
    full: Transform,
    reveal_class: Option<String>,
    items: Vec<NodeId>,
    thumbs: Vec<NodeId>,
    carousel: CarouselState,
    view: Option<CarouselView>,
    fades: Timers<NodeId>,
}

impl GridGallery {
    pub fn new(thumbnail: Transform, full: Transform) -> Self {
        Self {
            thumbnail,
            full,
            reveal_class: None,
            items: Vec::new(),
            thumbs: Vec::new(),
            carousel: CarouselState::default(),
            view: None,
            fades: Timers::new(),
        }
    }

    /// Tag every grid item with a scroll reveal class such as
    /// `slide-in-bottom`.
    pub fn with_reveal_class(mut self, class: impl Into<String>) -> Self {
        self.reveal_class = Some(class.into());
        self
    }

    pub fn carousel(&self) -> &CarouselState {
        &self.carousel
    }

    /// Grid item elements in album order, including removed ones.
    pub fn items(&self) -> &[NodeId] {
        &self.items
    }

    /// Run a viewer command and mirror the result onto the page. A closed
    /// viewer that stays closed leaves the page untouched.
    pub fn command(
        &mut self,
        doc: &mut Document,
        command: CarouselCommand,
    ) -> bool {
        let was_open = self.carousel.is_open();
        let changed = self.carousel.apply(command);
        if changed && (was_open || self.carousel.is_open()) {
            self.sync_view(doc);
        }
        changed
    }

    fn sync_view(&mut self, doc: &mut Document) {
        if self.view.is_none() {
            match CarouselView::locate(doc) {
                Ok(view) => self.view = Some(view),
                Err(err) => {
                    warn!(error = %err, "carousel markup missing");
                    return;
                }
            }
        }
        if let Some(view) = &self.view {
            view.sync(doc, &self.carousel, &self.full);
        }
    }

    fn item_index(&self, doc: &Document, node: NodeId) -> Option<usize> {
        let item = doc.closest(node, |d, n| d.has_class(n, GRID_ITEM_CLASS))?;
        self.items.iter().position(|i| *i == item)
    }
}

impl Renderer for GridGallery {
    fn render(&mut self, doc: &mut Document, images: Vec<ImageRecord>) {
        let Some(container) = doc.get_element_by_id(GRID_CONTAINER_ID) else {
            warn!(
                "grid container #{GRID_CONTAINER_ID} not found; \
                 nothing rendered"
            );
            return;
        };

        doc.clear_children(container);
        doc.set_attr(container, "class", GRID_CLASS);
        doc.set_style(container, "display", "grid");

        self.items.clear();
        self.thumbs.clear();
        self.fades.clear();

        for (index, record) in images.iter().enumerate() {
            let item = doc.create_element("div");
            doc.add_class(item, GRID_ITEM_CLASS);
            if let Some(class) = &self.reveal_class {
                doc.add_class(item, class);
            }
            doc.set_attr(item, "data-index", index.to_string());
            prepare_hidden(doc, item);
            let img = append_thumbnail(doc, item, record, &self.thumbnail);
            doc.append_child(container, item);

            self.items.push(item);
            self.thumbs.push(img);
        }

        debug!(count = images.len(), "grid rendered");
        self.carousel = CarouselState::new(images);
        self.view = CarouselView::locate(doc).ok();
        if self.view.is_none() {
            warn!(
                "carousel markup not present; thumbnails will not open a viewer"
            );
        }
    }
}

impl EventSink for GridGallery {
    fn handle_event(&mut self, doc: &mut Document, event: &PageEvent) -> bool {
        match event {
            PageEvent::Click(node) => match self.item_index(doc, *node) {
                Some(index) => self.command(doc, CarouselCommand::Open(index)),
                None => false,
            },
            PageEvent::KeyDown(key) => {
                match self.carousel.command_for_key(key) {
                    Some(command) => self.command(doc, command),
                    None => false,
                }
            }
            PageEvent::Carousel(command) => self.command(doc, *command),
            PageEvent::ImageLoaded { node, .. } => {
                let Some(index) = thumb_index(&self.thumbs, *node) else {
                    return false;
                };
                self.fades
                    .schedule(stagger(index, FADE_STEP), self.items[index]);
                true
            }
            PageEvent::ImageFailed(node) => {
                let Some(index) = thumb_index(&self.thumbs, *node) else {
                    return false;
                };
                debug!(index, "dropping thumbnail that failed to load");
                doc.remove(self.items[index]);
                true
            }
            PageEvent::Scroll { .. } | PageEvent::Resize { .. } => false,
        }
    }

    fn advance(&mut self, doc: &mut Document, now: Duration) {
        for item in self.fades.advance(now) {
            fade_in(doc, item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::{CAROUSEL_COUNTER_ID, CAROUSEL_ID, CAROUSEL_IMAGE_ID};
    use crate::events::Key;

    fn page() -> Document {
        let mut doc = Document::new();
        let body = doc.body();
        let grid = doc.append_new(body, "div");
        doc.set_attr(grid, "id", GRID_CONTAINER_ID);
        let carousel = doc.append_new(body, "div");
        doc.set_attr(carousel, "id", CAROUSEL_ID);
        let img = doc.append_new(carousel, "img");
        doc.set_attr(img, "id", CAROUSEL_IMAGE_ID);
        let counter = doc.append_new(carousel, "span");
        doc.set_attr(counter, "id", CAROUSEL_COUNTER_ID);
        doc
    }

    fn images(n: usize) -> Vec<ImageRecord> {
        (0..n)
            .map(|i| {
                ImageRecord::new(
                    format!("https://ik.imagekit.io/demo/shot-{i}.jpg"),
                    format!("shot-{i}.jpg"),
                    "image",
                )
            })
            .collect()
    }

    fn gallery() -> GridGallery {
        GridGallery::new(
            Transform::new("?tr=w-400,q-80"),
            Transform::new("?tr=w-1200,q-90"),
        )
    }

    #[test]
    fn renders_hidden_items_with_indices() {
        let mut doc = page();
        let mut grid = gallery();
        grid.render(&mut doc, images(3));

        let container = doc.get_element_by_id(GRID_CONTAINER_ID).unwrap();
        assert_eq!(doc.class_name(container), GRID_CLASS);
        assert_eq!(doc.style(container, "display"), Some("grid"));
        assert_eq!(doc.children(container).len(), 3);

        let second = grid.items()[1];
        assert_eq!(doc.attr(second, "data-index"), Some("1"));
        assert_eq!(doc.style(second, "opacity"), Some("0"));
        let img = doc.first_descendant_by_tag(second, "img").unwrap();
        assert_eq!(
            doc.attr(img, "src"),
            Some("https://ik.imagekit.io/demo/shot-1.jpg?tr=w-400,q-80")
        );
        assert_eq!(doc.attr(img, "alt"), Some("shot 1"));
    }

    #[test]
    fn thumbnail_click_opens_viewer() {
        let mut doc = page();
        let mut grid = gallery();
        grid.render(&mut doc, images(4));

        let img = doc.first_descendant_by_tag(grid.items()[2], "img").unwrap();
        assert!(grid.handle_event(&mut doc, &PageEvent::Click(img)));

        let counter = doc.get_element_by_id(CAROUSEL_COUNTER_ID).unwrap();
        assert_eq!(doc.text(counter), Some("3 / 4"));
        assert!(grid.carousel().is_open());

        grid.handle_event(&mut doc, &PageEvent::KeyDown(Key::ArrowRight));
        grid.handle_event(&mut doc, &PageEvent::KeyDown(Key::ArrowRight));
        assert_eq!(doc.text(counter), Some("1 / 4"));

        grid.handle_event(&mut doc, &PageEvent::KeyDown(Key::Escape));
        let root = doc.get_element_by_id(CAROUSEL_ID).unwrap();
        assert_eq!(doc.style(root, "display"), Some("none"));
        assert!(
            !grid.handle_event(&mut doc, &PageEvent::KeyDown(Key::ArrowLeft))
        );
        assert_eq!(grid.carousel().current_index(), 0);
    }

    #[test]
    fn stepping_a_closed_viewer_leaves_page_styles_alone() {
        let mut doc = page();
        let mut grid = gallery();
        grid.render(&mut doc, images(3));

        grid.command(&mut doc, CarouselCommand::Next);
        grid.command(&mut doc, CarouselCommand::Prev);

        let root = doc.get_element_by_id(CAROUSEL_ID).unwrap();
        assert_eq!(doc.style(doc.body(), "overflow"), None);
        assert_eq!(doc.style(root, "display"), None);
        assert!(!grid.carousel().is_open());
    }

    #[test]
    fn loaded_thumbnails_fade_in_staggered() {
        let mut doc = page();
        let mut grid = gallery();
        grid.render(&mut doc, images(3));
        let item = grid.items()[2];
        let img = doc.first_descendant_by_tag(item, "img").unwrap();

        doc.mark_image_loaded(img, 300);
        grid.handle_event(
            &mut doc,
            &PageEvent::ImageLoaded {
                node: img,
                natural_height: 300,
            },
        );

        grid.advance(&mut doc, Duration::from_millis(99));
        assert_eq!(doc.style(item, "opacity"), Some("0"));
        grid.advance(&mut doc, Duration::from_millis(100));
        assert_eq!(doc.style(item, "opacity"), Some("1"));
        assert_eq!(doc.style(item, "transform"), Some("translateY(0)"));
    }

    #[test]
    fn failed_thumbnail_leaves_carousel_intact() {
        let mut doc = page();
        let mut grid = gallery();
        grid.render(&mut doc, images(3));
        let img = doc.first_descendant_by_tag(grid.items()[1], "img").unwrap();

        grid.handle_event(&mut doc, &PageEvent::ImageFailed(img));

        let container = doc.get_element_by_id(GRID_CONTAINER_ID).unwrap();
        assert_eq!(doc.children(container).len(), 2);
        assert_eq!(grid.carousel().len(), 3);

        let last = doc.first_descendant_by_tag(grid.items()[2], "img").unwrap();
        grid.handle_event(&mut doc, &PageEvent::Click(last));
        assert_eq!(grid.carousel().current_index(), 2);
    }

    #[test]
    fn reveal_class_is_applied_to_items() {
        let mut doc = page();
        let mut grid = gallery().with_reveal_class("slide-in-bottom");
        grid.render(&mut doc, images(1));
        assert!(doc.has_class(grid.items()[0], "slide-in-bottom"));
    }

    #[test]
    fn missing_container_renders_nothing() {
        let mut doc = Document::new();
        let mut grid = gallery();
        grid.render(&mut doc, images(2));
        assert!(grid.items().is_empty());
    }
}
