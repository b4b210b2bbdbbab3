//! Full-screen viewer state and its mapping onto the host markup.

use tracing::debug;
use vitrine_model::{ImageRecord, Transform, generate_alt_text};

use crate::dom::{Document, NodeId};
use crate::error::DocumentError;
use crate::events::Key;

pub const CAROUSEL_ID: &str = "image-carousel";
pub const CAROUSEL_IMAGE_ID: &str = "carousel-image";
pub const CAROUSEL_COUNTER_ID: &str = "carousel-counter";
/// Attribute on host buttons naming the command they trigger.
pub const CAROUSEL_ACTION_ATTR: &str = "data-carousel-action";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselCommand {
    Next,
    Prev,
    Close,
    Open(usize),
}

impl CarouselCommand {
    /// Parse a `data-carousel-action` value.
    pub fn from_action(action: &str) -> Option<Self> {
        match action.trim() {
            "next" => Some(Self::Next),
            "prev" => Some(Self::Prev),
            "close" => Some(Self::Close),
            _ => None,
        }
    }
}

/// Position within an album plus the open flag.
///
/// `current_index` stays within `0..items.len()` whenever the album is
/// non-empty.
#[derive(Debug, Clone, Default)]
pub struct CarouselState {
    items: Vec<ImageRecord>,
    current_index: usize,
    open: bool,
}

impl CarouselState {
    pub fn new(items: Vec<ImageRecord>) -> Self {
        Self {
            items,
            current_index: 0,
            open: false,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[ImageRecord] {
        &self.items
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn current(&self) -> Option<&ImageRecord> {
        self.items.get(self.current_index)
    }

    /// Open at `index`. Out-of-range indices leave the state untouched.
    pub fn open(&mut self, index: usize) -> bool {
        if index >= self.items.len() {
            return false;
        }
        self.current_index = index;
        self.open = true;
        true
    }

    pub fn next(&mut self) {
        if !self.items.is_empty() {
            self.current_index = (self.current_index + 1) % self.items.len();
        }
    }

    pub fn prev(&mut self) {
        let n = self.items.len();
        if n > 0 {
            self.current_index = (self.current_index + n - 1) % n;
        }
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// `"3 / 12"` style position label.
    pub fn counter_label(&self) -> String {
        format!("{} / {}", self.current_index + 1, self.items.len())
    }

    /// Keyboard bindings; only live while the viewer is open.
    pub fn command_for_key(&self, key: &Key) -> Option<CarouselCommand> {
        if !self.open {
            return None;
        }
        match key {
            Key::ArrowLeft => Some(CarouselCommand::Prev),
            Key::ArrowRight => Some(CarouselCommand::Next),
            Key::Escape => Some(CarouselCommand::Close),
            Key::Other(_) => None,
        }
    }

    /// Apply a command; returns whether anything changed.
    pub fn apply(&mut self, command: CarouselCommand) -> bool {
        match command {
            CarouselCommand::Next => {
                self.next();
                !self.items.is_empty()
            }
            CarouselCommand::Prev => {
                self.prev();
                !self.items.is_empty()
            }
            CarouselCommand::Close => {
                let was_open = self.open;
                self.close();
                was_open
            }
            CarouselCommand::Open(index) => self.open(index),
        }
    }
}

/// Handles to the viewer markup.
#[derive(Debug, Clone, Copy)]
pub struct CarouselView {
    pub root: NodeId,
    pub image: NodeId,
    pub counter: NodeId,
}

impl CarouselView {
    pub fn locate(doc: &Document) -> Result<Self, DocumentError> {
        let find = |id: &'static str| {
            doc.get_element_by_id(id)
                .ok_or(DocumentError::MissingElement(id))
        };
        Ok(Self {
            root: find(CAROUSEL_ID)?,
            image: find(CAROUSEL_IMAGE_ID)?,
            counter: find(CAROUSEL_COUNTER_ID)?,
        })
    }

    /// Mirror `state` onto the page.
    pub fn sync(
        &self,
        doc: &mut Document,
        state: &CarouselState,
        full: &Transform,
    ) {
        if state.is_open() {
            doc.set_style(self.root, "display", "flex");
            let body = doc.body();
            doc.set_style(body, "overflow", "hidden");
        } else {
            doc.set_style(self.root, "display", "none");
            let body = doc.body();
            doc.set_style(body, "overflow", "auto");
            return;
        }

        if let Some(current) = state.current() {
            doc.set_attr(self.image, "src", full.apply(&current.url));
            doc.set_attr(self.image, "alt", generate_alt_text(&current.name));
            doc.set_text(self.counter, state.counter_label());
            debug!(index = state.current_index(), "carousel showing image");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn album(n: usize) -> CarouselState {
        CarouselState::new(
            (0..n)
                .map(|i| {
                    ImageRecord::new(
                        format!("https://ik.imagekit.io/demo/p{i}.jpg"),
                        format!("p{i}.jpg"),
                        "image",
                    )
                })
                .collect(),
        )
    }

    #[test]
    fn next_wraps_back_to_start() {
        let mut state = album(4);
        state.open(2);
        for _ in 0..4 {
            state.next();
        }
        assert_eq!(state.current_index(), 2);
    }

    #[test]
    fn prev_from_first_goes_to_last() {
        let mut state = album(5);
        state.open(0);
        state.prev();
        assert_eq!(state.current_index(), 4);
        assert_eq!(state.counter_label(), "5 / 5");
    }

    #[test]
    fn open_rejects_out_of_range() {
        let mut state = album(2);
        assert!(!state.open(2));
        assert!(!state.is_open());
    }

    #[test]
    fn keys_ignored_while_closed() {
        let mut state = album(3);
        assert_eq!(state.command_for_key(&Key::ArrowRight), None);
        state.open(0);
        assert_eq!(
            state.command_for_key(&Key::ArrowRight),
            Some(CarouselCommand::Next)
        );
        assert_eq!(
            state.command_for_key(&Key::Escape),
            Some(CarouselCommand::Close)
        );
        assert_eq!(state.command_for_key(&Key::Other("x".into())), None);
    }

    #[test]
    fn empty_album_navigation_is_noop() {
        let mut state = album(0);
        assert!(!state.apply(CarouselCommand::Next));
        assert!(!state.apply(CarouselCommand::Open(0)));
        assert_eq!(state.current_index(), 0);
    }

    #[test]
    fn parses_button_actions() {
        let parse = CarouselCommand::from_action;
        assert_eq!(parse("next"), Some(CarouselCommand::Next));
        assert_eq!(parse("close"), Some(CarouselCommand::Close));
        assert_eq!(parse("zoom"), None);
    }

    #[test]
    fn sync_reflects_open_state() {
        let mut doc = Document::new();
        let body = doc.body();
        let root = doc.append_new(body, "div");
        doc.set_attr(root, "id", CAROUSEL_ID);
        let img = doc.append_new(root, "img");
        doc.set_attr(img, "id", CAROUSEL_IMAGE_ID);
        let counter = doc.append_new(root, "span");
        doc.set_attr(counter, "id", CAROUSEL_COUNTER_ID);

        let view = CarouselView::locate(&doc).unwrap();
        let mut state = album(3);
        state.open(1);
        let full = Transform::new("?tr=w-1200,q-90");
        view.sync(&mut doc, &state, &full);

        assert_eq!(doc.style(root, "display"), Some("flex"));
        assert_eq!(doc.style(body, "overflow"), Some("hidden"));
        assert_eq!(
            doc.attr(img, "src"),
            Some("https://ik.imagekit.io/demo/p1.jpg?tr=w-1200,q-90")
        );
        assert_eq!(doc.attr(img, "alt"), Some("p1"));
        assert_eq!(doc.text(counter), Some("2 / 3"));

        state.close();
        view.sync(&mut doc, &state, &full);
        assert_eq!(doc.style(root, "display"), Some("none"));
        assert_eq!(doc.style(body, "overflow"), Some("auto"));
    }

    #[test]
    fn locate_reports_missing_markup() {
        let doc = Document::new();
        assert_eq!(
            CarouselView::locate(&doc).unwrap_err(),
            DocumentError::MissingElement(CAROUSEL_ID)
        );
    }
}
