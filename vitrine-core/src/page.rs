//! Composition root for a gallery page.
//!
//! [`GalleryPage`] owns the document and every controller attached to it.
//! Hosts translate their native events into [`PageEvent`]s, call
//! [`dispatch`](GalleryPage::dispatch), and report the clock through
//! [`advance`](GalleryPage::advance). After each call the page drains
//! mutation records and re-evaluates intersections, the way a browser would
//! between tasks.

use std::time::Duration;

use tracing::debug;
use vitrine_model::ImageRecord;

use crate::carousel::{CAROUSEL_ACTION_ATTR, CarouselCommand};
use crate::chrome::PageChrome;
use crate::dom::{Document, NodeId, Viewport};
use crate::events::PageEvent;
use crate::lazyload::LazyImageLoader;
use crate::loader::{GalleryLoader, LoadOutcome};
use crate::render::{Gallery, Renderer};
use crate::reveal::{RevealOptions, ScrollRevealController};

#[derive(Debug)]
pub struct GalleryPage {
    doc: Document,
    gallery: Option<Box<dyn Gallery>>,
    reveal: ScrollRevealController,
    lazy: LazyImageLoader,
    chrome: PageChrome,
}

impl GalleryPage {
    /// Attach the page controllers to `doc`. Content already present counts
    /// as the initial page, not as inserted content.
    pub fn new(doc: Document) -> Self {
        Self::with_reveal_options(doc, RevealOptions::default())
    }

    pub fn with_reveal_options(
        mut doc: Document,
        options: RevealOptions,
    ) -> Self {
        doc.take_mutations();

        let mut chrome = PageChrome::new();
        chrome.setup(&mut doc);
        let mut lazy = LazyImageLoader::new();
        lazy.setup(&doc);
        let mut reveal = ScrollRevealController::new(options);
        reveal.setup(&mut doc);

        let mut page = Self {
            doc,
            gallery: None,
            reveal,
            lazy,
            chrome,
        };
        page.flush();
        page
    }

    pub fn with_gallery(mut self, gallery: Box<dyn Gallery>) -> Self {
        self.gallery = Some(gallery);
        self
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Direct document access for hosts that lay out elements. Changes are
    /// picked up on the next dispatch or advance.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn reveal(&self) -> &ScrollRevealController {
        &self.reveal
    }

    pub fn into_document(self) -> Document {
        self.doc
    }

    /// Fetch the album and render it with the attached gallery. Pages
    /// without a gallery only get the status messages.
    pub async fn load_gallery(
        &mut self,
        loader: &GalleryLoader,
    ) -> LoadOutcome {
        let outcome = match self.gallery.as_mut() {
            Some(gallery) => loader.load(&mut self.doc, gallery.as_mut()).await,
            None => {
                let mut discard = NullRenderer;
                loader.load(&mut self.doc, &mut discard).await
            }
        };
        self.flush();
        outcome
    }

    /// Route one host event. Returns whether any component consumed it.
    pub fn dispatch(&mut self, event: PageEvent) -> bool {
        let handled = match &event {
            PageEvent::Click(target) => self.click(*target),
            PageEvent::ImageLoaded {
                node,
                natural_height,
            } => {
                self.doc.mark_image_loaded(*node, *natural_height);
                let by_gallery = self.forward(&event);
                let by_reveal =
                    self.reveal.on_image_loaded(&mut self.doc, *node);
                by_gallery || by_reveal
            }
            PageEvent::ImageFailed(node) => {
                self.doc.mark_image_failed(*node);
                self.forward(&event)
            }
            PageEvent::Scroll { y } => {
                self.doc.set_scroll_y(*y);
                self.chrome.on_scroll();
                true
            }
            PageEvent::Resize { height } => {
                let scroll_y = self.doc.viewport().scroll_y;
                self.doc.set_viewport(Viewport::new(scroll_y, *height));
                true
            }
            PageEvent::KeyDown(_) | PageEvent::Carousel(_) => {
                self.forward(&event)
            }
        };
        self.flush();
        handled
    }

    /// Run everything due at `now` (time since page load).
    pub fn advance(&mut self, now: Duration) {
        if let Some(gallery) = self.gallery.as_mut() {
            gallery.advance(&mut self.doc, now);
        }
        self.reveal.advance(&mut self.doc, now);
        self.chrome.advance(&mut self.doc, now);
        self.flush();
    }

    pub fn next_image(&mut self) -> bool {
        self.dispatch(PageEvent::Carousel(CarouselCommand::Next))
    }

    pub fn prev_image(&mut self) -> bool {
        self.dispatch(PageEvent::Carousel(CarouselCommand::Prev))
    }

    pub fn close_carousel(&mut self) -> bool {
        self.dispatch(PageEvent::Carousel(CarouselCommand::Close))
    }

    /// Jump past the hero banner, then update the header and reveal state
    /// as for any other scroll.
    pub fn scroll_to_next_section(&mut self) -> bool {
        let y = self.chrome.next_section_offset(&self.doc);
        debug!(y, "scrolling to next section");
        self.dispatch(PageEvent::Scroll { y })
    }

    fn click(&mut self, target: NodeId) -> bool {
        if self.chrome.handle_click(&mut self.doc, target) {
            return true;
        }

        let action = self
            .doc
            .closest(target, |doc, node| {
                doc.has_attr(node, CAROUSEL_ACTION_ATTR)
            })
            .and_then(|button| self.doc.attr(button, CAROUSEL_ACTION_ATTR))
            .and_then(CarouselCommand::from_action);
        match action {
            Some(command) => {
                debug!(?command, "carousel button");
                self.forward(&PageEvent::Carousel(command))
            }
            None => self.forward(&PageEvent::Click(target)),
        }
    }

    fn forward(&mut self, event: &PageEvent) -> bool {
        match self.gallery.as_mut() {
            Some(gallery) => gallery.handle_event(&mut self.doc, event),
            None => false,
        }
    }

    fn flush(&mut self) {
        let mutations = self.doc.take_mutations();
        if !mutations.is_empty() {
            self.reveal.on_mutations(&self.doc, &mutations);
        }
        self.reveal.handle_intersections(&mut self.doc);
        self.lazy.poll(&mut self.doc);
    }
}

#[derive(Debug)]
struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _doc: &mut Document, _images: Vec<ImageRecord>) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chrome::{HEADER_CLASS, HERO_CLASS, SCROLLED_CLASS};
    use crate::dom::Rect;
    use crate::render::GalleryLayout;
    use crate::reveal::{ANIMATE_CLASS, LOADED_CLASS};
    use crate::shell::PageShell;

    #[test]
    fn scroll_updates_header_after_settle() {
        let doc = PageShell::new(GalleryLayout::Grid).build();
        let mut page = GalleryPage::new(doc);
        let header = page.document().first_by_class(HEADER_CLASS).unwrap();

        page.dispatch(PageEvent::Scroll { y: 120.0 });
        assert!(!page.document().has_class(header, SCROLLED_CLASS));
        page.advance(Duration::from_millis(10));
        assert!(page.document().has_class(header, SCROLLED_CLASS));
    }

    #[test]
    fn reveal_runs_on_scroll() {
        let mut doc = Document::new();
        let body = doc.body();
        let card = doc.append_new(body, "article");
        doc.set_attr(card, "class", "slide-in-left");
        doc.set_rect(card, Rect::new(1500.0, 200.0));

        let mut page = GalleryPage::new(doc);
        assert!(!page.document().has_class(card, ANIMATE_CLASS));
        page.dispatch(PageEvent::Scroll { y: 1000.0 });
        assert!(page.document().has_class(card, ANIMATE_CLASS));
    }

    #[test]
    fn preloaded_image_reveals_on_scroll_without_load_event() {
        let mut doc = Document::new();
        let body = doc.body();
        let card = doc.append_new(body, "article");
        doc.set_attr(card, "class", "slide-in-bottom");
        doc.set_rect(card, Rect::new(1500.0, 200.0));
        let img = doc.append_new(card, "img");
        doc.mark_image_loaded(img, 640);

        let mut page = GalleryPage::new(doc);
        assert!(!page.document().has_class(card, ANIMATE_CLASS));
        page.dispatch(PageEvent::Scroll { y: 1000.0 });
        assert!(page.document().has_class(card, ANIMATE_CLASS));
        assert!(page.document().has_class(img, LOADED_CLASS));
    }

    #[test]
    fn next_section_scroll_lands_on_hero_sibling() {
        let mut doc = PageShell::new(GalleryLayout::Grid).build();
        let body = doc.body();
        let hero = doc.append_new(body, "section");
        doc.add_class(hero, HERO_CLASS);
        doc.set_rect(hero, Rect::new(0.0, 1200.0));
        let next = doc.append_new(body, "section");
        doc.set_attr(next, "class", "slide-in-bottom");
        doc.set_rect(next, Rect::new(1200.0, 400.0));

        let mut page = GalleryPage::new(doc);
        assert!(page.scroll_to_next_section());
        assert_eq!(page.document().viewport().scroll_y, 1200.0);
        assert!(page.document().has_class(next, ANIMATE_CLASS));

        page.advance(Duration::from_millis(10));
        let header = page.document().first_by_class(HEADER_CLASS).unwrap();
        assert!(page.document().has_class(header, SCROLLED_CLASS));
    }

    #[test]
    fn next_section_scroll_without_hero_moves_one_viewport() {
        let mut page = GalleryPage::new(Document::new());
        page.scroll_to_next_section();
        assert_eq!(page.document().viewport().scroll_y, 800.0);
        page.scroll_to_next_section();
        assert_eq!(page.document().viewport().scroll_y, 1600.0);
    }
}
