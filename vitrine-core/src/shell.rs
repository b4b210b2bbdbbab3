//! The host markup a gallery page is expected to provide.

use crate::carousel::{
    CAROUSEL_ACTION_ATTR, CAROUSEL_COUNTER_ID, CAROUSEL_ID, CAROUSEL_IMAGE_ID,
};
use crate::chrome::{HEADER_CLASS, MENU_ID, MENU_TOGGLE_ID};
use crate::dom::Document;
use crate::render::GalleryLayout;
use crate::render::grid::GRID_CONTAINER_ID;
use crate::render::links::LINK_GRID_CLASS;
use crate::status::{LOADING_MESSAGE_ID, StatusNotice};

/// Builds a document with the header, loading indicator, album container and
/// (for grids) the viewer overlay.
#[derive(Debug, Clone)]
pub struct PageShell {
    layout: GalleryLayout,
    title: Option<String>,
    with_header: bool,
}

impl PageShell {
    pub fn new(layout: GalleryLayout) -> Self {
        Self {
            layout,
            title: None,
            with_header: true,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn without_header(mut self) -> Self {
        self.with_header = false;
        self
    }

    pub fn build(&self) -> Document {
        let mut doc = Document::new();
        let body = doc.body();

        if self.with_header {
            let header = doc.append_new(body, "header");
            doc.add_class(header, HEADER_CLASS);
            let toggle = doc.append_new(header, "button");
            doc.set_attr(toggle, "id", MENU_TOGGLE_ID);
            let icon = doc.append_new(toggle, "i");
            doc.set_attr(icon, "class", "fas fa-bars");
            let menu = doc.append_new(header, "nav");
            doc.set_attr(menu, "id", MENU_ID);
            doc.add_class(menu, "hidden");
        }

        let main = doc.append_new(body, "main");
        if let Some(title) = &self.title {
            let h1 = doc.append_new(main, "h1");
            doc.set_text(h1, title.clone());
        }

        let loading = doc.append_new(main, "div");
        doc.set_attr(loading, "id", LOADING_MESSAGE_ID);
        StatusNotice::Loading.show(&mut doc);

        match self.layout {
            GalleryLayout::Grid => {
                let grid = doc.append_new(main, "div");
                doc.set_attr(grid, "id", GRID_CONTAINER_ID);
                doc.set_style(grid, "display", "none");
                self.append_carousel(&mut doc);
            }
            GalleryLayout::Links => {
                let grid = doc.append_new(main, "div");
                doc.add_class(grid, LINK_GRID_CLASS);
            }
        }

        doc.take_mutations();
        doc
    }

    fn append_carousel(&self, doc: &mut Document) {
        let body = doc.body();
        let overlay = doc.append_new(body, "div");
        doc.set_attr(overlay, "id", CAROUSEL_ID);
        doc.add_class(overlay, "carousel");
        doc.set_style(overlay, "display", "none");

        for (action, label) in [("close", "×"), ("prev", "‹")] {
            let button = doc.append_new(overlay, "button");
            doc.set_attr(button, CAROUSEL_ACTION_ATTR, action);
            doc.set_text(button, label);
        }
        let image = doc.append_new(overlay, "img");
        doc.set_attr(image, "id", CAROUSEL_IMAGE_ID);
        let next = doc.append_new(overlay, "button");
        doc.set_attr(next, CAROUSEL_ACTION_ATTR, "next");
        doc.set_text(next, "›");
        let counter = doc.append_new(overlay, "div");
        doc.set_attr(counter, "id", CAROUSEL_COUNTER_ID);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::CarouselView;

    #[test]
    fn grid_shell_has_viewer_markup() {
        let doc = PageShell::new(GalleryLayout::Grid).build();
        assert!(doc.get_element_by_id(GRID_CONTAINER_ID).is_some());
        assert!(CarouselView::locate(&doc).is_ok());
        assert!(!doc.has_pending_mutations());
    }

    #[test]
    fn link_shell_has_no_viewer() {
        let doc = PageShell::new(GalleryLayout::Links)
            .without_header()
            .build();
        assert!(doc.first_by_class(LINK_GRID_CLASS).is_some());
        assert!(doc.get_element_by_id(CAROUSEL_ID).is_none());
        assert!(doc.first_by_class(HEADER_CLASS).is_none());
    }
}
