//! Header and mobile menu behavior shared by every page.

use std::time::Duration;

use crate::dom::{Document, NodeId};
use crate::timer::Timers;

pub const HEADER_CLASS: &str = "glassmorphic-header";
pub const SCROLLED_CLASS: &str = "scrolled";
pub const MENU_TOGGLE_ID: &str = "mobile-menu-toggle";
pub const MENU_ID: &str = "mobile-menu";
pub const HERO_CLASS: &str = "hero-section-extended";

/// Scroll offset past which the header is styled as scrolled.
pub const SCROLL_THRESHOLD: f32 = 50.0;
const SCROLL_SETTLE: Duration = Duration::from_millis(10);

#[derive(Debug, Default)]
pub struct PageChrome {
    header: Option<NodeId>,
    toggle: Option<NodeId>,
    menu: Option<NodeId>,
    scroll_timer: Timers<()>,
}

impl PageChrome {
    pub fn new() -> Self {
        Self::default()
    }

    /// Locate the header and menu, then apply the current scroll state.
    pub fn setup(&mut self, doc: &mut Document) {
        self.header = doc.first_by_class(HEADER_CLASS);
        self.toggle = doc.get_element_by_id(MENU_TOGGLE_ID);
        self.menu = doc.get_element_by_id(MENU_ID);
        self.update_header(doc);
    }

    /// Only the last scroll inside the settle window is applied.
    pub fn on_scroll(&mut self) {
        if self.header.is_none() {
            return;
        }
        self.scroll_timer.clear();
        self.scroll_timer.schedule(SCROLL_SETTLE, ());
    }

    pub fn advance(&mut self, doc: &mut Document, now: Duration) {
        if !self.scroll_timer.advance(now).is_empty() {
            self.update_header(doc);
        }
    }

    fn update_header(&self, doc: &mut Document) {
        let Some(header) = self.header else {
            return;
        };
        if doc.viewport().scroll_y > SCROLL_THRESHOLD {
            doc.add_class(header, SCROLLED_CLASS);
        } else {
            doc.remove_class(header, SCROLLED_CLASS);
        }
    }

    /// Scroll offset of the section after the hero banner, or one viewport
    /// further down when there is no such section.
    pub fn next_section_offset(&self, doc: &Document) -> f32 {
        let viewport = doc.viewport();
        doc.first_by_class(HERO_CLASS)
            .and_then(|hero| doc.next_sibling(hero))
            .and_then(|section| doc.rect(section))
            .map(|rect| rect.top)
            .unwrap_or(viewport.scroll_y + viewport.height)
    }

    /// Handle a click on the menu toggle. Returns `false` for any other
    /// target.
    pub fn handle_click(&mut self, doc: &mut Document, target: NodeId) -> bool {
        let (Some(toggle), Some(menu)) = (self.toggle, self.menu) else {
            return false;
        };
        if doc.closest(target, |_, node| node == toggle).is_none() {
            return false;
        }

        let hidden = doc.toggle_class(menu, "hidden");
        if let Some(icon) = doc.first_descendant_by_tag(toggle, "i") {
            let (from, to) = if hidden {
                ("fa-times", "fa-bars")
            } else {
                ("fa-bars", "fa-times")
            };
            doc.remove_class(icon, from);
            doc.add_class(icon, to);
        }
        true
    }
}
