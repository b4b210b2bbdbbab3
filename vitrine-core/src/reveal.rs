//! Scroll-triggered reveal animations.
//!
//! Elements carrying one of [`REVEAL_CLASSES`] get the `animate` class the
//! first time they scroll into view. Each element animates at most once per
//! controller; the set of animated elements only ever grows.

use std::collections::HashSet;
use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};

use crate::dom::{Document, ImageLoad, Mutation, NodeId, RootMargin};
use crate::observer::{IntersectionObserver, ObserverOptions};
use crate::timer::Timers;

pub const REVEAL_CLASSES: [&str; 3] =
    ["slide-in-left", "slide-in-right", "slide-in-bottom"];
pub const ANIMATE_CLASS: &str = "animate";
pub const LOADED_CLASS: &str = "loaded";
pub const OBSERVED_ATTR: &str = "data-observed";

static DELAY_CLASS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"slide-in-delay-(\d+)")
        .expect("delay class regex should compile")
});

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealOptions {
    pub threshold: f32,
    pub root_margin: RootMargin,
    /// Multiplied by `N` from a `slide-in-delay-N` class.
    pub delay_step: Duration,
    /// Initial delay for in-view elements without a delay class.
    pub default_delay: Duration,
    /// Wait between inserted content and the rescan it triggers.
    pub rescan_delay: Duration,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: RootMargin::new(50.0, -50.0),
            delay_step: Duration::from_millis(100),
            default_delay: Duration::from_millis(100),
            rescan_delay: Duration::from_millis(100),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RevealTask {
    Trigger(NodeId),
    Rescan,
}

#[derive(Debug)]
pub struct ScrollRevealController {
    options: RevealOptions,
    observer: Option<IntersectionObserver>,
    animated: HashSet<NodeId>,
    /// In-view elements waiting on their initial stagger.
    staggered: HashSet<NodeId>,
    /// `(img, element)` pairs waiting for the image to load.
    awaiting_image: Vec<(NodeId, NodeId)>,
    timers: Timers<RevealTask>,
}

impl Default for ScrollRevealController {
    fn default() -> Self {
        Self::new(RevealOptions::default())
    }
}

impl ScrollRevealController {
    pub fn new(options: RevealOptions) -> Self {
        Self {
            options,
            observer: None,
            animated: HashSet::new(),
            staggered: HashSet::new(),
            awaiting_image: Vec::new(),
            timers: Timers::new(),
        }
    }

    /// Observe the reveal elements present now and schedule the ones
    /// already on screen.
    pub fn setup(&mut self, doc: &mut Document) {
        self.observe_elements(doc);
        self.trigger_initial(doc);
    }

    pub fn is_animated(&self, element: NodeId) -> bool {
        self.animated.contains(&element)
    }

    pub fn animated_count(&self) -> usize {
        self.animated.len()
    }

    /// Start observing reveal elements not yet marked `data-observed`.
    pub fn observe_elements(&mut self, doc: &mut Document) {
        let elements = doc.elements_with_any_class(&REVEAL_CLASSES);
        if elements.is_empty() {
            return;
        }

        let options = ObserverOptions {
            threshold: self.options.threshold,
            root_margin: self.options.root_margin,
        };
        let observer = self
            .observer
            .get_or_insert_with(|| IntersectionObserver::new(options));

        for element in elements {
            if !doc.has_attr(element, OBSERVED_ATTR) {
                observer.observe(element);
                doc.set_attr(element, OBSERVED_ATTR, "true");
            }
        }
    }

    /// Process intersection changes since the last call.
    pub fn handle_intersections(&mut self, doc: &mut Document) {
        let Some(observer) = self.observer.as_mut() else {
            return;
        };
        let entries = observer.take_records(doc);
        for entry in entries {
            if entry.is_intersecting
                && !self.animated.contains(&entry.target)
                && !self.staggered.contains(&entry.target)
            {
                self.trigger(doc, entry.target);
            }
        }
    }

    /// Animate `element` unless it already has been. Elements holding an
    /// image that has not loaded wait for
    /// [`on_image_loaded`](Self::on_image_loaded).
    pub fn trigger(&mut self, doc: &mut Document, element: NodeId) {
        if !self.animated.insert(element) {
            return;
        }

        let img = doc.first_descendant_by_tag(element, "img");
        match img {
            Some(img) if !doc.has_class(img, LOADED_CLASS) => {
                match doc.image_state(img) {
                    Some(ImageLoad::Loaded { natural_height })
                        if natural_height > 0 =>
                    {
                        doc.add_class(img, LOADED_CLASS);
                        start_animation(doc, element);
                    }
                    _ => {
                        trace!(
                            element = element.index(),
                            "reveal waiting for image"
                        );
                        self.awaiting_image.push((img, element));
                    }
                }
            }
            _ => start_animation(doc, element),
        }
    }

    /// Release elements that were waiting on `img`.
    pub fn on_image_loaded(&mut self, doc: &mut Document, img: NodeId) -> bool {
        let (ready, waiting): (Vec<_>, Vec<_>) = self
            .awaiting_image
            .drain(..)
            .partition(|(waiting_on, _)| *waiting_on == img);
        self.awaiting_image = waiting;

        for (img, element) in &ready {
            doc.add_class(*img, LOADED_CLASS);
            start_animation(doc, *element);
        }
        !ready.is_empty()
    }

    /// Schedule reveal elements that are already in the viewport.
    pub fn trigger_initial(&mut self, doc: &Document) {
        for element in doc.elements_with_any_class(&REVEAL_CLASSES) {
            if self.animated.contains(&element)
                || self.staggered.contains(&element)
                || !doc.is_in_view(element)
            {
                continue;
            }
            let delay = self.initial_delay(doc, element);
            self.staggered.insert(element);
            self.timers.schedule(delay, RevealTask::Trigger(element));
        }
    }

    fn initial_delay(&self, doc: &Document, element: NodeId) -> Duration {
        let class_name = doc.class_name(element);
        DELAY_CLASS_REGEX
            .captures(&class_name)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .map(|n| self.options.delay_step.saturating_mul(n))
            .unwrap_or(self.options.default_delay)
    }

    /// React to inserted subtrees; a rescan runs after the rescan delay when
    /// any of them holds reveal elements.
    pub fn on_mutations(&mut self, doc: &Document, mutations: &[Mutation]) {
        let relevant = mutations.iter().any(|mutation| match mutation {
            Mutation::ChildAdded { child, .. } => {
                doc.has_any_class(*child, &REVEAL_CLASSES)
                    || doc
                        .descendants(*child)
                        .into_iter()
                        .any(|node| doc.has_any_class(node, &REVEAL_CLASSES))
            }
        });
        if relevant {
            debug!("reveal elements inserted; rescan scheduled");
            self.timers.schedule(self.options.rescan_delay, RevealTask::Rescan);
        }
    }

    pub fn advance(&mut self, doc: &mut Document, now: Duration) {
        for task in self.timers.advance(now) {
            match task {
                RevealTask::Trigger(element) => {
                    self.staggered.remove(&element);
                    self.trigger(doc, element);
                }
                RevealTask::Rescan => {
                    self.observe_elements(doc);
                    self.trigger_initial(doc);
                }
            }
        }
    }
}

fn start_animation(doc: &mut Document, element: NodeId) {
    if !doc.has_class(element, ANIMATE_CLASS) {
        doc.add_class(element, ANIMATE_CLASS);
    }
}
