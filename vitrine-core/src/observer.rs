//! Intersection observation over the document model.

use crate::dom::{Document, NodeId, RootMargin};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverOptions {
    /// Minimum visible fraction for a target to count as intersecting.
    pub threshold: f32,
    pub root_margin: RootMargin,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            root_margin: RootMargin::ZERO,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub target: NodeId,
    pub ratio: f32,
    pub is_intersecting: bool,
}

/// Watches a set of targets and reports when each crosses the threshold.
///
/// Every newly observed target yields one initial entry on the next
/// [`take_records`](IntersectionObserver::take_records); after that only
/// changes are reported. Detached targets and targets without a layout box
/// count as not intersecting.
#[derive(Debug, Clone, Default)]
pub struct IntersectionObserver {
    options: ObserverOptions,
    targets: Vec<(NodeId, Option<bool>)>,
}

impl IntersectionObserver {
    pub fn new(options: ObserverOptions) -> Self {
        Self {
            options,
            targets: Vec::new(),
        }
    }

    pub fn options(&self) -> ObserverOptions {
        self.options
    }

    pub fn observe(&mut self, target: NodeId) {
        if !self.is_observing(target) {
            self.targets.push((target, None));
        }
    }

    pub fn unobserve(&mut self, target: NodeId) {
        self.targets.retain(|(t, _)| *t != target);
    }

    pub fn is_observing(&self, target: NodeId) -> bool {
        self.targets.iter().any(|(t, _)| *t == target)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn take_records(&mut self, doc: &Document) -> Vec<IntersectionEntry> {
        let viewport = doc.viewport();
        let ObserverOptions {
            threshold,
            root_margin,
        } = self.options;

        let mut records = Vec::new();
        for (target, last) in &mut self.targets {
            let ratio = match doc.rect(*target) {
                Some(rect) if doc.is_attached(*target) => {
                    viewport.intersection_ratio(rect, root_margin)
                }
                _ => 0.0,
            };
            let is_intersecting = ratio > 0.0 && ratio >= threshold;
            if *last != Some(is_intersecting) {
                *last = Some(is_intersecting);
                records.push(IntersectionEntry {
                    target: *target,
                    ratio,
                    is_intersecting,
                });
            }
        }
        records
    }
}
