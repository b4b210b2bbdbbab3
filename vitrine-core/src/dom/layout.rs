//! Vertical layout boxes and viewport geometry.

/// Vertical extent of an element in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub top: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(top: f32, height: f32) -> Self {
        Self {
            top,
            height: height.max(0.0),
        }
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// The visible window onto the document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scroll_y: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scroll_y: 0.0,
            height: 800.0,
        }
    }
}

impl Viewport {
    pub fn new(scroll_y: f32, height: f32) -> Self {
        Self { scroll_y, height }
    }

    /// `top < innerHeight && bottom > 0`, in viewport coordinates.
    pub fn contains(&self, rect: Rect) -> bool {
        let top = rect.top - self.scroll_y;
        let bottom = rect.bottom() - self.scroll_y;
        top < self.height && bottom > 0.0
    }

    /// Fraction of `rect` inside the viewport grown by `margin`.
    ///
    /// Zero-height boxes report 1.0 when they sit inside the root and 0.0
    /// otherwise.
    pub fn intersection_ratio(&self, rect: Rect, margin: RootMargin) -> f32 {
        let root_top = -margin.top;
        let root_bottom = self.height + margin.bottom;
        let top = rect.top - self.scroll_y;
        let bottom = rect.bottom() - self.scroll_y;

        if rect.height <= 0.0 {
            return if top >= root_top && top <= root_bottom {
                1.0
            } else {
                0.0
            };
        }

        let overlap = bottom.min(root_bottom) - top.max(root_top);
        (overlap / rect.height).clamp(0.0, 1.0)
    }
}

/// Vertical root margin, as in `rootMargin: "50px 0px -50px 0px"`.
/// Positive values grow the root, negative values shrink it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RootMargin {
    pub top: f32,
    pub bottom: f32,
}

impl RootMargin {
    pub const ZERO: RootMargin = RootMargin {
        top: 0.0,
        bottom: 0.0,
    };

    pub fn new(top: f32, bottom: f32) -> Self {
        Self { top, bottom }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_view_uses_strict_edges() {
        let vp = Viewport::new(0.0, 800.0);
        assert!(vp.contains(Rect::new(799.0, 10.0)));
        assert!(!vp.contains(Rect::new(800.0, 10.0)));
        assert!(!vp.contains(Rect::new(-10.0, 10.0)));
        let scrolled = Viewport::new(1000.0, 800.0);
        assert!(scrolled.contains(Rect::new(1500.0, 100.0)));
    }

    #[test]
    fn ratio_respects_shrunk_bottom_margin() {
        let vp = Viewport::new(0.0, 800.0);
        let margin = RootMargin::new(50.0, -50.0);
        // Root spans [-50, 750]; element spans [700, 800].
        let ratio = vp.intersection_ratio(Rect::new(700.0, 100.0), margin);
        assert!((ratio - 0.5).abs() < f32::EPSILON);
        assert_eq!(vp.intersection_ratio(Rect::new(760.0, 100.0), margin), 0.0);
        // Grown top margin keeps elements just above the fold.
        let above = vp.intersection_ratio(Rect::new(-100.0, 100.0), margin);
        assert!((above - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn zero_height_boxes_are_all_or_nothing() {
        let vp = Viewport::new(0.0, 800.0);
        let inside = Rect::new(10.0, 0.0);
        let below = Rect::new(900.0, 0.0);
        assert_eq!(vp.intersection_ratio(inside, RootMargin::ZERO), 1.0);
        assert_eq!(vp.intersection_ratio(below, RootMargin::ZERO), 0.0);
    }
}
