//! Viewport geometry and intersection tracking.
//!
//! [`IntersectionObserver`] reproduces the part of the browser primitive the
//! page relies on: given the scroll position and each element's layout box,
//! it reports an entry only when an element crosses one of the configured
//! ratio thresholds. The first update reports every element.

use std::collections::HashMap;

use vitrine_types::ElementId;

/// Visible window onto the scrolling content, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scroll_top: f32,
    pub height: f32,
}

impl Viewport {
    #[must_use]
    pub const fn new(scroll_top: f32, height: f32) -> Self {
        Self { scroll_top, height }
    }

    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.scroll_top + self.height
    }
}

/// Vertical layout box of an element in content coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub id: ElementId,
    pub top: f32,
    pub height: f32,
}

impl Layout {
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Share of the box inside `[top, bottom)`, in `0.0..=1.0`.
    #[must_use]
    pub fn visible_ratio(&self, top: f32, bottom: f32) -> f32 {
        if self.height <= 0.0 {
            return if self.top >= top && self.top < bottom {
                1.0
            } else {
                0.0
            };
        }
        (self.visible_px(top, bottom) / self.height).clamp(0.0, 1.0)
    }

    /// Share of the window `[top, bottom)` this box covers, in `0.0..=1.0`.
    #[must_use]
    pub fn coverage(&self, top: f32, bottom: f32) -> f32 {
        let window = bottom - top;
        if window <= 0.0 {
            return 0.0;
        }
        (self.visible_px(top, bottom) / window).clamp(0.0, 1.0)
    }

    fn visible_px(&self, top: f32, bottom: f32) -> f32 {
        (self.bottom().min(bottom) - self.top.max(top)).max(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub target: ElementId,
    /// Meets the lowest threshold.
    pub is_intersecting: bool,
    pub ratio: f32,
    /// Share of the root the element covers. A box taller than the root
    /// can fill it while its own ratio stays low.
    pub root_ratio: f32,
}

#[derive(Debug, Clone)]
pub struct IntersectionObserver {
    thresholds: Vec<f32>,
    /// Pixels trimmed from the bottom of the viewport (a negative bottom
    /// root margin), so elements must rise a little into view.
    bottom_margin: f32,
    /// Last reported (own ratio, root ratio) buckets.
    buckets: HashMap<ElementId, (usize, usize)>,
}

impl IntersectionObserver {
    /// Thresholds are sorted and clamped to `0.0..=1.0`; an empty list means
    /// `[0.0]`.
    #[must_use]
    pub fn new(thresholds: &[f32], bottom_margin: f32) -> Self {
        let mut thresholds: Vec<f32> = thresholds.iter().map(|t| t.clamp(0.0, 1.0)).collect();
        thresholds.sort_by(f32::total_cmp);
        thresholds.dedup();
        if thresholds.is_empty() {
            thresholds.push(0.0);
        }
        Self {
            thresholds,
            bottom_margin: bottom_margin.max(0.0),
            buckets: HashMap::new(),
        }
    }

    fn bucket(&self, ratio: f32) -> usize {
        if ratio <= 0.0 {
            return 0;
        }
        self.thresholds.iter().filter(|&&t| ratio >= t).count()
    }

    /// Recompute intersections and return entries for elements whose own
    /// or root threshold bucket changed since the last update.
    pub fn update(&mut self, viewport: Viewport, layouts: &[Layout]) -> Vec<IntersectionEntry> {
        let top = viewport.scroll_top;
        let bottom = (viewport.bottom() - self.bottom_margin).max(top);
        let mut entries = Vec::new();

        for layout in layouts {
            let ratio = layout.visible_ratio(top, bottom);
            let root_ratio = layout.coverage(top, bottom);
            let bucket = (self.bucket(ratio), self.bucket(root_ratio));
            let previous = self.buckets.insert(layout.id, bucket);
            if previous != Some(bucket) {
                entries.push(IntersectionEntry {
                    target: layout.id,
                    is_intersecting: bucket.0 > 0,
                    ratio,
                    root_ratio,
                });
            }
        }
        entries
    }

    /// Stop tracking an element (it left the document).
    pub fn unobserve(&mut self, id: ElementId) {
        self.buckets.remove(&id);
    }
}
