//! Tracks which page section the reader is in.

use std::collections::HashMap;

use tracing::debug;

use vitrine_types::{ElementId, NonEmptyString, SectionChanged};

use crate::viewport::IntersectionEntry;

/// Minimum share, of the section or of the viewport, for a section to be a
/// candidate.
pub const SECTION_VISIBLE_RATIO: f32 = 0.5;

/// Thresholds the section observer reports at.
pub const SECTION_THRESHOLDS: [f32; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub element: ElementId,
    /// Markup id, used as the `sectionId` in events.
    pub dom_id: String,
    pub title: NonEmptyString,
}

#[derive(Debug, Default)]
pub struct SectionTracker {
    sections: Vec<Section>,
    /// Best of (own ratio, root ratio) per section, from the latest entry.
    scores: HashMap<ElementId, f32>,
    current: Option<usize>,
    pending: Vec<SectionChanged>,
}

impl SectionTracker {
    #[must_use]
    pub fn new(sections: Vec<Section>) -> Self {
        Self {
            sections,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Index of the current section, 0-based.
    #[must_use]
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    #[must_use]
    pub fn current_section(&self) -> Option<&Section> {
        self.current.and_then(|i| self.sections.get(i))
    }

    /// Fold observer entries into the ratio table and re-pick the current
    /// section. A change queues a `section:changed` notification.
    pub fn on_intersection(&mut self, entries: &[IntersectionEntry]) {
        let mut touched = false;
        for entry in entries {
            if self.sections.iter().any(|s| s.element == entry.target) {
                self.scores
                    .insert(entry.target, entry.ratio.max(entry.root_ratio));
                touched = true;
            }
        }
        if !touched {
            return;
        }

        // Earliest section wins ties: only a strictly larger score replaces it.
        let mut best: Option<(usize, f32)> = None;
        for (index, section) in self.sections.iter().enumerate() {
            let score = self.scores.get(&section.element).copied().unwrap_or(0.0);
            if score < SECTION_VISIBLE_RATIO {
                continue;
            }
            if best.is_none_or(|(_, s)| score > s) {
                best = Some((index, score));
            }
        }

        // No candidate keeps the previous section.
        let Some((index, _)) = best else {
            return;
        };
        if self.current == Some(index) {
            return;
        }
        self.current = Some(index);
        let section = &self.sections[index];
        debug!(index, id = %section.dom_id, "Section changed");
        self.pending.push(SectionChanged {
            section_index: index,
            section_id: section.dom_id.clone(),
            section_title: section.title.clone(),
        });
    }

    /// Take queued notifications.
    pub fn drain_events(&mut self) -> Vec<SectionChanged> {
        std::mem::take(&mut self.pending)
    }
}
