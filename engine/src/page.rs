//! Page description: the deck markup and the scrolling content below it.
//!
//! A page is authored as TOML and built into a [`Page`]: slide markup for
//! the coordinator, sections for the section tracker, and content blocks
//! laid out top to bottom for the intersection observers. Every element
//! the engine tracks gets an [`ElementId`] here, in document order.
//!
//! ```toml
//! [controls]
//! previous = "Previous slide"
//! next = "Next slide"
//!
//! [[slides]]
//! id = "slide-1"
//! title = "Welcome"
//! body = ["First line"]
//! primary_action = "Get started"
//!
//! [[sections]]
//! id = "features"
//! title = "Features"
//!
//! [[sections.blocks]]
//! category = "feature-highlight"
//! text = "Fast"
//! ```

use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;

use vitrine_types::{ElementId, NonEmptyString};

use crate::animate::{Category, Observed};
use crate::deck::{DeckMarkup, NavButton, SlideElement};
use crate::sections::Section;
use crate::viewport::Layout;

/// Vertical space taken by a section heading, in CSS pixels.
pub const SECTION_HEADER_HEIGHT: f32 = 64.0;
/// Gap between consecutive blocks and sections.
pub const BLOCK_GAP: f32 = 24.0;
pub const DEFAULT_BLOCK_HEIGHT: f32 = 120.0;

#[derive(Debug, Error)]
pub enum DeckError {
    #[error("failed to parse page: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("duplicate element id {0:?}")]
    DuplicateId(String),
    #[error("block height must be positive, got {height} in section {section:?}")]
    InvalidHeight { section: String, height: f32 },
}

#[derive(Debug, Clone, Deserialize)]
pub struct PageSpec {
    #[serde(default)]
    pub controls: ControlsSpec,
    #[serde(default)]
    pub slides: Vec<SlideSpec>,
    #[serde(default)]
    pub sections: Vec<SectionSpec>,
}

/// Navigation chrome. Omitting a button reproduces a page whose markup
/// lacks it, which the deck rejects at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct ControlsSpec {
    pub previous: Option<String>,
    pub next: Option<String>,
    /// Defaults to one indicator per slide.
    pub indicators: Option<usize>,
    #[serde(default = "default_true")]
    pub progress_bar: bool,
}

impl Default for ControlsSpec {
    fn default() -> Self {
        Self {
            previous: Some("Previous slide".to_string()),
            next: Some("Next slide".to_string()),
            indicators: None,
            progress_bar: true,
        }
    }
}

const fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct SlideSpec {
    pub id: String,
    /// Heading text; blank headings fall back to a generic title.
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: Vec<String>,
    pub primary_action: Option<String>,
    #[serde(default = "default_true")]
    pub focusable_heading: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SectionSpec {
    pub id: String,
    pub title: NonEmptyString,
    #[serde(default)]
    pub blocks: Vec<BlockSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlockSpec {
    /// Blocks without a category are static.
    pub category: Option<Category>,
    pub text: String,
    pub height: Option<f32>,
    #[serde(default)]
    pub actions: Vec<String>,
}

/// A laid-out content block.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub id: ElementId,
    pub section: usize,
    pub category: Option<Category>,
    pub text: String,
    pub layout: Layout,
    pub actions: Vec<Action>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub id: ElementId,
    pub label: String,
}

/// Slide body text, outside the markup the coordinator manages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideBody {
    pub lines: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Page {
    pub markup: DeckMarkup,
    pub slide_bodies: Vec<SlideBody>,
    pub sections: Vec<Section>,
    pub section_layouts: Vec<Layout>,
    pub blocks: Vec<Block>,
    pub content_height: f32,
}

impl PageSpec {
    pub fn parse(source: &str) -> Result<Self, DeckError> {
        Ok(toml::from_str(source)?)
    }

    /// Assign element ids and lay out the content column.
    pub fn build(self) -> Result<Page, DeckError> {
        let mut seen = HashSet::new();
        for id in self
            .slides
            .iter()
            .map(|s| &s.id)
            .chain(self.sections.iter().map(|s| &s.id))
        {
            if !seen.insert(id.as_str()) {
                return Err(DeckError::DuplicateId(id.clone()));
            }
        }

        let indicator_count = self.controls.indicators.unwrap_or(self.slides.len());
        let mut slides = Vec::with_capacity(self.slides.len());
        let mut slide_bodies = Vec::with_capacity(self.slides.len());
        for spec in self.slides {
            let mut element = SlideElement::new(spec.id, &spec.title);
            if let Some(label) = spec.primary_action {
                element = element.with_primary_action(label);
            }
            if !spec.focusable_heading {
                element = element.without_focusable_heading();
            }
            slides.push(element);
            slide_bodies.push(SlideBody { lines: spec.body });
        }
        let markup = DeckMarkup {
            slides,
            previous: self.controls.previous.map(NavButton::new),
            next: self.controls.next.map(NavButton::new),
            indicator_count,
            has_progress_bar: self.controls.progress_bar,
        };

        let mut ids = IdAllocator::default();
        let mut sections = Vec::with_capacity(self.sections.len());
        let mut section_layouts = Vec::with_capacity(self.sections.len());
        let mut blocks = Vec::new();
        let mut y = 0.0_f32;

        for (index, spec) in self.sections.into_iter().enumerate() {
            let section_id = ids.next();
            let top = y;
            y += SECTION_HEADER_HEIGHT;
            for block in spec.blocks {
                let height = block.height.unwrap_or(DEFAULT_BLOCK_HEIGHT);
                if !(height.is_finite() && height > 0.0) {
                    return Err(DeckError::InvalidHeight {
                        section: spec.id,
                        height,
                    });
                }
                let id = ids.next();
                let actions = block
                    .actions
                    .into_iter()
                    .map(|label| Action {
                        id: ids.next(),
                        label,
                    })
                    .collect();
                blocks.push(Block {
                    id,
                    section: index,
                    category: block.category,
                    text: block.text,
                    layout: Layout { id, top: y, height },
                    actions,
                });
                y += height + BLOCK_GAP;
            }
            section_layouts.push(Layout {
                id: section_id,
                top,
                height: y - top,
            });
            sections.push(Section {
                element: section_id,
                dom_id: spec.id,
                title: spec.title,
            });
            y += BLOCK_GAP;
        }

        Ok(Page {
            markup,
            slide_bodies,
            sections,
            section_layouts,
            blocks,
            content_height: y,
        })
    }
}

impl Page {
    pub fn from_toml(source: &str) -> Result<Self, DeckError> {
        PageSpec::parse(source)?.build()
    }

    /// Blocks that carry an entrance animation, in document order.
    #[must_use]
    pub fn observed(&self) -> Vec<Observed> {
        self.blocks
            .iter()
            .filter_map(|block| {
                block.category.map(|category| Observed {
                    id: block.id,
                    category,
                    actions: block.actions.iter().map(|a| a.id).collect(),
                })
            })
            .collect()
    }

    #[must_use]
    pub fn block_layouts(&self) -> Vec<Layout> {
        self.blocks.iter().map(|b| b.layout).collect()
    }

    #[must_use]
    pub fn block(&self, id: ElementId) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    /// Find an element by its visible label: block text or action label.
    #[must_use]
    pub fn find_labelled(&self, label: &str) -> Option<ElementId> {
        self.blocks.iter().find_map(|block| {
            if block.text == label {
                return Some(block.id);
            }
            block
                .actions
                .iter()
                .find(|a| a.label == label)
                .map(|a| a.id)
        })
    }
}

#[derive(Debug, Default)]
struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    fn next(&mut self) -> ElementId {
        self.next += 1;
        ElementId::new(self.next)
    }
}
