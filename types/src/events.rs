//! Page-level notifications emitted by the slide coordinator and the
//! section tracker.
//!
//! The names and payload shapes match the custom events the page shell
//! listens for (`slide:changing`, `slide:changed`, `section:changed`), so a
//! serialised event can be forwarded verbatim to a browser host.

use serde::{Deserialize, Serialize};

use crate::{NonEmptyString, SlideNumber};

/// Fired when a transition starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideChanging {
    pub from: SlideNumber,
    pub to: SlideNumber,
}

/// Fired when a transition has completed and dependent UI is consistent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideChanged {
    pub slide_number: SlideNumber,
    pub total_slides: usize,
    pub title: NonEmptyString,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionChanged {
    pub section_index: usize,
    pub section_id: String,
    pub section_title: NonEmptyString,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "detail")]
pub enum PageEvent {
    #[serde(rename = "slide:changing")]
    SlideChanging(SlideChanging),
    #[serde(rename = "slide:changed")]
    SlideChanged(SlideChanged),
    #[serde(rename = "section:changed")]
    SectionChanged(SectionChanged),
}

impl PageEvent {
    /// The DOM event name this notification corresponds to.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SlideChanging(_) => "slide:changing",
            Self::SlideChanged(_) => "slide:changed",
            Self::SectionChanged(_) => "section:changed",
        }
    }
}
