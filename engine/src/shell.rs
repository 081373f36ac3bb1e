//! Page shell: listeners for the notifications the engine publishes.
//!
//! The [`App`](crate::App) drains coordinator and section events after each
//! operation and hands them to every registered [`PageListener`] in
//! registration order.

use tracing::{debug, warn};

use vitrine_types::{PageEvent, SlideNumber};

pub trait PageListener: Send {
    fn on_event(&mut self, event: &PageEvent);
}

/// Polite live region: the latest message a screen reader should speak.
#[derive(Debug, Default, Clone)]
pub struct Announcer {
    message: Option<String>,
}

impl Announcer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Message text for an event, if it is announced at all.
    #[must_use]
    pub fn text_for(event: &PageEvent) -> Option<String> {
        match event {
            PageEvent::SlideChanged(changed) => Some(format!(
                "Slide {} of {}: {}",
                changed.slide_number, changed.total_slides, changed.title
            )),
            PageEvent::SectionChanged(changed) => {
                Some(format!("Section: {}", changed.section_title))
            }
            PageEvent::SlideChanging(_) => None,
        }
    }
}

impl PageListener for Announcer {
    fn on_event(&mut self, event: &PageEvent) {
        if let Some(text) = Self::text_for(event) {
            self.message = Some(text);
        }
    }
}

const HASH_PREFIX: &str = "#slide-";

/// Location fragment for a slide.
#[must_use]
pub fn slide_hash(slide: SlideNumber) -> String {
    format!("{HASH_PREFIX}{slide}")
}

/// Parse `#slide-N` (the leading `#` is optional). Range checking against
/// the deck is left to the caller.
#[must_use]
pub fn parse_slide_hash(hash: &str) -> Option<usize> {
    let hash = hash.trim();
    let rest = hash.strip_prefix('#').unwrap_or(hash);
    rest.strip_prefix(&HASH_PREFIX[1..])?.parse().ok()
}

/// Mirrors the current slide into the location fragment.
#[derive(Debug, Default, Clone)]
pub struct LocationHash {
    hash: Option<String>,
}

impl LocationHash {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn hash(&self) -> Option<&str> {
        self.hash.as_deref()
    }
}

impl PageListener for LocationHash {
    fn on_event(&mut self, event: &PageEvent) {
        if let PageEvent::SlideChanged(changed) = event {
            self.hash = Some(slide_hash(changed.slide_number));
        }
    }
}

/// Writes every event as one JSON line to the debug log.
#[derive(Debug, Default, Clone, Copy)]
pub struct EventLog;

impl PageListener for EventLog {
    fn on_event(&mut self, event: &PageEvent) {
        match serde_json::to_string(event) {
            Ok(line) => debug!(target: "vitrine::events", event = event.name(), "{line}"),
            Err(e) => warn!(event = event.name(), "Failed to serialize event: {e}"),
        }
    }
}
