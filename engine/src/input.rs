//! Keyboard and swipe bindings for slide navigation.

use tracing::debug;

use crate::deck::Focus;

/// Horizontal displacement, in CSS pixels, a drag must exceed to count as
/// a swipe.
pub const SWIPE_THRESHOLD_PX: f32 = 50.0;

/// Keys the page reacts to, independent of any input backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    PageUp,
    PageDown,
    Space,
    Home,
    End,
    Char(char),
    Other,
}

/// Navigation intent decoded from an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideCommand {
    Previous,
    Next,
    First,
    Last,
}

impl SlideCommand {
    /// Map a key press to a navigation command.
    ///
    /// Returns `None` while focus sits in a text input or text area, so
    /// typing a space into the newsletter field never changes slides.
    #[must_use]
    pub fn from_key(key: Key, focus: &Focus) -> Option<Self> {
        if focus.is_text_entry() {
            return None;
        }
        match key {
            Key::ArrowUp | Key::ArrowLeft | Key::PageUp => Some(Self::Previous),
            Key::ArrowDown | Key::ArrowRight | Key::PageDown | Key::Space => Some(Self::Next),
            Key::Home => Some(Self::First),
            Key::End => Some(Self::Last),
            Key::Char(_) | Key::Other => None,
        }
    }
}

/// Tracks a single pointer drag from press to release.
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    start_x: Option<f32>,
    threshold: f32,
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl SwipeTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::with_threshold(SWIPE_THRESHOLD_PX)
    }

    #[must_use]
    pub fn with_threshold(threshold: f32) -> Self {
        Self {
            start_x: None,
            threshold: threshold.abs(),
        }
    }

    #[must_use]
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn begin(&mut self, x: f32) {
        self.start_x = Some(x);
    }

    pub fn cancel(&mut self) {
        self.start_x = None;
    }

    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.start_x.is_some()
    }

    /// End the drag at `x`. Dragging left reveals the next slide, dragging
    /// right the previous one; short drags are taps and do nothing.
    pub fn finish(&mut self, x: f32) -> Option<SlideCommand> {
        let start = self.start_x.take()?;
        let dx = x - start;
        if dx.abs() <= self.threshold {
            debug!(dx, "Drag below swipe threshold");
            return None;
        }
        Some(if dx < 0.0 {
            SlideCommand::Next
        } else {
            SlideCommand::Previous
        })
    }
}
