//! Core domain types for Vitrine.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application: the engine
//! state machines, the terminal host, and tests.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory
#![allow(clippy::missing_panics_doc)] // Panics are documented in assertions

mod events;
mod motion;
mod slide;
pub mod ui;
mod visual;

pub use events::{PageEvent, SectionChanged, SlideChanged, SlideChanging};
pub use motion::{MotionPreference, ReducedMotion};
pub use slide::{Direction, SlideNumber, SlideRangeError};
pub use visual::{Rect, SlideStyle, Transform, VisualState};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;
use thiserror::Error;

// ============================================================================
// NonEmpty String Types
// ============================================================================

/// A string guaranteed to be non-empty (after trimming).
///
/// Used for slide and section titles, which end up in screen-reader
/// announcements and must never read as silence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NonEmptyString(String);

#[derive(Debug, Error)]
#[error("title must not be empty")]
pub struct EmptyStringError;

impl NonEmptyString {
    /// Build from raw heading text. Surrounding whitespace is trimmed and
    /// inner runs of whitespace collapse to a single space, the way
    /// `textContent` of a heading reads once rendered.
    pub fn new(value: impl Into<String>) -> Result<Self, EmptyStringError> {
        let value = value.into();
        let collapsed = value.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() {
            Err(EmptyStringError)
        } else {
            Ok(Self(collapsed))
        }
    }

    /// Like [`NonEmptyString::new`], falling back to `fallback` for blank input.
    #[must_use]
    pub fn or_fallback(value: impl Into<String>, fallback: NonEmptyStaticStr) -> Self {
        Self::new(value).unwrap_or_else(|_| Self(fallback.as_str().to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for NonEmptyString {
    type Error = EmptyStringError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for NonEmptyString {
    type Error = EmptyStringError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

impl Deref for NonEmptyString {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl AsRef<str> for NonEmptyString {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for NonEmptyString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A compile-time checked non-empty static string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NonEmptyStaticStr(&'static str);

impl NonEmptyStaticStr {
    #[must_use]
    pub const fn new(value: &'static str) -> Self {
        assert!(!value.is_empty(), "NonEmptyStaticStr must not be empty");
        Self(value)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl TryFrom<NonEmptyStaticStr> for NonEmptyString {
    type Error = EmptyStringError;

    fn try_from(value: NonEmptyStaticStr) -> Result<Self, Self::Error> {
        Self::new(value.0)
    }
}

// ============================================================================
// Element identity
// ============================================================================

/// Stable identifier for a page element tracked by the engine.
///
/// Assigned once when the page model is built; never reused within a page
/// lifetime, so it is safe to key once-only bookkeeping on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(u32);

impl ElementId {
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#e{}", self.0)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_string_rejects_empty() {
        assert!(NonEmptyString::new("").is_err());
        assert!(NonEmptyString::new("   ").is_err());
        assert!(NonEmptyString::new("hello").is_ok());
    }

    #[test]
    fn non_empty_string_collapses_whitespace() {
        let title = NonEmptyString::new("  Private\n   by   default ").unwrap();
        assert_eq!(title.as_str(), "Private by default");
    }

    #[test]
    fn or_fallback_uses_fallback_for_blank() {
        const UNTITLED: NonEmptyStaticStr = NonEmptyStaticStr::new("Untitled");
        assert_eq!(NonEmptyString::or_fallback("\t", UNTITLED).as_str(), "Untitled");
        assert_eq!(NonEmptyString::or_fallback("Roadmap", UNTITLED).as_str(), "Roadmap");
    }

    #[test]
    fn non_empty_string_deserialize_rejects_blank() {
        let parsed: Result<NonEmptyString, _> = serde_json::from_str("\"  \"");
        assert!(parsed.is_err());
    }

    #[test]
    fn element_id_display() {
        assert_eq!(ElementId::new(7).to_string(), "#e7");
    }
}
