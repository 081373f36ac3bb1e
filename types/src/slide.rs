//! Slide ordinals and travel direction.

use std::fmt;
use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 1-based position of a slide within a deck of fixed size.
///
/// The only constructor checks the range against the deck size, so a
/// `SlideNumber` in hand is always a valid navigation target for the deck
/// it was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "usize", try_from = "usize")]
pub struct SlideNumber(NonZeroUsize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("slide {requested} is outside 1..={total}")]
pub struct SlideRangeError {
    pub requested: usize,
    pub total: usize,
}

impl SlideNumber {
    pub const FIRST: Self = Self(NonZeroUsize::MIN);

    pub fn new(n: usize, total: usize) -> Result<Self, SlideRangeError> {
        match NonZeroUsize::new(n) {
            Some(value) if n <= total => Ok(Self(value)),
            _ => Err(SlideRangeError {
                requested: n,
                total,
            }),
        }
    }

    /// The last slide of a deck with `total` slides.
    pub fn last(total: usize) -> Result<Self, SlideRangeError> {
        Self::new(total, total)
    }

    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }

    /// Zero-based position, for indexing into slide and indicator lists.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0.get() - 1
    }
}

impl From<SlideNumber> for usize {
    fn from(value: SlideNumber) -> Self {
        value.get()
    }
}

impl TryFrom<usize> for SlideNumber {
    type Error = SlideRangeError;

    /// Range-checks against `usize::MAX` only; deserialised numbers are
    /// re-validated against the deck by whoever consumes them.
    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value, usize::MAX)
    }
}

impl fmt::Display for SlideNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Direction of travel for a slide transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// `to > from` travels forward; everything else travels backward.
    #[must_use]
    pub fn between(from: SlideNumber, to: SlideNumber) -> Self {
        if to > from {
            Self::Forward
        } else {
            Self::Backward
        }
    }

    /// Sign of the horizontal offset the outgoing slide leaves towards.
    ///
    /// Forward travel pushes the outgoing slide off to the left (negative),
    /// and the incoming slide enters from the right.
    #[must_use]
    pub const fn exit_sign(self) -> f32 {
        match self {
            Self::Forward => -1.0,
            Self::Backward => 1.0,
        }
    }
}
