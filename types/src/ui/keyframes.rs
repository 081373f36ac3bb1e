//! Keyframe tracks for entrance and utility effects.

use thiserror::Error;

use super::Easing;
use crate::VisualState;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stop {
    pub offset: f32,
    pub state: VisualState,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyframesError {
    #[error("a keyframe track needs at least two stops")]
    TooFewStops,
    #[error("stops must start at 0.0 and end at 1.0")]
    OpenEnded,
    #[error("stop offsets must be strictly increasing")]
    Unordered,
}

/// Ordered visual states over normalised time, plus the easing applied to
/// the whole track.
#[derive(Debug, Clone, PartialEq)]
pub struct Keyframes {
    stops: Vec<Stop>,
    easing: Easing,
}

impl Keyframes {
    #[must_use]
    pub fn two(from: VisualState, to: VisualState, easing: Easing) -> Self {
        Self {
            stops: vec![
                Stop {
                    offset: 0.0,
                    state: from,
                },
                Stop {
                    offset: 1.0,
                    state: to,
                },
            ],
            easing,
        }
    }

    #[must_use]
    pub fn three(from: VisualState, mid: (f32, VisualState), to: VisualState, easing: Easing) -> Self {
        let offset = mid.0.clamp(0.01, 0.99);
        Self {
            stops: vec![
                Stop {
                    offset: 0.0,
                    state: from,
                },
                Stop {
                    offset,
                    state: mid.1,
                },
                Stop {
                    offset: 1.0,
                    state: to,
                },
            ],
            easing,
        }
    }

    pub fn from_stops(stops: Vec<Stop>, easing: Easing) -> Result<Self, KeyframesError> {
        if stops.len() < 2 {
            return Err(KeyframesError::TooFewStops);
        }
        let first = stops[0].offset;
        let last = stops[stops.len() - 1].offset;
        if first.abs() > f32::EPSILON || (last - 1.0).abs() > f32::EPSILON {
            return Err(KeyframesError::OpenEnded);
        }
        if stops.windows(2).any(|pair| pair[1].offset <= pair[0].offset) {
            return Err(KeyframesError::Unordered);
        }
        Ok(Self { stops, easing })
    }

    #[must_use]
    pub fn first(&self) -> VisualState {
        self.stops[0].state
    }

    #[must_use]
    pub fn last(&self) -> VisualState {
        self.stops[self.stops.len() - 1].state
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// State at linear progress `t`; easing is applied before locating the
    /// segment. Overshooting curves extrapolate the final segment.
    #[must_use]
    pub fn sample(&self, t: f32) -> VisualState {
        let eased = self.easing.apply(t);
        let Some(segment) = self
            .stops
            .windows(2)
            .find(|pair| eased <= pair[1].offset)
            .or_else(|| self.stops.windows(2).last())
        else {
            return self.last();
        };
        let (a, b) = (segment[0], segment[1]);
        let span = b.offset - a.offset;
        let local = if span > 0.0 {
            (eased - a.offset) / span
        } else {
            1.0
        };
        let state = a.state.lerp(b.state, local.max(0.0));
        VisualState {
            opacity: state.opacity.clamp(0.0, 1.0),
            ..state
        }
    }
}
