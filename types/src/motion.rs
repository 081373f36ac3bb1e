//! Reduced-motion preference.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};

/// Whether the user asked for minimal motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReducedMotion {
    Enabled,
    #[default]
    Disabled,
}

impl ReducedMotion {
    #[must_use]
    pub const fn from_bool(enabled: bool) -> Self {
        if enabled {
            Self::Enabled
        } else {
            Self::Disabled
        }
    }

    #[must_use]
    pub const fn is_enabled(self) -> bool {
        matches!(self, Self::Enabled)
    }
}

/// Live handle to the reduced-motion preference.
///
/// Cloned into every component that animates. The host flips it whenever
/// the platform reports a change (media-query listener, settings toggle);
/// components read it on every animation call rather than caching it, so a
/// change takes effect on the very next call.
#[derive(Debug, Clone, Default)]
pub struct MotionPreference {
    reduced: Arc<AtomicBool>,
}

impl MotionPreference {
    #[must_use]
    pub fn new(initial: ReducedMotion) -> Self {
        Self {
            reduced: Arc::new(AtomicBool::new(initial.is_enabled())),
        }
    }

    #[must_use]
    pub fn get(&self) -> ReducedMotion {
        ReducedMotion::from_bool(self.reduced.load(Ordering::Relaxed))
    }

    /// Store a new value, returning the previous one.
    pub fn set(&self, value: ReducedMotion) -> ReducedMotion {
        ReducedMotion::from_bool(self.reduced.swap(value.is_enabled(), Ordering::Relaxed))
    }

    #[must_use]
    pub fn is_reduced(&self) -> bool {
        self.get().is_enabled()
    }
}
