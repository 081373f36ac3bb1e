//! Autoplay: advance slides on a fixed interval while the page is visible.

use std::time::Duration;

use tracing::debug;

pub const DEFAULT_AUTOPLAY_INTERVAL: Duration = Duration::from_secs(6);

/// Page visibility as reported by the host (`visibilitychange`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum AutoplayState {
    #[default]
    Off,
    Running {
        elapsed: Duration,
    },
    /// Enabled, but the page is hidden. No time accrues.
    Suspended,
}

/// Interval clock for autoplay. It only decides *when* to advance; the
/// app decides *where* (next slide, or wrap to the first).
#[derive(Debug, Clone)]
pub struct Autoplay {
    state: AutoplayState,
    interval: Duration,
    visibility: Visibility,
}

impl Default for Autoplay {
    fn default() -> Self {
        Self::new(DEFAULT_AUTOPLAY_INTERVAL)
    }
}

impl Autoplay {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            state: AutoplayState::Off,
            interval,
            visibility: Visibility::Visible,
        }
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Autoplay has been switched on, whether or not it is ticking.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !matches!(self.state, AutoplayState::Off)
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(self.state, AutoplayState::Running { .. })
    }

    pub fn enable(&mut self) {
        if self.is_enabled() {
            return;
        }
        self.state = self.fresh_state();
        debug!(interval_ms = self.interval.as_millis(), "Autoplay enabled");
    }

    pub fn disable(&mut self) {
        self.state = AutoplayState::Off;
        debug!("Autoplay disabled");
    }

    /// Returns the new enabled state.
    pub fn toggle(&mut self) -> bool {
        if self.is_enabled() {
            self.disable();
        } else {
            self.enable();
        }
        self.is_enabled()
    }

    /// Hidden pages suspend autoplay; becoming visible again restarts the
    /// interval from zero, but only if autoplay was enabled.
    pub fn set_visibility(&mut self, visibility: Visibility) {
        if self.visibility == visibility {
            return;
        }
        self.visibility = visibility;
        if self.is_enabled() {
            self.state = self.fresh_state();
            debug!(?visibility, "Autoplay visibility changed");
        }
    }

    /// Accrue `delta`; returns `true` when an advance is due.
    pub fn tick(&mut self, delta: Duration) -> bool {
        let AutoplayState::Running { elapsed } = &mut self.state else {
            return false;
        };
        *elapsed = elapsed.saturating_add(delta);
        if *elapsed >= self.interval && !self.interval.is_zero() {
            // Drop any excess: one advance per interval, like setInterval
            // firing late after a long frame.
            *elapsed = Duration::ZERO;
            return true;
        }
        false
    }

    fn fresh_state(&self) -> AutoplayState {
        match self.visibility {
            Visibility::Visible => AutoplayState::Running {
                elapsed: Duration::ZERO,
            },
            Visibility::Hidden => AutoplayState::Suspended,
        }
    }
}
