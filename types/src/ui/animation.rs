use std::time::Duration;

pub(crate) fn normalized_progress(elapsed: Duration, duration: Duration) -> f32 {
    if duration.is_zero() {
        return 1.0;
    }

    let elapsed = elapsed.as_secs_f32();
    let total = duration.as_secs_f32();
    (elapsed / total).clamp(0.0, 1.0)
}

/// Where an effect is in its lifetime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimPhase {
    /// Still inside the start delay (stagger); the first keyframe applies.
    Pending,
    Running { progress: f32 },
    Completed,
}

/// Delta-driven clock for a single effect.
///
/// The host advances it with the elapsed frame time. Because the timer is
/// the animation's own clock, "finished" and "visually at the last frame"
/// can never disagree.
#[derive(Debug, Clone)]
pub struct EffectTimer {
    elapsed: Duration,
    delay: Duration,
    duration: Duration,
}

impl EffectTimer {
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self::delayed(Duration::ZERO, duration)
    }

    #[must_use]
    pub fn delayed(delay: Duration, duration: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            delay,
            duration,
        }
    }

    pub fn advance(&mut self, delta: Duration) {
        self.elapsed = self.elapsed.saturating_add(delta);
    }

    /// Jump to the end.
    pub fn finish(&mut self) {
        self.elapsed = self.total();
    }

    #[must_use]
    pub fn total(&self) -> Duration {
        self.delay.saturating_add(self.duration)
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Linear progress through the active (post-delay) part, in `0.0..=1.0`.
    #[must_use]
    pub fn progress(&self) -> f32 {
        match self.elapsed.checked_sub(self.delay) {
            Some(active) => normalized_progress(active, self.duration),
            None => 0.0,
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.total()
    }

    #[must_use]
    pub fn phase(&self) -> AnimPhase {
        if self.is_finished() {
            AnimPhase::Completed
        } else if self.elapsed < self.delay {
            AnimPhase::Pending
        } else {
            AnimPhase::Running {
                progress: self.progress(),
            }
        }
    }
}
