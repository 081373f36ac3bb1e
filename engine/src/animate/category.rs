//! Entrance motion per content category.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use vitrine_types::ui::{Easing, Keyframes};
use vitrine_types::{Transform, VisualState};

/// Content categories that get an entrance animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    FeatureHighlight,
    RoadmapStep,
    UseCaseCard,
    Card,
    SupportFeature,
    MockupPanel,
    CallToAction,
}

impl Category {
    pub const ALL: [Self; 7] = [
        Self::FeatureHighlight,
        Self::RoadmapStep,
        Self::UseCaseCard,
        Self::Card,
        Self::SupportFeature,
        Self::MockupPanel,
        Self::CallToAction,
    ];

    /// Class selector identifying the category in page markup.
    #[must_use]
    pub const fn selector(self) -> &'static str {
        match self {
            Self::FeatureHighlight => ".feature-highlight",
            Self::RoadmapStep => ".roadmap-step",
            Self::UseCaseCard => ".use-case-card",
            Self::Card => ".card",
            Self::SupportFeature => ".support-feature",
            Self::MockupPanel => ".mockup-panel",
            Self::CallToAction => ".cta-section",
        }
    }

    #[must_use]
    pub fn motion(self) -> CategoryMotion {
        let ms = Duration::from_millis;
        match self {
            Self::FeatureHighlight => CategoryMotion {
                start: Transform::translate(0.0, 30.0),
                duration: ms(600),
                stagger: STAGGER,
                shape: Shape::Settle,
            },
            Self::RoadmapStep => CategoryMotion {
                start: Transform::translate(-30.0, 0.0),
                duration: ms(600),
                stagger: STAGGER,
                shape: Shape::Settle,
            },
            Self::UseCaseCard => CategoryMotion {
                start: Transform::translate(0.0, 40.0).with_scale(0.95),
                duration: ms(700),
                stagger: STAGGER,
                shape: Shape::Settle,
            },
            Self::Card => CategoryMotion {
                start: Transform::translate(0.0, 20.0),
                duration: ms(500),
                stagger: Duration::ZERO,
                shape: Shape::Direct,
            },
            Self::SupportFeature => CategoryMotion {
                start: Transform::translate(20.0, 0.0),
                duration: ms(500),
                stagger: STAGGER,
                shape: Shape::Settle,
            },
            Self::MockupPanel => CategoryMotion {
                start: Transform::scale(0.9),
                duration: ms(800),
                stagger: Duration::ZERO,
                shape: Shape::Direct,
            },
            Self::CallToAction => CategoryMotion {
                start: Transform::translate(0.0, 30.0),
                duration: ms(600),
                stagger: Duration::ZERO,
                shape: Shape::Direct,
            },
        }
    }

    /// Whether elements of this category reveal their actions after the
    /// container has landed.
    #[must_use]
    pub const fn chains_actions(self) -> bool {
        matches!(self, Self::CallToAction)
    }
}

/// Delay added per list position in index-staggered categories.
pub const STAGGER: Duration = Duration::from_millis(150);

/// Per-action delay for call-to-action buttons.
pub const ACTION_STAGGER: Duration = Duration::from_millis(100);

pub const ACTION_DURATION: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Start to rest.
    Direct,
    /// Start, a slight overshoot past rest, then rest.
    Settle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryMotion {
    pub start: Transform,
    pub duration: Duration,
    pub stagger: Duration,
    pub shape: Shape,
}

impl CategoryMotion {
    /// The hidden state an element holds until its entrance plays.
    #[must_use]
    pub fn initial(&self) -> VisualState {
        VisualState::hidden(self.start)
    }

    #[must_use]
    pub fn keyframes(&self) -> Keyframes {
        match self.shape {
            Shape::Direct => Keyframes::two(self.initial(), VisualState::RESTING, Easing::EaseOut),
            Shape::Settle => {
                let s = self.start;
                let overshoot = Transform {
                    translate_x: -0.15 * s.translate_x,
                    translate_y: -0.15 * s.translate_y,
                    scale_x: 1.0 + 0.2 * (1.0 - s.scale_x),
                    scale_y: 1.0 + 0.2 * (1.0 - s.scale_y),
                };
                Keyframes::three(
                    self.initial(),
                    (0.6, VisualState::new(0.9, overshoot)),
                    VisualState::RESTING,
                    Easing::EaseOut,
                )
            }
        }
    }

    /// Start delay for the element at `index` within its category.
    #[must_use]
    pub fn delay_for(&self, index: usize) -> Duration {
        self.stagger.saturating_mul(u32::try_from(index).unwrap_or(u32::MAX))
    }
}

/// Scale-in for call-to-action buttons.
#[must_use]
pub fn action_keyframes() -> Keyframes {
    Keyframes::two(
        VisualState::hidden(Transform::scale(0.8)),
        VisualState::RESTING,
        Easing::Overshoot,
    )
}
