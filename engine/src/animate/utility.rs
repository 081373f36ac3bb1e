//! Short-lived effects for click handlers and other ad hoc feedback.

use std::time::Duration;

use vitrine_types::ui::{Easing, Keyframes, Stop};
use vitrine_types::{Rect, Transform, VisualState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

impl Side {
    const DISTANCE: f32 = 100.0;

    fn offset(self) -> Transform {
        match self {
            Self::Left => Transform::translate(-Self::DISTANCE, 0.0),
            Self::Right => Transform::translate(Self::DISTANCE, 0.0),
            Self::Top => Transform::translate(0.0, -Self::DISTANCE),
            Self::Bottom => Transform::translate(0.0, Self::DISTANCE),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UtilityEffect {
    Pulse,
    Shake,
    Bounce,
    FadeIn,
    FadeOut,
    SlideIn(Side),
    ScaleIn,
    /// Move and resize the target from its own box onto another element's.
    Morph { from: Rect, to: Rect },
}

impl UtilityEffect {
    #[must_use]
    pub fn duration(&self) -> Duration {
        let ms = match self {
            Self::Pulse | Self::Bounce => 600,
            Self::Shake | Self::SlideIn(_) | Self::Morph { .. } => 500,
            Self::FadeIn | Self::FadeOut | Self::ScaleIn => 400,
        };
        Duration::from_millis(ms)
    }

    #[must_use]
    pub fn keyframes(&self) -> Keyframes {
        let rest = VisualState::RESTING;
        let at = |dx: f32, dy: f32| VisualState::new(1.0, Transform::translate(dx, dy));
        match *self {
            Self::Pulse => Keyframes::three(
                rest,
                (0.5, VisualState::new(1.0, Transform::scale(1.05))),
                rest,
                Easing::EaseInOut,
            ),
            Self::Shake => track(
                &[
                    (0.0, rest),
                    (0.2, at(-10.0, 0.0)),
                    (0.4, at(10.0, 0.0)),
                    (0.6, at(-10.0, 0.0)),
                    (0.8, at(10.0, 0.0)),
                    (1.0, rest),
                ],
                Easing::Linear,
            ),
            Self::Bounce => track(
                &[
                    (0.0, rest),
                    (0.3, at(0.0, -12.0)),
                    (0.6, rest),
                    (0.8, at(0.0, -4.0)),
                    (1.0, rest),
                ],
                Easing::Linear,
            ),
            Self::FadeIn => Keyframes::two(
                VisualState::hidden(Transform::IDENTITY),
                rest,
                Easing::EaseOut,
            ),
            Self::FadeOut => Keyframes::two(
                rest,
                VisualState::hidden(Transform::IDENTITY),
                Easing::EaseOut,
            ),
            Self::SlideIn(side) => {
                Keyframes::two(VisualState::hidden(side.offset()), rest, Easing::EaseOut)
            }
            Self::ScaleIn => Keyframes::two(
                VisualState::hidden(Transform::scale(0.0)),
                rest,
                Easing::Overshoot,
            ),
            Self::Morph { from, to } => Keyframes::two(
                rest,
                VisualState::new(1.0, from.transform_to(to)),
                Easing::Standard,
            ),
        }
    }
}

fn track(stops: &[(f32, VisualState)], easing: Easing) -> Keyframes {
    let stops: Vec<Stop> = stops
        .iter()
        .map(|&(offset, state)| Stop { offset, state })
        .collect();
    // Offsets are literal and ordered.
    let fallback = stops.first().map_or(VisualState::RESTING, |s| s.state);
    Keyframes::from_stops(stops, easing)
        .unwrap_or_else(|_| Keyframes::two(fallback, fallback, Easing::Linear))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [UtilityEffect; 8] = [
        UtilityEffect::Pulse,
        UtilityEffect::Shake,
        UtilityEffect::Bounce,
        UtilityEffect::FadeIn,
        UtilityEffect::FadeOut,
        UtilityEffect::SlideIn(Side::Left),
        UtilityEffect::ScaleIn,
        UtilityEffect::Morph {
            from: Rect::new(0.0, 0.0, 10.0, 10.0),
            to: Rect::new(10.0, 0.0, 20.0, 10.0),
        },
    ];

    #[test]
    fn feedback_effects_return_to_rest() {
        for effect in [UtilityEffect::Pulse, UtilityEffect::Shake, UtilityEffect::Bounce] {
            let track = effect.keyframes();
            assert!(track.first().is_resting(), "{effect:?}");
            assert!(track.last().is_resting(), "{effect:?}");
            assert!(!track.sample(0.25).is_resting(), "{effect:?}");
        }
    }

    #[test]
    fn shake_has_five_segments() {
        assert_eq!(UtilityEffect::Shake.keyframes().len(), 6);
    }

    #[test]
    fn fade_out_ends_hidden() {
        let track = UtilityEffect::FadeOut.keyframes();
        assert!(track.last().opacity.abs() < f32::EPSILON);
    }

    #[test]
    fn morph_lands_on_target_box() {
        let from = Rect::new(0.0, 0.0, 100.0, 40.0);
        let to = Rect::new(50.0, 20.0, 200.0, 40.0);
        let end = UtilityEffect::Morph { from, to }.keyframes().last();
        assert!((end.transform.translate_x - 50.0).abs() < 1e-4);
        assert!((end.transform.translate_y - 20.0).abs() < 1e-4);
        assert!((end.transform.scale_x - 2.0).abs() < 1e-4);
    }

    #[test]
    fn every_effect_has_a_duration() {
        for effect in ALL {
            assert!(!effect.duration().is_zero(), "{effect:?}");
        }
    }
}
