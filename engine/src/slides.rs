//! Slide coordinator: the single authority for which slide is shown.
//!
//! # Transition lifecycle
//!
//! ```text
//! go_to(n) --accept--> Transitioning { from, to, timer } --advance()*--> settle
//!    |                        |                                           |
//!    |                  slide:changing                              slide:changed
//!    +--reject (range / current / in flight): no state change, no events
//! ```
//!
//! At most one transition is in flight. Requests issued while one runs are
//! dropped, not queued. `current` only moves when a transition settles.
//!
//! Both slides are driven by a single [`EffectTimer`]; the transition is
//! complete exactly when that timer completes, so the visual animation and
//! the completion signal share one clock and one duration.

use std::mem;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, error, warn};

use vitrine_types::ui::{AnimPhase, EffectTimer, Easing};
use vitrine_types::{
    Direction, MotionPreference, PageEvent, SlideChanged, SlideChanging, SlideNumber, SlideStyle,
};

use crate::deck::{Deck, Focus};

/// Duration of every slide transition.
pub const TRANSITION_DURATION: Duration = Duration::from_millis(600);

/// The one easing curve shared by outgoing and incoming slides.
pub const TRANSITION_EASING: Easing = Easing::Standard;

/// Why a navigation request was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The deck failed to initialise; navigation is inert.
    Inert,
    OutOfRange,
    AlreadyCurrent,
    Transitioning,
    AtBoundary,
}

/// Result of a navigation request. Callers are free to ignore it; the
/// page never surfaces navigation failures to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "navigation outcome reports whether the request was dropped"]
pub enum NavOutcome {
    /// A transition is now in flight.
    Started,
    /// The transition settled synchronously (reduced motion).
    Completed,
    Ignored(IgnoreReason),
    /// Accepted, then aborted because a slide element was missing.
    Aborted,
}

impl NavOutcome {
    #[must_use]
    pub fn is_accepted(self) -> bool {
        matches!(self, Self::Started | Self::Completed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("slide {0} is no longer in the document")]
    MissingSlide(SlideNumber),
}

#[derive(Debug, Clone)]
struct Transition {
    from: SlideNumber,
    to: SlideNumber,
    direction: Direction,
    timer: EffectTimer,
}

#[derive(Debug, Clone, Default)]
enum TransitionState {
    #[default]
    Idle,
    Running(Transition),
}

#[derive(Debug)]
pub struct SlideCoordinator {
    deck: Deck,
    current: SlideNumber,
    state: TransitionState,
    duration: Duration,
    motion: MotionPreference,
    events: Vec<PageEvent>,
}

impl SlideCoordinator {
    /// Take ownership of a validated deck and show slide 1.
    #[must_use]
    pub fn new(deck: Deck, motion: MotionPreference) -> Self {
        let mut coordinator = Self {
            deck,
            current: SlideNumber::FIRST,
            state: TransitionState::Idle,
            duration: TRANSITION_DURATION,
            motion,
            events: Vec::new(),
        };
        coordinator.mark_active(SlideNumber::FIRST);
        coordinator.refresh_dependents();
        coordinator
    }

    /// Override the transition duration (configuration).
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    #[must_use]
    pub fn current(&self) -> SlideNumber {
        self.current
    }

    #[must_use]
    pub fn total_slides(&self) -> usize {
        self.deck.total_slides()
    }

    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        matches!(self.state, TransitionState::Running(_))
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current.get() == self.total_slides()
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Focus moves made by the user go through here so the coordinator can
    /// tell deliberate focus from the resting body focus.
    pub fn set_focus(&mut self, focus: Focus) {
        self.deck.set_focus(focus);
    }

    /// Detach a slide element from the page. Exposed so hosts can mirror
    /// DOM removals; a later transition touching it aborts.
    pub fn detach_slide(&mut self, number: SlideNumber) {
        self.deck.detach_slide(number);
    }

    /// Take all queued page events, oldest first.
    pub fn drain_events(&mut self) -> Vec<PageEvent> {
        mem::take(&mut self.events)
    }

    pub fn next(&mut self) -> NavOutcome {
        if self.is_last() {
            return NavOutcome::Ignored(IgnoreReason::AtBoundary);
        }
        self.go_to(self.current.get() + 1)
    }

    pub fn previous(&mut self) -> NavOutcome {
        if self.current == SlideNumber::FIRST {
            return NavOutcome::Ignored(IgnoreReason::AtBoundary);
        }
        self.go_to(self.current.get() - 1)
    }

    pub fn first(&mut self) -> NavOutcome {
        self.go_to(1)
    }

    pub fn last(&mut self) -> NavOutcome {
        self.go_to(self.total_slides())
    }

    /// Request that slide `n` (1-based) become active.
    pub fn go_to(&mut self, n: usize) -> NavOutcome {
        let target = match SlideNumber::new(n, self.total_slides()) {
            Ok(target) => target,
            Err(err) => {
                warn!("Ignoring slide navigation: {err}");
                return NavOutcome::Ignored(IgnoreReason::OutOfRange);
            }
        };
        if target == self.current {
            return NavOutcome::Ignored(IgnoreReason::AlreadyCurrent);
        }
        if let TransitionState::Running(running) = &self.state {
            debug!(
                requested = target.get(),
                in_flight = running.to.get(),
                "Dropping slide navigation during transition"
            );
            return NavOutcome::Ignored(IgnoreReason::Transitioning);
        }

        let transition = Transition {
            from: self.current,
            to: target,
            direction: Direction::between(self.current, target),
            timer: EffectTimer::new(self.duration),
        };
        self.events.push(PageEvent::SlideChanging(SlideChanging {
            from: transition.from,
            to: transition.to,
        }));

        if let Err(err) = self.begin(&transition) {
            self.abort(&transition, &err);
            return NavOutcome::Aborted;
        }
        self.state = TransitionState::Running(transition);

        if self.motion.is_reduced() || self.duration.is_zero() {
            return match self.settle() {
                Ok(()) => NavOutcome::Completed,
                Err(_) => NavOutcome::Aborted,
            };
        }
        NavOutcome::Started
    }

    /// Drive the in-flight transition by one frame.
    pub fn advance(&mut self, delta: Duration) {
        let reduced = self.motion.is_reduced();
        let TransitionState::Running(transition) = &mut self.state else {
            return;
        };
        if reduced {
            transition.timer.finish();
        } else {
            transition.timer.advance(delta);
        }
        let transition = transition.clone();

        match transition.timer.phase() {
            AnimPhase::Completed => {
                // Errors are already logged by `settle`.
                let _ = self.settle();
            }
            AnimPhase::Pending => {}
            AnimPhase::Running { progress } => {
                if let Err(err) = self.apply_frame(&transition, progress) {
                    self.abort(&transition, &err);
                }
            }
        }
    }

    /// Pre-position the incoming slide off-screen on the side opposite the
    /// direction of travel.
    fn begin(&mut self, transition: &Transition) -> Result<(), TransitionError> {
        self.require(transition.from)?;
        self.require(transition.to)?;
        self.apply_frame(transition, 0.0)
    }

    fn apply_frame(&mut self, transition: &Transition, progress: f32) -> Result<(), TransitionError> {
        let eased = TRANSITION_EASING.apply(progress);
        let exit = transition.direction.exit_sign();

        let outgoing = self
            .deck
            .slide_mut(transition.from)
            .ok_or(TransitionError::MissingSlide(transition.from))?;
        outgoing.style = Some(SlideStyle::CENTERED.lerp(SlideStyle::off_screen(exit), eased));

        let incoming = self
            .deck
            .slide_mut(transition.to)
            .ok_or(TransitionError::MissingSlide(transition.to))?;
        incoming.style = Some(SlideStyle::off_screen(-exit).lerp(SlideStyle::CENTERED, eased));
        Ok(())
    }

    fn settle(&mut self) -> Result<(), TransitionError> {
        let TransitionState::Running(transition) = mem::take(&mut self.state) else {
            return Ok(());
        };

        if let Err(err) = self.require(transition.from).and(self.require(transition.to)) {
            self.abort(&transition, &err);
            return Err(err);
        }

        for number in [transition.from, transition.to] {
            if let Some(slide) = self.deck.slide_mut(number) {
                slide.style = None;
            }
        }
        self.mark_active(transition.to);
        self.current = transition.to;
        self.refresh_dependents();
        self.shift_focus();

        let title = self
            .deck
            .slide(self.current)
            .map(|slide| slide.title.clone())
            .ok_or(TransitionError::MissingSlide(self.current))?;
        self.events.push(PageEvent::SlideChanged(SlideChanged {
            slide_number: self.current,
            total_slides: self.total_slides(),
            title,
        }));
        Ok(())
    }

    fn abort(&mut self, transition: &Transition, err: &TransitionError) {
        error!(
            from = transition.from.get(),
            to = transition.to.get(),
            "Slide transition aborted: {err}"
        );
        for number in [transition.from, transition.to] {
            if let Some(slide) = self.deck.slide_mut(number) {
                slide.style = None;
            }
        }
        self.state = TransitionState::Idle;
    }

    fn require(&self, number: SlideNumber) -> Result<(), TransitionError> {
        self.deck
            .slide(number)
            .map(|_| ())
            .ok_or(TransitionError::MissingSlide(number))
    }

    /// Exactly one slide is active and not aria-hidden.
    fn mark_active(&mut self, active: SlideNumber) {
        for (n, slide) in self.deck.slides_mut() {
            let is_active = n == active.get();
            slide.active = is_active;
            slide.aria_hidden = !is_active;
        }
    }

    fn refresh_dependents(&mut self) {
        let current = self.current.get();
        let total = self.deck.total_slides();

        let (previous, next) = self.deck.buttons_mut();
        previous.disabled = current == 1;
        next.disabled = current == total;

        for (index, indicator) in self.deck.indicators_mut().iter_mut().enumerate() {
            let n = index + 1;
            indicator.active = n == current;
            indicator.label = if indicator.active {
                format!("Slide {n} (current)")
            } else {
                format!("Slide {n}")
            };
        }

        if let Some(progress) = self.deck.progress_mut() {
            progress.fill = current as f32 / total as f32;
        }
    }

    /// Move focus into the new slide, unless the user has put it somewhere.
    /// Focus this coordinator placed in an earlier slide follows along.
    fn shift_focus(&mut self) {
        let placed_here = match self.deck.focus() {
            Focus::Body => true,
            Focus::SlideHeading(n) | Focus::SlideAction(n) => *n != self.current,
            Focus::TextField | Focus::Control(_) => false,
        };
        if !placed_here {
            return;
        }
        let Some(slide) = self.deck.slide(self.current) else {
            return;
        };
        let target = if slide.focusable_heading {
            Some(Focus::SlideHeading(self.current))
        } else if slide.primary_action.is_some() {
            Some(Focus::SlideAction(self.current))
        } else {
            None
        };
        if let Some(focus) = target {
            self.deck.set_focus(focus);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::SlideElement;
    use crate::deck::tests::markup;
    use vitrine_types::ReducedMotion;

    fn coordinator(count: usize) -> SlideCoordinator {
        let deck = Deck::from_markup(markup(count)).unwrap();
        SlideCoordinator::new(deck, MotionPreference::new(ReducedMotion::Disabled))
    }

    fn settle(c: &mut SlideCoordinator) {
        c.advance(TRANSITION_DURATION);
    }

    fn slide(n: usize) -> SlideNumber {
        SlideNumber::new(n, 6).unwrap()
    }

    #[test]
    fn starts_on_first_slide() {
        let c = coordinator(6);
        assert_eq!(c.current(), SlideNumber::FIRST);
        assert!(c.deck().previous_button().disabled);
        assert!(!c.deck().next_button().disabled);
        let visible: Vec<_> = c
            .deck()
            .slides()
            .filter(|(_, s)| !s.aria_hidden)
            .map(|(n, _)| n)
            .collect();
        assert_eq!(visible, vec![SlideNumber::FIRST]);
    }

    #[test]
    fn go_to_runs_a_transition_then_settles() {
        let mut c = coordinator(6);
        assert_eq!(c.go_to(3), NavOutcome::Started);
        assert!(c.is_transitioning());
        assert_eq!(c.current(), SlideNumber::FIRST);
        assert_eq!(
            c.drain_events(),
            vec![PageEvent::SlideChanging(SlideChanging {
                from: slide(1),
                to: slide(3)
            })]
        );

        settle(&mut c);
        assert!(!c.is_transitioning());
        assert_eq!(c.current(), slide(3));
        let events = c.drain_events();
        assert_eq!(events.len(), 1);
        let PageEvent::SlideChanged(changed) = &events[0] else {
            panic!("expected slide:changed, got {events:?}");
        };
        assert_eq!(changed.slide_number, slide(3));
        assert_eq!(changed.total_slides, 6);
        assert_eq!(changed.title.as_str(), "Slide title 3");
    }

    #[test]
    fn forward_transition_moves_outgoing_left() {
        let mut c = coordinator(6);
        let _ = c.go_to(2);
        let incoming = c.deck().slide(slide(2)).unwrap().style.unwrap();
        assert!((incoming.offset_percent - 100.0).abs() < 1e-4);
        assert!(incoming.opacity.abs() < 1e-4);

        c.advance(TRANSITION_DURATION / 2);
        let outgoing = c.deck().slide(slide(1)).unwrap().style.unwrap();
        let incoming = c.deck().slide(slide(2)).unwrap().style.unwrap();
        assert!(outgoing.offset_percent < 0.0);
        assert!(incoming.offset_percent > 0.0 && incoming.offset_percent < 100.0);
        assert!(outgoing.opacity < 1.0);
        assert!(incoming.opacity > 0.0);
    }

    #[test]
    fn backward_transition_enters_from_left() {
        let mut c = coordinator(6);
        let _ = c.go_to(4);
        settle(&mut c);
        let _ = c.go_to(2);
        let incoming = c.deck().slide(slide(2)).unwrap().style.unwrap();
        assert!((incoming.offset_percent + 100.0).abs() < 1e-4);
    }

    #[test]
    fn inline_styles_cleared_after_settle() {
        let mut c = coordinator(6);
        let _ = c.go_to(2);
        settle(&mut c);
        assert!(c.deck().slides().all(|(_, s)| s.style.is_none()));
    }

    #[test]
    fn request_during_transition_is_dropped() {
        for first in 2..=6 {
            for second in (1..=6).filter(|&n| n != first) {
                let mut c = coordinator(6);
                assert_eq!(c.go_to(first), NavOutcome::Started);
                c.advance(Duration::from_millis(100));
                assert_eq!(
                    c.go_to(second),
                    NavOutcome::Ignored(IgnoreReason::Transitioning),
                    "{first} -> {second}"
                );
                settle(&mut c);
                assert_eq!(c.current(), slide(first), "{first} -> {second}");
                let changed: Vec<usize> = c
                    .drain_events()
                    .into_iter()
                    .filter_map(|e| match e {
                        PageEvent::SlideChanged(changed) => Some(changed.slide_number.get()),
                        _ => None,
                    })
                    .collect();
                assert_eq!(changed, vec![first], "{first} -> {second}");
            }
        }
    }

    #[test]
    fn same_target_is_a_no_op() {
        for n in 1..=6 {
            let mut c = coordinator(6);
            if n > 1 {
                let _ = c.go_to(n);
                settle(&mut c);
            }
            c.drain_events();
            assert_eq!(
                c.go_to(n),
                NavOutcome::Ignored(IgnoreReason::AlreadyCurrent),
                "slide {n}"
            );
            settle(&mut c);
            assert!(c.drain_events().is_empty(), "slide {n}");
            assert_eq!(c.current(), slide(n));
        }
    }

    #[test]
    fn out_of_range_is_rejected() {
        let mut c = coordinator(6);
        assert_eq!(c.go_to(0), NavOutcome::Ignored(IgnoreReason::OutOfRange));
        assert_eq!(c.go_to(7), NavOutcome::Ignored(IgnoreReason::OutOfRange));
        assert!(!c.is_transitioning());
        assert!(c.drain_events().is_empty());
    }

    #[test]
    fn boundaries_do_not_move() {
        let mut c = coordinator(2);
        assert_eq!(c.previous(), NavOutcome::Ignored(IgnoreReason::AtBoundary));
        let _ = c.next();
        settle(&mut c);
        c.drain_events();
        assert_eq!(c.next(), NavOutcome::Ignored(IgnoreReason::AtBoundary));
        assert!(c.drain_events().is_empty());
    }

    #[test]
    fn dependents_follow_current_slide() {
        let mut c = coordinator(6);
        let _ = c.go_to(3);
        settle(&mut c);

        let active: Vec<_> = c
            .deck()
            .indicators()
            .iter()
            .enumerate()
            .filter(|(_, i)| i.active)
            .map(|(index, _)| index + 1)
            .collect();
        assert_eq!(active, vec![3]);
        assert_eq!(c.deck().indicators()[2].label, "Slide 3 (current)");
        assert_eq!(c.deck().indicators()[0].label, "Slide 1");
        assert_eq!(c.deck().progress().unwrap().width_css(), "50%");
        assert_eq!(c.deck().slides().filter(|(_, s)| !s.aria_hidden).count(), 1);
        assert!(!c.deck().slide(slide(3)).unwrap().aria_hidden);
        assert!(!c.deck().previous_button().disabled);
        assert!(!c.deck().next_button().disabled);
    }

    #[test]
    fn focus_moves_to_heading_only_from_body() {
        let mut c = coordinator(6);
        let _ = c.go_to(2);
        settle(&mut c);
        assert_eq!(c.deck().focus(), &Focus::SlideHeading(slide(2)));

        let _ = c.next();
        settle(&mut c);
        assert_eq!(c.deck().focus(), &Focus::SlideHeading(slide(3)));

        c.set_focus(Focus::Control("Newsletter".to_string()));
        let _ = c.go_to(4);
        settle(&mut c);
        assert_eq!(c.deck().focus(), &Focus::Control("Newsletter".to_string()));
    }

    #[test]
    fn focus_falls_back_to_primary_action() {
        let mut m = markup(2);
        m.slides[1] = SlideElement::new("slide-2", "Download")
            .without_focusable_heading()
            .with_primary_action("Get the app");
        let deck = Deck::from_markup(m).unwrap();
        let mut c = SlideCoordinator::new(deck, MotionPreference::default());
        let _ = c.next();
        settle(&mut c);
        let two = SlideNumber::new(2, 2).unwrap();
        assert_eq!(c.deck().focus(), &Focus::SlideAction(two));
    }

    #[test]
    fn reduced_motion_settles_synchronously() {
        let deck = Deck::from_markup(markup(6)).unwrap();
        let mut c = SlideCoordinator::new(deck, MotionPreference::new(ReducedMotion::Enabled));
        assert_eq!(c.go_to(5), NavOutcome::Completed);
        assert!(!c.is_transitioning());
        assert_eq!(c.current(), slide(5));
        assert!(c.deck().slides().all(|(_, s)| s.style.is_none()));
        assert_eq!(c.drain_events().len(), 2);
    }

    #[test]
    fn reduced_motion_mid_transition_finishes_on_next_frame() {
        let motion = MotionPreference::new(ReducedMotion::Disabled);
        let deck = Deck::from_markup(markup(6)).unwrap();
        let mut c = SlideCoordinator::new(deck, motion.clone());
        let _ = c.go_to(2);
        motion.set(ReducedMotion::Enabled);
        c.advance(Duration::from_millis(1));
        assert!(!c.is_transitioning());
        assert_eq!(c.current(), slide(2));
    }

    #[test]
    fn missing_slide_aborts_without_advancing() {
        let mut c = coordinator(6);
        c.detach_slide(slide(4));
        assert_eq!(c.go_to(4), NavOutcome::Aborted);
        assert!(!c.is_transitioning());
        assert_eq!(c.current(), SlideNumber::FIRST);
        // The changing notification went out before the failure was found.
        let events = c.drain_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], PageEvent::SlideChanging(_)));
        // The coordinator keeps working for other targets.
        assert_eq!(c.go_to(2), NavOutcome::Started);
    }

    #[test]
    fn slide_removed_mid_transition_aborts() {
        let mut c = coordinator(6);
        let _ = c.go_to(2);
        c.advance(Duration::from_millis(100));
        c.detach_slide(slide(2));
        c.advance(Duration::from_millis(100));
        assert!(!c.is_transitioning());
        assert_eq!(c.current(), SlideNumber::FIRST);
        assert!(c.deck().slide(slide(1)).unwrap().style.is_none());
    }

    #[test]
    fn custom_duration_is_the_only_clock() {
        let deck = Deck::from_markup(markup(6)).unwrap();
        let mut c = SlideCoordinator::new(deck, MotionPreference::default())
            .with_duration(Duration::from_millis(200));
        let _ = c.next();
        c.advance(Duration::from_millis(199));
        assert!(c.is_transitioning());
        c.advance(Duration::from_millis(1));
        assert!(!c.is_transitioning());
    }
}
