//! Scroll-triggered entrance animations and utility effects.
//!
//! The [`Animator`] owns the inline style of every element it animates.
//! Entrance animations fire once per element per page load: the first
//! intersecting entry dispatches it, later entries are ignored. The
//! once-only record lives in a map keyed by [`ElementId`].
//!
//! Reduced motion is read from the injected [`MotionPreference`] on every
//! call. When it is on, each animation request writes the resting state
//! directly and leaves nothing running; when it flips on mid-session, every
//! running animation is cancelled before the call proceeds.

mod category;
mod utility;

pub use category::{
    ACTION_DURATION, ACTION_STAGGER, Category, CategoryMotion, STAGGER, Shape, action_keyframes,
};
pub use utility::{Side, UtilityEffect};

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use tracing::debug;

use vitrine_types::ui::{AnimPhase, EffectTimer, Keyframes};
use vitrine_types::{ElementId, MotionPreference, ReducedMotion, VisualState};

use crate::viewport::IntersectionEntry;

/// Identifies one running animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationHandle(u64);

/// An element registered for entrance tracking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observed {
    pub id: ElementId,
    pub category: Category,
    /// Buttons revealed after a call-to-action container lands.
    pub actions: Vec<ElementId>,
}

#[derive(Debug, Clone)]
struct Tracked {
    category: Category,
    index: usize,
    actions: Vec<ElementId>,
    has_animated: bool,
}

#[derive(Debug, Clone)]
enum Followup {
    RevealActions(Vec<ElementId>),
}

#[derive(Debug, Clone)]
struct Running {
    handle: AnimationHandle,
    target: ElementId,
    keyframes: Keyframes,
    timer: EffectTimer,
    then: Option<Followup>,
}

#[derive(Debug)]
pub struct Animator {
    motion: MotionPreference,
    last_motion: ReducedMotion,
    elements: HashSet<ElementId>,
    tracked: HashMap<ElementId, Tracked>,
    per_category: HashMap<Category, usize>,
    styles: HashMap<ElementId, VisualState>,
    running: Vec<Running>,
    next_handle: u64,
    entrances: usize,
}

impl Animator {
    #[must_use]
    pub fn new(motion: MotionPreference) -> Self {
        let last_motion = motion.get();
        Self {
            motion,
            last_motion,
            elements: HashSet::new(),
            tracked: HashMap::new(),
            per_category: HashMap::new(),
            styles: HashMap::new(),
            running: Vec::new(),
            next_handle: 0,
            entrances: 0,
        }
    }

    /// Make an element known without tracking its visibility, so utility
    /// effects can target it.
    pub fn attach(&mut self, id: ElementId) {
        self.elements.insert(id);
    }

    /// Forget an element that left the document. Pending work on it is
    /// dropped without a final frame.
    pub fn detach(&mut self, id: ElementId) {
        self.elements.remove(&id);
        self.tracked.remove(&id);
        self.styles.remove(&id);
        self.running.retain(|run| run.target != id);
    }

    /// Register elements for entrance tracking.
    ///
    /// Each element's index within its category is its registration order,
    /// which drives the stagger delay. Elements receive their hidden start
    /// state now so they do not flash before they scroll into view.
    pub fn observe(&mut self, elements: impl IntoIterator<Item = Observed>) {
        let reduced = self.sync_motion();
        for element in elements {
            if self.tracked.contains_key(&element.id) {
                debug!(id = %element.id, "Element already observed");
                continue;
            }
            let counter = self.per_category.entry(element.category).or_insert(0);
            let index = *counter;
            *counter += 1;

            let initial = if reduced {
                VisualState::RESTING
            } else {
                element.category.motion().initial()
            };
            self.elements.insert(element.id);
            self.styles.insert(element.id, initial);
            for &action in &element.actions {
                self.elements.insert(action);
                let state = if reduced {
                    VisualState::RESTING
                } else {
                    action_keyframes().first()
                };
                self.styles.insert(action, state);
            }
            self.tracked.insert(
                element.id,
                Tracked {
                    category: element.category,
                    index,
                    actions: element.actions,
                    has_animated: false,
                },
            );
        }
    }

    /// Visibility callback. Returns how many entrances were dispatched.
    pub fn on_intersection(&mut self, entries: &[IntersectionEntry]) -> usize {
        let reduced = self.sync_motion();
        let mut dispatched = 0;
        for entry in entries.iter().filter(|entry| entry.is_intersecting) {
            let Some(tracked) = self.tracked.get_mut(&entry.target) else {
                continue;
            };
            if tracked.has_animated {
                continue;
            }
            tracked.has_animated = true;
            let tracked = tracked.clone();
            self.entrances += 1;
            dispatched += 1;

            if reduced {
                self.styles.insert(entry.target, VisualState::RESTING);
                for &action in &tracked.actions {
                    self.styles.insert(action, VisualState::RESTING);
                }
                continue;
            }

            let motion = tracked.category.motion();
            let then = (tracked.category.chains_actions() && !tracked.actions.is_empty())
                .then(|| Followup::RevealActions(tracked.actions.clone()));
            self.start(
                entry.target,
                motion.keyframes(),
                EffectTimer::delayed(motion.delay_for(tracked.index), motion.duration),
                then,
            );
        }
        dispatched
    }

    /// Play a utility effect. Returns `None` when nothing was left running:
    /// the target is unknown, or reduced motion applied the resting state.
    pub fn play(&mut self, target: ElementId, effect: UtilityEffect) -> Option<AnimationHandle> {
        let reduced = self.sync_motion();
        if !self.elements.contains(&target) {
            debug!(%target, ?effect, "Skipping effect for missing element");
            return None;
        }
        if reduced {
            self.running.retain(|run| run.target != target);
            self.styles.insert(target, VisualState::RESTING);
            return None;
        }
        // A new effect replaces whatever the element was doing.
        self.running.retain(|run| run.target != target);
        Some(self.start(
            target,
            effect.keyframes(),
            EffectTimer::new(effect.duration()),
            None,
        ))
    }

    /// Drive running animations by one frame.
    pub fn advance(&mut self, delta: Duration) {
        if self.sync_motion() {
            return;
        }
        let mut finished = Vec::new();
        for run in &mut self.running {
            run.timer.advance(delta);
            let state = match run.timer.phase() {
                AnimPhase::Pending => run.keyframes.first(),
                AnimPhase::Running { progress } => run.keyframes.sample(progress),
                AnimPhase::Completed => {
                    finished.push(run.handle);
                    run.keyframes.last()
                }
            };
            self.styles.insert(run.target, state);
        }
        if finished.is_empty() {
            return;
        }

        let (done, still_running): (Vec<_>, Vec<_>) = self
            .running
            .drain(..)
            .partition(|run| finished.contains(&run.handle));
        self.running = still_running;
        for run in done {
            if let Some(Followup::RevealActions(actions)) = run.then {
                self.reveal_actions(&actions);
            }
        }
    }

    /// Cancel everything, leaving each affected element at rest.
    pub fn cancel_all(&mut self) {
        for run in std::mem::take(&mut self.running) {
            self.styles.insert(run.target, VisualState::RESTING);
            if let Some(Followup::RevealActions(actions)) = run.then {
                for action in actions {
                    self.styles.insert(action, VisualState::RESTING);
                }
            }
        }
    }

    /// Media-query change listener. Equivalent to what every other call
    /// does first, exposed so hosts can react without waiting for a frame.
    pub fn motion_changed(&mut self) {
        self.sync_motion();
    }

    #[must_use]
    pub fn style(&self, id: ElementId) -> Option<VisualState> {
        self.styles.get(&id).copied()
    }

    #[must_use]
    pub fn has_animated(&self, id: ElementId) -> bool {
        self.tracked.get(&id).is_some_and(|t| t.has_animated)
    }

    #[must_use]
    pub fn is_animating(&self, id: ElementId) -> bool {
        self.running.iter().any(|run| run.target == id)
    }

    #[must_use]
    pub fn running_count(&self) -> usize {
        self.running.len()
    }

    /// Entrance animations dispatched so far.
    #[must_use]
    pub fn entrances(&self) -> usize {
        self.entrances
    }

    fn reveal_actions(&mut self, actions: &[ElementId]) {
        for (index, &action) in actions.iter().enumerate() {
            if !self.elements.contains(&action) {
                debug!(%action, "Skipping reveal for missing action");
                continue;
            }
            let delay = ACTION_STAGGER.saturating_mul(u32::try_from(index).unwrap_or(u32::MAX));
            self.start(
                action,
                action_keyframes(),
                EffectTimer::delayed(delay, ACTION_DURATION),
                None,
            );
        }
    }

    fn start(
        &mut self,
        target: ElementId,
        keyframes: Keyframes,
        timer: EffectTimer,
        then: Option<Followup>,
    ) -> AnimationHandle {
        let handle = AnimationHandle(self.next_handle);
        self.next_handle += 1;
        self.styles.insert(target, keyframes.first());
        self.running.push(Running {
            handle,
            target,
            keyframes,
            timer,
            then,
        });
        handle
    }

    /// Re-read the preference; cancel running work if it just turned on.
    /// Returns whether reduced motion is in effect.
    fn sync_motion(&mut self) -> bool {
        let now = self.motion.get();
        if now != self.last_motion {
            debug!(?now, "Reduced-motion preference changed");
            self.last_motion = now;
            if now.is_enabled() {
                self.cancel_all();
            }
        }
        now.is_enabled()
    }
}
