//! The page as one state machine.
//!
//! [`App`] wires the slide coordinator, autoplay, pointer swipes, the
//! entrance animator and the section tracker to the inputs a host delivers:
//! key presses, pointer drags, scrolling, visibility and motion-preference
//! changes, and frame ticks. No rendering logic lives here.
//!
//! After every operation the app drains the events its components queued
//! and hands them, in order, to the announcer, the location hash and every
//! subscribed [`PageListener`].

use std::time::Duration;

use tracing::{debug, info};

use vitrine_types::{ElementId, MotionPreference, PageEvent, ReducedMotion};

use crate::animate::{AnimationHandle, Animator, UtilityEffect};
use crate::autoplay::{Autoplay, DEFAULT_AUTOPLAY_INTERVAL, Visibility};
use crate::config::VitrineConfig;
use crate::deck::{Deck, Focus, InitError};
use crate::input::{Key, SWIPE_THRESHOLD_PX, SlideCommand, SwipeTracker};
use crate::page::Page;
use crate::sections::{SECTION_THRESHOLDS, Section, SectionTracker};
use crate::shell::{Announcer, EventLog, LocationHash, PageListener, parse_slide_hash};
use crate::slides::{IgnoreReason, NavOutcome, SlideCoordinator, TRANSITION_DURATION};
use crate::viewport::{IntersectionObserver, Layout, Viewport};

/// Visible share at which content blocks start their entrance.
pub const CONTENT_THRESHOLD: f32 = 0.1;
/// Content must rise this far above the viewport bottom before it counts.
pub const CONTENT_BOTTOM_MARGIN: f32 = 50.0;
pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 800.0;

/// Runtime knobs, usually derived from [`VitrineConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct AppOptions {
    pub reduced_motion: ReducedMotion,
    pub transition: Duration,
    pub swipe_threshold: f32,
    pub autoplay: bool,
    pub autoplay_interval: Duration,
    pub viewport_height: f32,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            reduced_motion: ReducedMotion::Disabled,
            transition: TRANSITION_DURATION,
            swipe_threshold: SWIPE_THRESHOLD_PX,
            autoplay: false,
            autoplay_interval: DEFAULT_AUTOPLAY_INTERVAL,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
        }
    }
}

impl AppOptions {
    #[must_use]
    pub fn from_config(config: &VitrineConfig) -> Self {
        Self {
            reduced_motion: config.reduced_motion(),
            transition: config.transition_duration(),
            swipe_threshold: config.swipe_threshold(),
            autoplay: config.autoplay.enabled,
            autoplay_interval: config.autoplay_interval(),
            ..Self::default()
        }
    }
}

pub struct App {
    page: Page,
    /// `None` when the deck markup failed validation; navigation is inert.
    slides: Option<SlideCoordinator>,
    init_error: Option<InitError>,
    motion: MotionPreference,
    autoplay: Autoplay,
    swipe: SwipeTracker,
    animator: Animator,
    sections: SectionTracker,
    content_observer: IntersectionObserver,
    section_observer: IntersectionObserver,
    block_layouts: Vec<Layout>,
    viewport: Viewport,
    visibility: Visibility,
    // Focus when there is no deck to hold it.
    detached_focus: Focus,
    announcer: Announcer,
    location: LocationHash,
    listeners: Vec<Box<dyn PageListener>>,
    should_quit: bool,
}

impl App {
    #[must_use]
    pub fn new(page: Page, options: AppOptions) -> Self {
        let motion = MotionPreference::new(options.reduced_motion);

        let (slides, init_error) = match Deck::from_markup(page.markup.clone()) {
            Ok(deck) => {
                let coordinator =
                    SlideCoordinator::new(deck, motion.clone()).with_duration(options.transition);
                (Some(coordinator), None)
            }
            Err(err) => (None, Some(err)),
        };

        let mut autoplay = Autoplay::new(options.autoplay_interval);
        if options.autoplay {
            autoplay.enable();
        }

        let mut animator = Animator::new(motion.clone());
        animator.observe(page.observed());

        let mut app = Self {
            sections: SectionTracker::new(page.sections.clone()),
            block_layouts: page.block_layouts(),
            page,
            slides,
            init_error,
            motion,
            autoplay,
            swipe: SwipeTracker::with_threshold(options.swipe_threshold),
            animator,
            content_observer: IntersectionObserver::new(&[CONTENT_THRESHOLD], CONTENT_BOTTOM_MARGIN),
            section_observer: IntersectionObserver::new(&SECTION_THRESHOLDS, 0.0),
            viewport: Viewport::new(0.0, options.viewport_height.max(1.0)),
            visibility: Visibility::Visible,
            detached_focus: Focus::Body,
            announcer: Announcer::new(),
            location: LocationHash::new(),
            listeners: vec![Box::new(EventLog)],
            should_quit: false,
        };
        info!(
            slides = app.slides.as_ref().map_or(0, SlideCoordinator::total_slides),
            sections = app.page.sections.len(),
            reduced_motion = app.motion.is_reduced(),
            "Page initialized"
        );
        app.refresh_intersections();
        app
    }

    #[must_use]
    pub fn from_config(page: Page, config: &VitrineConfig) -> Self {
        Self::new(page, AppOptions::from_config(config))
    }

    /// Advance every clock by one frame.
    pub fn tick(&mut self, delta: Duration) {
        if let Some(slides) = self.slides.as_mut() {
            slides.advance(delta);
        }
        if self.autoplay.tick(delta) {
            self.autoplay_step();
        }
        self.animator.advance(delta);
        self.dispatch_events();
    }

    fn autoplay_step(&mut self) {
        let Some(slides) = self.slides.as_mut() else {
            return;
        };
        // Autoplay loops back to the start instead of stopping at the end.
        let outcome = if slides.is_last() {
            slides.go_to(1)
        } else {
            slides.next()
        };
        debug!(?outcome, "Autoplay advance");
    }

    /// Keyboard shortcut. Returns whether the key mapped to navigation on
    /// a live deck.
    pub fn handle_key(&mut self, key: Key) -> bool {
        if self.slides.is_none() {
            return false;
        }
        let Some(command) = SlideCommand::from_key(key, self.focus()) else {
            return false;
        };
        let _ = self.run(command);
        true
    }

    pub fn run(&mut self, command: SlideCommand) -> NavOutcome {
        let Some(slides) = self.slides.as_mut() else {
            return NavOutcome::Ignored(IgnoreReason::Inert);
        };
        let outcome = match command {
            SlideCommand::Previous => slides.previous(),
            SlideCommand::Next => slides.next(),
            SlideCommand::First => slides.first(),
            SlideCommand::Last => slides.last(),
        };
        self.dispatch_events();
        outcome
    }

    /// Navigate to slide `n` (1-based), as an indicator click does.
    pub fn go_to(&mut self, n: usize) -> NavOutcome {
        let Some(slides) = self.slides.as_mut() else {
            return NavOutcome::Ignored(IgnoreReason::Inert);
        };
        let outcome = slides.go_to(n);
        self.dispatch_events();
        outcome
    }

    pub fn next(&mut self) -> NavOutcome {
        self.run(SlideCommand::Next)
    }

    pub fn previous(&mut self) -> NavOutcome {
        self.run(SlideCommand::Previous)
    }

    /// Open on the slide named by a `#slide-N` fragment.
    pub fn restore_from_hash(&mut self, hash: &str) -> NavOutcome {
        match parse_slide_hash(hash) {
            Some(n) => self.go_to(n),
            None => NavOutcome::Ignored(IgnoreReason::OutOfRange),
        }
    }

    pub fn pointer_down(&mut self, x: f32) {
        self.swipe.begin(x);
    }

    pub fn pointer_up(&mut self, x: f32) -> Option<NavOutcome> {
        let command = self.swipe.finish(x)?;
        Some(self.run(command))
    }

    pub fn pointer_cancel(&mut self) {
        self.swipe.cancel();
    }

    pub fn set_visibility(&mut self, visibility: Visibility) {
        self.visibility = visibility;
        self.autoplay.set_visibility(visibility);
    }

    /// Media-query change. Running animations are cancelled when reduced
    /// motion turns on; an in-flight slide transition settles on the next
    /// frame.
    pub fn set_reduced_motion(&mut self, value: ReducedMotion) {
        let previous = self.motion.set(value);
        if previous != value {
            info!(reduced_motion = value.is_enabled(), "Motion preference changed");
            self.animator.motion_changed();
        }
    }

    pub fn toggle_reduced_motion(&mut self) -> ReducedMotion {
        let next = ReducedMotion::from_bool(!self.motion.is_reduced());
        self.set_reduced_motion(next);
        next
    }

    /// Returns the new enabled state.
    pub fn toggle_autoplay(&mut self) -> bool {
        self.autoplay.toggle()
    }

    pub fn set_focus(&mut self, focus: Focus) {
        match self.slides.as_mut() {
            Some(slides) => slides.set_focus(focus),
            None => self.detached_focus = focus,
        }
    }

    #[must_use]
    pub fn focus(&self) -> &Focus {
        self.slides
            .as_ref()
            .map_or(&self.detached_focus, |slides| slides.deck().focus())
    }

    /// Scroll the content column by `dy` pixels, clamped to the content.
    pub fn scroll_by(&mut self, dy: f32) {
        self.scroll_to(self.viewport.scroll_top + dy);
    }

    pub fn scroll_to(&mut self, top: f32) {
        let max = (self.page.content_height - self.viewport.height).max(0.0);
        let top = top.clamp(0.0, max);
        if (top - self.viewport.scroll_top).abs() < f32::EPSILON {
            return;
        }
        self.viewport.scroll_top = top;
        self.refresh_intersections();
    }

    pub fn resize(&mut self, height: f32) {
        self.viewport.height = height.max(1.0);
        self.scroll_by(0.0);
        self.refresh_intersections();
    }

    /// Play a utility effect on any page element.
    pub fn play_effect(
        &mut self,
        target: ElementId,
        effect: UtilityEffect,
    ) -> Option<AnimationHandle> {
        self.animator.play(target, effect)
    }

    /// Play a utility effect on the element with the given label.
    pub fn play_effect_on(&mut self, label: &str, effect: UtilityEffect) -> Option<AnimationHandle> {
        let Some(target) = self.page.find_labelled(label) else {
            debug!(label, "No element with that label");
            return None;
        };
        self.play_effect(target, effect)
    }

    pub fn subscribe(&mut self, listener: Box<dyn PageListener>) {
        self.listeners.push(listener);
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    #[must_use]
    pub fn page(&self) -> &Page {
        &self.page
    }

    #[must_use]
    pub fn slides(&self) -> Option<&SlideCoordinator> {
        self.slides.as_ref()
    }

    #[must_use]
    pub fn init_error(&self) -> Option<&InitError> {
        self.init_error.as_ref()
    }

    #[must_use]
    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    #[must_use]
    pub fn autoplay(&self) -> &Autoplay {
        &self.autoplay
    }

    #[must_use]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    #[must_use]
    pub fn reduced_motion(&self) -> ReducedMotion {
        self.motion.get()
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn announcement(&self) -> Option<&str> {
        self.announcer.message()
    }

    #[must_use]
    pub fn location_hash(&self) -> Option<&str> {
        self.location.hash()
    }

    #[must_use]
    pub fn current_section(&self) -> Option<&Section> {
        self.sections.current_section()
    }

    fn refresh_intersections(&mut self) {
        let entries = self
            .content_observer
            .update(self.viewport, &self.block_layouts);
        if !entries.is_empty() {
            let dispatched = self.animator.on_intersection(&entries);
            if dispatched > 0 {
                debug!(dispatched, "Entrance animations dispatched");
            }
        }

        let entries = self
            .section_observer
            .update(self.viewport, &self.page.section_layouts);
        if !entries.is_empty() {
            self.sections.on_intersection(&entries);
        }
        self.dispatch_events();
    }

    fn dispatch_events(&mut self) {
        let mut events = self
            .slides
            .as_mut()
            .map(SlideCoordinator::drain_events)
            .unwrap_or_default();
        events.extend(
            self.sections
                .drain_events()
                .into_iter()
                .map(PageEvent::SectionChanged),
        );
        for event in &events {
            self.announcer.on_event(event);
            self.location.on_event(event);
            for listener in &mut self.listeners {
                listener.on_event(event);
            }
        }
    }
}
