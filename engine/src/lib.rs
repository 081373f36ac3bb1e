//! Core engine for Vitrine - page state machines without rendering.
//!
//! This crate owns every piece of client-side behaviour the page has:
//!
//! - **Slides**: [`SlideCoordinator`] serializes transitions and keeps the
//!   buttons, indicators, progress bar, ARIA flags and focus consistent
//! - **Input**: keyboard mapping and pointer swipes ([`input`])
//! - **Autoplay**: interval advancing that pauses while the page is hidden
//! - **Entrance animations**: [`Animator`] plays each category's entrance
//!   once when its element scrolls into view, and utility effects on demand
//! - **Sections**: which part of the page the reader is in
//! - **Shell**: announcements, the location hash and the event log
//!
//! The host (`vitrine_tui`) reads state from [`App`] and forwards input and
//! frame ticks back to it. Time only moves when the host calls
//! [`App::tick`], so every behaviour is reproducible in tests.

pub mod animate;
mod app;
pub mod autoplay;
mod config;
pub mod deck;
pub mod input;
pub mod page;
pub mod sections;
pub mod shell;
pub mod slides;
pub mod viewport;

pub use animate::{AnimationHandle, Animator, Category, Observed, Side, UtilityEffect};
pub use app::{App, AppOptions, CONTENT_BOTTOM_MARGIN, CONTENT_THRESHOLD, DEFAULT_VIEWPORT_HEIGHT};
pub use autoplay::{Autoplay, Visibility};
pub use config::{
    AutoplayConfig, ConfigError, MotionConfig, REDUCED_MOTION_ENV, SlidesConfig, VitrineConfig,
    config_path,
};
pub use deck::{Deck, DeckMarkup, Focus, Indicator, InitError, NavButton, ProgressBar, SlideElement};
pub use input::{Key, SlideCommand, SwipeTracker};
pub use page::{DeckError, Page, PageSpec};
pub use sections::{Section, SectionTracker};
pub use shell::{Announcer, EventLog, LocationHash, PageListener};
pub use slides::{IgnoreReason, NavOutcome, SlideCoordinator, TransitionError};

pub use vitrine_types::{
    Direction, ElementId, MotionPreference, NonEmptyString, PageEvent, ReducedMotion, SlideNumber,
    SlideStyle, Transform, VisualState,
};
