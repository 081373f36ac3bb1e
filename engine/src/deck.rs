//! Page-side model of the slide container.
//!
//! The deck mirrors the handful of DOM nodes the slide coordinator touches:
//! the slides themselves, the previous/next buttons, one indicator per
//! slide, an optional progress bar, and the document's focused element.
//! A host renders from it; the coordinator is the only writer.

use thiserror::Error;
use tracing::error;

use vitrine_types::{NonEmptyStaticStr, NonEmptyString, SlideNumber, SlideStyle};

const UNTITLED_SLIDE: NonEmptyStaticStr = NonEmptyStaticStr::new("Untitled slide");

/// One full-viewport content panel.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideElement {
    pub id: String,
    pub title: NonEmptyString,
    /// The slide heading carries `tabindex` and can take focus.
    pub focusable_heading: bool,
    pub primary_action: Option<String>,
    pub active: bool,
    pub aria_hidden: bool,
    /// Inline transition style; `None` outside a transition.
    pub style: Option<SlideStyle>,
}

impl SlideElement {
    /// A slide as parsed from markup: inactive, hidden, no inline style.
    #[must_use]
    pub fn new(id: impl Into<String>, heading_text: &str) -> Self {
        Self {
            id: id.into(),
            title: NonEmptyString::or_fallback(heading_text, UNTITLED_SLIDE),
            focusable_heading: true,
            primary_action: None,
            active: false,
            aria_hidden: true,
            style: None,
        }
    }

    #[must_use]
    pub fn with_primary_action(mut self, label: impl Into<String>) -> Self {
        self.primary_action = Some(label.into());
        self
    }

    #[must_use]
    pub fn without_focusable_heading(mut self) -> Self {
        self.focusable_heading = false;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NavButton {
    pub label: String,
    pub disabled: bool,
}

impl NavButton {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            disabled: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Indicator {
    pub active: bool,
    /// Accessible name, e.g. `"Slide 3 (current)"`.
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProgressBar {
    /// Fill fraction in `0.0..=1.0`.
    pub fill: f32,
}

impl ProgressBar {
    /// CSS width of the fill, e.g. `"50%"`.
    #[must_use]
    pub fn width_css(&self) -> String {
        format!("{}%", (self.fill * 100.0).round())
    }
}

/// The document's focused element, as far as the deck cares.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Focus {
    /// Nothing in particular: `document.activeElement === document.body`.
    #[default]
    Body,
    /// A text input or text area; slide keyboard shortcuts are suppressed.
    TextField,
    /// Any other control, by accessible name.
    Control(String),
    SlideHeading(SlideNumber),
    SlideAction(SlideNumber),
}

impl Focus {
    #[must_use]
    pub fn is_body(&self) -> bool {
        matches!(self, Self::Body)
    }

    #[must_use]
    pub fn is_text_entry(&self) -> bool {
        matches!(self, Self::TextField)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonSide {
    Previous,
    Next,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InitError {
    #[error("slide container is missing or has no slides")]
    MissingContainer,
    #[error("{0:?} navigation button is missing")]
    MissingButton(ButtonSide),
    #[error("found {indicators} indicators for {slides} slides")]
    IndicatorMismatch { indicators: usize, slides: usize },
}

/// Raw markup as discovered at startup, before validation.
#[derive(Debug, Clone, Default)]
pub struct DeckMarkup {
    pub slides: Vec<SlideElement>,
    pub previous: Option<NavButton>,
    pub next: Option<NavButton>,
    pub indicator_count: usize,
    pub has_progress_bar: bool,
}

/// Validated slide container.
#[derive(Debug, Clone)]
pub struct Deck {
    // A `None` slot is a slide element that has been removed from the page.
    slides: Vec<Option<SlideElement>>,
    previous: NavButton,
    next: NavButton,
    indicators: Vec<Indicator>,
    progress: Option<ProgressBar>,
    focus: Focus,
}

impl Deck {
    /// Validate markup. Failures are reported once at `error` level; the
    /// caller is expected to run without a slide coordinator afterwards.
    pub fn from_markup(markup: DeckMarkup) -> Result<Self, InitError> {
        let result = Self::validate(markup);
        if let Err(err) = &result {
            error!("Slide deck unavailable: {err}");
        }
        result
    }

    fn validate(markup: DeckMarkup) -> Result<Self, InitError> {
        if markup.slides.is_empty() {
            return Err(InitError::MissingContainer);
        }
        let previous = markup
            .previous
            .ok_or(InitError::MissingButton(ButtonSide::Previous))?;
        let next = markup
            .next
            .ok_or(InitError::MissingButton(ButtonSide::Next))?;
        if markup.indicator_count != markup.slides.len() {
            return Err(InitError::IndicatorMismatch {
                indicators: markup.indicator_count,
                slides: markup.slides.len(),
            });
        }

        let indicators = (1..=markup.indicator_count)
            .map(|n| Indicator {
                active: false,
                label: format!("Slide {n}"),
            })
            .collect();

        Ok(Self {
            slides: markup.slides.into_iter().map(Some).collect(),
            previous,
            next,
            indicators,
            progress: markup.has_progress_bar.then(ProgressBar::default),
            focus: Focus::Body,
        })
    }

    #[must_use]
    pub fn total_slides(&self) -> usize {
        self.slides.len()
    }

    #[must_use]
    pub fn slide(&self, number: SlideNumber) -> Option<&SlideElement> {
        self.slides.get(number.index()).and_then(Option::as_ref)
    }

    pub(crate) fn slide_mut(&mut self, number: SlideNumber) -> Option<&mut SlideElement> {
        self.slides.get_mut(number.index()).and_then(Option::as_mut)
    }

    /// Slides still attached to the page, with their numbers.
    pub fn slides(&self) -> impl Iterator<Item = (SlideNumber, &SlideElement)> {
        let total = self.slides.len();
        self.slides.iter().enumerate().filter_map(move |(index, slot)| {
            let slide = slot.as_ref()?;
            let number = SlideNumber::new(index + 1, total).ok()?;
            Some((number, slide))
        })
    }

    pub(crate) fn slides_mut(&mut self) -> impl Iterator<Item = (usize, &mut SlideElement)> {
        self.slides
            .iter_mut()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_mut().map(|slide| (index + 1, slide)))
    }

    /// Remove a slide element from the page, as a script or extension might.
    pub fn detach_slide(&mut self, number: SlideNumber) -> Option<SlideElement> {
        self.slides.get_mut(number.index()).and_then(Option::take)
    }

    #[must_use]
    pub fn previous_button(&self) -> &NavButton {
        &self.previous
    }

    #[must_use]
    pub fn next_button(&self) -> &NavButton {
        &self.next
    }

    pub(crate) fn buttons_mut(&mut self) -> (&mut NavButton, &mut NavButton) {
        (&mut self.previous, &mut self.next)
    }

    #[must_use]
    pub fn indicators(&self) -> &[Indicator] {
        &self.indicators
    }

    pub(crate) fn indicators_mut(&mut self) -> &mut [Indicator] {
        &mut self.indicators
    }

    #[must_use]
    pub fn progress(&self) -> Option<&ProgressBar> {
        self.progress.as_ref()
    }

    pub(crate) fn progress_mut(&mut self) -> Option<&mut ProgressBar> {
        self.progress.as_mut()
    }

    #[must_use]
    pub fn focus(&self) -> &Focus {
        &self.focus
    }

    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
    }
}
