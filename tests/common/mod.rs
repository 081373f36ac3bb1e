//! Shared test utilities and fixtures
//!
//! Common infrastructure for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use vitrine_engine::{App, AppOptions, Page, PageEvent, PageListener, ReducedMotion};

/// Six slides over a content column with one block of every category.
pub const SIX_SLIDE_PAGE: &str = r#"
[[slides]]
id = "slide-1"
title = "Welcome"
primary_action = "Get started"

[[slides]]
id = "slide-2"
title = "Search"

[[slides]]
id = "slide-3"
title = "Offline"

[[slides]]
id = "slide-4"
title = "Open"

[[slides]]
id = "slide-5"
title = "Teams"

[[slides]]
id = "slide-6"
title = "Download"

[[sections]]
id = "features"
title = "Features"

[[sections.blocks]]
category = "feature-highlight"
text = "Fast"
height = 300

[[sections.blocks]]
category = "feature-highlight"
text = "Private"
height = 300

[[sections.blocks]]
category = "mockup-panel"
text = "Preview"
height = 300

[[sections]]
id = "more"
title = "More"

[[sections.blocks]]
category = "use-case-card"
text = "Notebooks"

[[sections.blocks]]
category = "card"
text = "Journals"

[[sections.blocks]]
category = "roadmap-step"
text = "Plugins"

[[sections.blocks]]
category = "support-feature"
text = "Forum"

[[sections.blocks]]
category = "call-to-action"
text = "Join"
height = 200
actions = ["Download", "Donate"]

[[sections.blocks]]
text = "Footer"
height = 600
"#;

pub fn page() -> Page {
    Page::from_toml(SIX_SLIDE_PAGE).expect("fixture page is valid")
}

pub fn app() -> App {
    App::new(page(), AppOptions::default())
}

pub fn app_with(options: AppOptions) -> App {
    App::new(page(), options)
}

pub fn reduced_app() -> App {
    app_with(AppOptions {
        reduced_motion: ReducedMotion::Enabled,
        ..AppOptions::default()
    })
}

pub fn current(app: &App) -> usize {
    app.slides().expect("deck is valid").current().get()
}

/// Listener that keeps every event it sees.
#[derive(Clone, Default)]
pub struct Recorder(Arc<Mutex<Vec<PageEvent>>>);

impl Recorder {
    /// Register a fresh recorder with `app`.
    pub fn attach(app: &mut App) -> Self {
        let recorder = Self::default();
        app.subscribe(Box::new(recorder.clone()));
        recorder
    }

    pub fn events(&self) -> Vec<PageEvent> {
        self.0.lock().expect("recorder lock").clone()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.events().iter().map(PageEvent::name).collect()
    }

    pub fn clear(&self) {
        self.0.lock().expect("recorder lock").clear();
    }
}

impl PageListener for Recorder {
    fn on_event(&mut self, event: &PageEvent) {
        self.0.lock().expect("recorder lock").push(event.clone());
    }
}
