//! Section tracking while scrolling through sections taller than the screen.

use vitrine_engine::{App, AppOptions, PageEvent};

use crate::common::{Recorder, app_with};

/// About 25 terminal rows: every fixture section is more than twice as tall.
const SHORT_VIEWPORT: f32 = 400.0;
const STEP: f32 = 25.0;

fn short_app() -> App {
    app_with(AppOptions {
        viewport_height: SHORT_VIEWPORT,
        ..AppOptions::default()
    })
}

fn section_ids(recorder: &Recorder) -> Vec<String> {
    recorder
        .events()
        .into_iter()
        .filter_map(|event| match event {
            PageEvent::SectionChanged(changed) => Some(changed.section_id),
            PageEvent::SlideChanging(_) | PageEvent::SlideChanged(_) => None,
        })
        .collect()
}

fn walk(app: &mut App, steps: impl Iterator<Item = u16>) -> Vec<Option<String>> {
    steps
        .map(|step| {
            app.scroll_to(f32::from(step) * STEP);
            app.current_section().map(|s| s.dom_id.clone())
        })
        .collect()
}

#[test]
fn tall_sections_become_current() {
    let mut app = short_app();
    for section in &app.page().section_layouts {
        assert!(section.height > 2.0 * SHORT_VIEWPORT);
    }
    assert_eq!(app.current_section().unwrap().dom_id, "features");

    let recorder = Recorder::attach(&mut app);
    let seen = walk(&mut app, 0..=90);

    assert!(seen.iter().all(Option::is_some), "{seen:?}");
    assert_eq!(seen.first().unwrap().as_deref(), Some("features"));
    assert_eq!(seen.last().unwrap().as_deref(), Some("more"));
    assert_eq!(section_ids(&recorder), vec!["more"]);
    assert_eq!(app.announcement(), Some("Section: More"));
}

#[test]
fn scrolling_back_up_returns_to_the_first_section() {
    let mut app = short_app();
    let recorder = Recorder::attach(&mut app);

    walk(&mut app, 0..=90);
    let seen = walk(&mut app, (0..=90).rev());

    assert!(seen.iter().all(Option::is_some), "{seen:?}");
    assert_eq!(seen.last().unwrap().as_deref(), Some("features"));
    assert_eq!(section_ids(&recorder), vec!["more", "features"]);
}
