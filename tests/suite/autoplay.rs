//! Autoplay with the page shown and hidden.

use std::time::Duration;

use vitrine_engine::slides::TRANSITION_DURATION;
use vitrine_engine::{AppOptions, Visibility};

use crate::common::{app_with, current};

const INTERVAL: Duration = Duration::from_secs(2);

fn autoplaying() -> vitrine_engine::App {
    app_with(AppOptions {
        autoplay: true,
        autoplay_interval: INTERVAL,
        ..AppOptions::default()
    })
}

#[test]
fn advances_once_per_interval() {
    let mut app = autoplaying();
    app.tick(INTERVAL - Duration::from_millis(1));
    assert_eq!(current(&app), 1);
    app.tick(Duration::from_millis(1));
    app.tick(TRANSITION_DURATION);
    assert_eq!(current(&app), 2);
}

#[test]
fn hidden_page_never_advances_and_resumes_on_return() {
    let mut app = autoplaying();
    app.tick(Duration::from_secs(1));
    app.set_visibility(Visibility::Hidden);
    for _ in 0..5 {
        app.tick(INTERVAL);
    }
    assert_eq!(current(&app), 1);

    // The interval restarts from zero when the page comes back.
    app.set_visibility(Visibility::Visible);
    app.tick(Duration::from_secs(1));
    assert!(!app.slides().unwrap().is_transitioning());
    assert_eq!(current(&app), 1);
    app.tick(Duration::from_secs(1));
    app.tick(TRANSITION_DURATION);
    assert_eq!(current(&app), 2);
}

#[test]
fn toggling_off_stops_advancing() {
    let mut app = autoplaying();
    assert!(!app.toggle_autoplay());
    for _ in 0..3 {
        app.tick(INTERVAL);
    }
    assert_eq!(current(&app), 1);
}
