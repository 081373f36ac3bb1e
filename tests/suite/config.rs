//! Config files feeding the app.

use std::fs;
use std::time::Duration;

use tempfile::tempdir;
use vitrine_engine::{App, NavOutcome, ReducedMotion, VitrineConfig};

use crate::common::{current, page};

fn load(contents: &str) -> VitrineConfig {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, contents).unwrap();
    VitrineConfig::load_from(&path).unwrap().unwrap()
}

#[test]
fn reduced_motion_from_file_makes_navigation_synchronous() {
    let config = load("[motion]\nreduced_motion = true\n");
    let mut app = App::from_config(page(), &config);
    assert_eq!(app.reduced_motion(), ReducedMotion::Enabled);
    assert_eq!(app.next(), NavOutcome::Completed);
    assert_eq!(current(&app), 2);
}

#[test]
fn transition_length_comes_from_file() {
    let config = load("[slides]\ntransition_ms = 200\n");
    let mut app = App::from_config(page(), &config);
    assert_eq!(app.next(), NavOutcome::Started);
    app.tick(Duration::from_millis(199));
    assert!(app.slides().unwrap().is_transitioning());
    app.tick(Duration::from_millis(1));
    assert_eq!(current(&app), 2);
}

#[test]
fn swipe_threshold_comes_from_file() {
    let config = load("[slides]\nswipe_threshold_px = 120\n");
    let mut app = App::from_config(page(), &config);
    app.pointer_down(300.0);
    assert_eq!(app.pointer_up(200.0), None);
    app.pointer_down(300.0);
    assert!(app.pointer_up(100.0).is_some());
}

#[test]
fn autoplay_section_enables_autoplay() {
    let config = load("[autoplay]\nenabled = true\ninterval_ms = 500\n");
    let mut app = App::from_config(page(), &config);
    assert!(app.autoplay().is_enabled());
    app.tick(Duration::from_millis(500));
    assert!(app.slides().unwrap().is_transitioning());
}

#[test]
fn environment_override_beats_the_file() {
    let mut config = load("[motion]\nreduced_motion = true\n");
    config.apply_env_override(Some("0"));
    assert_eq!(config.reduced_motion(), ReducedMotion::Disabled);
}

#[test]
fn invalid_file_is_an_error_naming_the_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[slides]\ntransition_ms = \"slow\"\n").unwrap();
    let err = VitrineConfig::load_from(&path).unwrap_err();
    assert_eq!(err.path(), &path);
}
