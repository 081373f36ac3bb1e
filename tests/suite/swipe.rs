//! Pointer swipes and keyboard shortcuts driving the deck.

use vitrine_engine::slides::TRANSITION_DURATION;
use vitrine_engine::{Focus, Key, NavOutcome};

use crate::common::{app, current};

#[test]
fn left_swipe_on_slide_two_moves_to_three() {
    let mut app = app();
    let _ = app.go_to(2);
    app.tick(TRANSITION_DURATION);

    app.pointer_down(400.0);
    assert_eq!(app.pointer_up(320.0), Some(NavOutcome::Started));
    app.tick(TRANSITION_DURATION);
    assert_eq!(current(&app), 3);
}

#[test]
fn right_swipe_goes_back() {
    let mut app = app();
    let _ = app.go_to(2);
    app.tick(TRANSITION_DURATION);

    app.pointer_down(100.0);
    let _ = app.pointer_up(200.0);
    app.tick(TRANSITION_DURATION);
    assert_eq!(current(&app), 1);
}

#[test]
fn exactly_the_threshold_is_not_a_swipe() {
    let mut app = app();
    app.pointer_down(200.0);
    assert_eq!(app.pointer_up(150.0), None);
    assert_eq!(current(&app), 1);
}

#[test]
fn cancelled_drag_does_nothing() {
    let mut app = app();
    app.pointer_down(400.0);
    app.pointer_cancel();
    assert_eq!(app.pointer_up(100.0), None);
    assert_eq!(current(&app), 1);
}

#[test]
fn end_and_home_jump_to_the_ends() {
    let mut app = app();
    assert!(app.handle_key(Key::End));
    app.tick(TRANSITION_DURATION);
    assert_eq!(current(&app), 6);
    assert!(app.handle_key(Key::Home));
    app.tick(TRANSITION_DURATION);
    assert_eq!(current(&app), 1);
}

#[test]
fn typing_in_the_newsletter_field_does_not_navigate() {
    let mut app = app();
    app.set_focus(Focus::TextField);
    assert!(!app.handle_key(Key::ArrowRight));
    assert!(!app.handle_key(Key::Space));
    app.tick(TRANSITION_DURATION);
    assert_eq!(current(&app), 1);
}

#[test]
fn focus_follows_the_new_slide_from_body() {
    let mut app = app();
    assert!(app.handle_key(Key::ArrowDown));
    app.tick(TRANSITION_DURATION);
    assert!(matches!(app.focus(), Focus::SlideHeading(n) if n.get() == 2));
}
