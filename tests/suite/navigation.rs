//! Slide navigation end to end: ordering, no-ops and dependent UI.

use vitrine_engine::{App, IgnoreReason, NavOutcome, PageEvent, SlideNumber};
use vitrine_engine::slides::TRANSITION_DURATION;

use crate::common::{Recorder, app, current};

fn slide_events(recorder: &Recorder) -> Vec<&'static str> {
    recorder
        .names()
        .into_iter()
        .filter(|name| name.starts_with("slide:"))
        .collect()
}

fn assert_consistent(app: &App, k: usize) {
    let deck = app.slides().unwrap().deck();
    let active: Vec<usize> = deck
        .indicators()
        .iter()
        .enumerate()
        .filter(|(_, i)| i.active)
        .map(|(index, _)| index + 1)
        .collect();
    assert_eq!(active, vec![k]);

    let shown: Vec<SlideNumber> = deck
        .slides()
        .filter(|(_, slide)| !slide.aria_hidden)
        .map(|(n, _)| n)
        .collect();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].get(), k);

    let fill = deck.progress().unwrap().fill;
    assert!((fill - k as f32 / 6.0).abs() < 1e-6);
}

#[test]
fn next_five_times_reaches_the_last_slide() {
    let mut app = app();
    for _ in 0..5 {
        assert_eq!(app.next(), NavOutcome::Started);
        app.tick(TRANSITION_DURATION);
    }
    assert_eq!(current(&app), 6);

    let deck = app.slides().unwrap().deck();
    assert!(deck.next_button().disabled);
    assert!(!deck.previous_button().disabled);
    assert_eq!(deck.progress().unwrap().width_css(), "100%");
    assert_consistent(&app, 6);
}

#[test]
fn second_request_during_a_transition_is_dropped() {
    for first in 2..=6 {
        for second in (1..=6).filter(|&n| n != first) {
            let mut app = app();
            let recorder = Recorder::attach(&mut app);

            assert_eq!(app.go_to(first), NavOutcome::Started);
            assert_eq!(
                app.go_to(second),
                NavOutcome::Ignored(IgnoreReason::Transitioning),
                "{first} -> {second}"
            );
            app.tick(TRANSITION_DURATION);
            app.tick(TRANSITION_DURATION);

            assert_eq!(current(&app), first, "{first} -> {second}");
            assert_eq!(
                slide_events(&recorder),
                vec!["slide:changing", "slide:changed"],
                "{first} -> {second}"
            );
            assert_consistent(&app, first);
        }
    }
}

#[test]
fn repeating_the_current_slide_is_silent() {
    for n in 1..=6 {
        let mut app = app();
        if n > 1 {
            let _ = app.go_to(n);
            app.tick(TRANSITION_DURATION);
        }

        let recorder = Recorder::attach(&mut app);
        assert_eq!(
            app.go_to(n),
            NavOutcome::Ignored(IgnoreReason::AlreadyCurrent),
            "slide {n}"
        );
        app.tick(TRANSITION_DURATION);
        assert!(slide_events(&recorder).is_empty(), "slide {n}");
        assert_consistent(&app, n);
    }
}

#[test]
fn boundaries_do_not_move_or_emit() {
    let mut app = app();
    let recorder = Recorder::attach(&mut app);
    assert_eq!(app.previous(), NavOutcome::Ignored(IgnoreReason::AtBoundary));

    let _ = app.go_to(6);
    app.tick(TRANSITION_DURATION);
    recorder.clear();
    assert_eq!(app.next(), NavOutcome::Ignored(IgnoreReason::AtBoundary));
    app.tick(TRANSITION_DURATION);
    assert!(slide_events(&recorder).is_empty());
    assert_eq!(current(&app), 6);
}

#[test]
fn out_of_range_targets_are_ignored() {
    let mut app = app();
    assert_eq!(app.go_to(0), NavOutcome::Ignored(IgnoreReason::OutOfRange));
    assert_eq!(app.go_to(7), NavOutcome::Ignored(IgnoreReason::OutOfRange));
    assert_eq!(current(&app), 1);
}

#[test]
fn progress_is_half_way_on_slide_three() {
    let mut app = app();
    let _ = app.go_to(3);
    app.tick(TRANSITION_DURATION);
    assert_eq!(
        app.slides().unwrap().deck().progress().unwrap().width_css(),
        "50%"
    );
}

#[test]
fn changed_event_carries_position_and_title() {
    let mut app = app();
    let recorder = Recorder::attach(&mut app);
    let _ = app.go_to(2);
    app.tick(TRANSITION_DURATION);

    let changed = recorder
        .events()
        .into_iter()
        .find_map(|event| match event {
            PageEvent::SlideChanged(changed) => Some(changed),
            _ => None,
        })
        .unwrap();
    assert_eq!(changed.slide_number.get(), 2);
    assert_eq!(changed.total_slides, 6);
    assert_eq!(changed.title.as_str(), "Search");
    assert_eq!(app.announcement(), Some("Slide 2 of 6: Search"));
    assert_eq!(app.location_hash(), Some("#slide-2"));
}
