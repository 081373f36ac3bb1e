//! Scroll-triggered entrances, utility effects and reduced motion.

use std::time::Duration;

use vitrine_engine::{App, ElementId, ReducedMotion, UtilityEffect};

use crate::common::{app, reduced_app};

fn block(app: &App, text: &str) -> ElementId {
    app.page().find_labelled(text).unwrap()
}

fn settle(app: &mut App) {
    // Entrance, then the action reveal it chains.
    app.tick(Duration::from_secs(2));
    app.tick(Duration::from_secs(2));
}

#[test]
fn blocks_below_the_fold_wait_hidden() {
    let app = app();
    let card = block(&app, "Notebooks");
    assert!(!app.animator().has_animated(card));
    let style = app.animator().style(card).unwrap();
    assert!(style.opacity.abs() < f32::EPSILON);
}

#[test]
fn scrolling_in_out_and_back_animates_once() {
    let mut app = app();
    let card = block(&app, "Notebooks");

    app.scroll_to(1000.0);
    assert!(app.animator().has_animated(card));
    let entrances = app.animator().entrances();

    app.scroll_to(0.0);
    app.scroll_to(1000.0);
    assert_eq!(app.animator().entrances(), entrances);

    settle(&mut app);
    assert!(app.animator().style(card).unwrap().is_resting());
}

#[test]
fn call_to_action_reveals_its_buttons_after_entering() {
    let mut app = app();
    let donate = block(&app, "Donate");

    app.scroll_to(1500.0);
    app.tick(Duration::from_millis(100));
    assert!(!app.animator().style(donate).unwrap().is_resting());
    assert!(!app.animator().is_animating(donate));

    settle(&mut app);
    assert!(app.animator().style(donate).unwrap().is_resting());
    assert_eq!(app.animator().running_count(), 0);
}

#[test]
fn reduced_motion_applies_final_state_without_handles() {
    let mut app = reduced_app();
    for text in ["Fast", "Notebooks", "Join", "Donate"] {
        let id = block(&app, text);
        assert!(app.animator().style(id).unwrap().is_resting(), "{text}");
    }
    app.scroll_to(1500.0);
    assert_eq!(app.animator().running_count(), 0);
    assert_eq!(app.play_effect_on("Donate", UtilityEffect::Bounce), None);
    assert_eq!(app.play_effect_on("Download", UtilityEffect::Shake), None);
    assert_eq!(app.animator().running_count(), 0);
}

#[test]
fn switching_reduced_motion_on_mid_animation_finishes_everything() {
    let mut app = app();
    app.tick(Duration::from_millis(50));
    assert!(app.animator().running_count() > 0);

    app.set_reduced_motion(ReducedMotion::Enabled);
    assert_eq!(app.animator().running_count(), 0);
    assert!(app.animator().style(block(&app, "Fast")).unwrap().is_resting());
}

#[test]
fn utility_effects_return_to_rest() {
    let mut app = app();
    let handle = app.play_effect_on("Download", UtilityEffect::Shake);
    assert!(handle.is_some());
    app.tick(Duration::from_millis(100));
    assert!(app.animator().is_animating(block(&app, "Download")));
    app.tick(Duration::from_secs(2));
    assert!(!app.animator().is_animating(block(&app, "Download")));
}
