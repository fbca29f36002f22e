// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod input {
    include!("../src/input.rs");
}

use glam::Vec2;
use input::*;
use resonance_core::Phase;

#[test]
fn escape_and_backspace_go_back_everywhere() {
    for phase in Phase::ALL {
        assert_eq!(key_intent("Escape", phase), Some(KeyIntent::Back));
        assert_eq!(key_intent("Backspace", phase), Some(KeyIntent::Back));
    }
}

#[test]
fn arrows_step_only_in_the_corridor() {
    assert_eq!(
        key_intent("ArrowLeft", Phase::TimeCorridor),
        Some(KeyIntent::Step(-1))
    );
    assert_eq!(
        key_intent("ArrowRight", Phase::TimeCorridor),
        Some(KeyIntent::Step(1))
    );
    assert_eq!(key_intent("d", Phase::TimeCorridor), Some(KeyIntent::Step(1)));
    assert_eq!(key_intent("ArrowLeft", Phase::Selection), None);
    assert_eq!(key_intent("Enter", Phase::Emitter), None);
    assert_eq!(
        key_intent("Enter", Phase::TimeCorridor),
        Some(KeyIntent::Inspect)
    );
}

#[test]
fn unmapped_keys_do_nothing() {
    assert_eq!(key_intent("q", Phase::Entry), None);
    assert_eq!(key_intent("Home", Phase::Shards), Some(KeyIntent::Reset));
}

#[test]
fn pointer_ndc_maps_corners_and_centre() {
    assert_eq!(pointer_ndc(0.0, 0.0, 800.0, 600.0), Vec2::new(-1.0, 1.0));
    assert_eq!(pointer_ndc(800.0, 600.0, 800.0, 600.0), Vec2::new(1.0, -1.0));
    assert_eq!(pointer_ndc(400.0, 300.0, 800.0, 600.0), Vec2::ZERO);
}

#[test]
fn pointer_ndc_clamps_outside_and_handles_empty_canvas() {
    assert_eq!(pointer_ndc(-50.0, 900.0, 800.0, 600.0), Vec2::new(-1.0, -1.0));
    assert_eq!(pointer_ndc(10.0, 10.0, 0.0, 600.0), Vec2::ZERO);
}
