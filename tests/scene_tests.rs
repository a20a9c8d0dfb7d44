// Host-side tests for scene state: keys, reset, sequence and signal wiring.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod core {
    pub mod camera {
        include!("../src/core/camera.rs");
    }
    pub mod keys {
        include!("../src/core/keys.rs");
    }
    pub mod orbit {
        include!("../src/core/orbit.rs");
    }
    pub mod scene {
        include!("../src/core/scene.rs");
    }
    pub mod sequence {
        include!("../src/core/sequence.rs");
    }
    pub mod signal {
        include!("../src/core/signal.rs");
    }
    pub mod tween {
        include!("../src/core/tween.rs");
    }
}

use crate::constants::*;
use crate::core::keys::{action_for_key, KeyAction};
use crate::core::scene::SceneState;
use crate::core::sequence::SequenceEvent;
use crate::core::signal::TransitionSignal;
use glam::Vec3;

const FRAME_MS: f64 = 1000.0 / 60.0;

fn in_pan_box(v: Vec3) -> bool {
    v.cmpge(PAN_MIN).all() && v.cmple(PAN_MAX).all()
}

#[test]
fn keys_map_to_actions() {
    assert_eq!(action_for_key("p"), Some(KeyAction::Reset));
    assert_eq!(action_for_key("Enter"), Some(KeyAction::Confirm));
    assert_eq!(action_for_key("P"), None);
    assert_eq!(action_for_key("enter"), None);
    assert_eq!(action_for_key(" "), None);
}

#[test]
fn starts_at_home_looking_at_origin() {
    let scene = SceneState::new(16.0 / 9.0);
    assert_eq!(scene.camera.position, CAMERA_HOME);
    assert_eq!(scene.camera.target, Vec3::ZERO);
    assert_eq!(scene.camera.fov_y_degrees, CAMERA_FOV_Y_DEG);
    assert!(scene.sequence.is_idle());
}

#[test]
fn resize_updates_aspect() {
    let mut scene = SceneState::new(1.0);
    scene.resize(1920.0, 1080.0);
    assert!((scene.camera.aspect - 1920.0 / 1080.0).abs() < 1e-6);
}

#[test]
fn reset_snaps_home_and_clears_signal() {
    let signal = TransitionSignal::new();
    let mut scene = SceneState::new(1.5);
    scene.handle_key(KeyAction::Confirm, &signal);
    let mut now = 0.0;
    while now < 2500.0 {
        scene.advance(now, &signal);
        now += FRAME_MS;
    }
    signal.activate();

    scene.handle_key(KeyAction::Reset, &signal);
    assert_eq!(scene.camera.position, Vec3::new(8.0, 4.0, 20.0));
    assert!(!signal.is_active());
    assert!(scene.sequence.is_idle());
}

#[test]
fn reveal_raises_signal_and_navigate_lowers_it() {
    let signal = TransitionSignal::new();
    let observer = signal.clone();
    let mut scene = SceneState::new(1.5);
    scene.handle_key(KeyAction::Confirm, &signal);

    let mut events = Vec::new();
    let mut now = 0.0;
    while now < 10_000.0 {
        if let Some(e) = scene.advance(now, &signal) {
            events.push(e);
            match e {
                SequenceEvent::Reveal => assert!(observer.is_active()),
                SequenceEvent::Navigate => assert!(!observer.is_active()),
            }
        }
        now += FRAME_MS;
    }
    assert_eq!(events, vec![SequenceEvent::Reveal, SequenceEvent::Navigate]);
}

#[test]
fn reset_before_hold_elapses_suppresses_navigation() {
    let signal = TransitionSignal::new();
    let mut scene = SceneState::new(1.5);
    scene.handle_key(KeyAction::Confirm, &signal);

    let mut now = 0.0;
    let mut revealed = false;
    while now < 6000.0 {
        revealed |= scene.advance(now, &signal) == Some(SequenceEvent::Reveal);
        now += FRAME_MS;
    }
    assert!(revealed);
    assert!(signal.is_active());

    scene.reset(&signal);
    while now < 20_000.0 {
        assert_eq!(scene.advance(now, &signal), None);
        now += FRAME_MS;
    }
    assert!(!signal.is_active());
}

#[test]
fn approach_moves_camera_toward_framing() {
    let signal = TransitionSignal::new();
    let mut scene = SceneState::new(1.5);
    scene.handle_key(KeyAction::Confirm, &signal);
    let mut now = 0.0;
    while now <= APPROACH_DURATION_MS {
        scene.advance(now, &signal);
        now += FRAME_MS;
    }
    scene.advance(APPROACH_DURATION_MS, &signal);
    assert!(scene.camera.position.distance(APPROACH_TARGET) < 0.05);
}

#[test]
fn pan_target_stays_inside_box() {
    let signal = TransitionSignal::new();
    let mut scene = SceneState::new(1.5);
    for i in 0..600 {
        let camera = scene.camera.clone();
        scene.controls.pan_by_pixels(400.0, -250.0, 600.0, &camera);
        scene.advance(i as f64 * FRAME_MS, &signal);
        assert!(in_pan_box(scene.controls.target));
    }
    // The drag pushed hard enough to reach at least one face of the box.
    let t = scene.controls.target;
    assert!(t.x.abs() == PAN_MAX.x || t.y.abs() == PAN_MAX.y || t.z.abs() == PAN_MAX.z);
}

#[test]
fn enter_during_hold_keeps_signal_and_navigation() {
    let signal = TransitionSignal::new();
    let mut scene = SceneState::new(1.5);
    assert!(scene.handle_key(KeyAction::Confirm, &signal));

    let mut now = 0.0;
    let mut events = Vec::new();
    while now < 5000.0 {
        events.extend(scene.advance(now, &signal));
        now += FRAME_MS;
    }
    assert_eq!(events, vec![SequenceEvent::Reveal]);
    assert!(signal.is_active());

    assert!(!scene.handle_key(KeyAction::Confirm, &signal));
    assert!(signal.is_active());

    // Navigation is still due at most ~4 s after the reveal.
    let mut navigated_at = None;
    while now < 9100.0 {
        if let Some(e) = scene.advance(now, &signal) {
            events.push(e);
            if e == SequenceEvent::Navigate {
                navigated_at = Some(now);
            } else {
                panic!("unexpected {:?}", e);
            }
        }
        if navigated_at.is_none() {
            assert!(signal.is_active());
        }
        now += FRAME_MS;
    }
    assert!(navigated_at.is_some());
    assert_eq!(events, vec![SequenceEvent::Reveal, SequenceEvent::Navigate]);
    assert!(!signal.is_active());
}
