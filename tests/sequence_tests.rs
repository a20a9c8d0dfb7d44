// Host-side tests for the scripted fly-through.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod core {
    pub mod sequence {
        include!("../src/core/sequence.rs");
    }
    pub mod tween {
        include!("../src/core/tween.rs");
    }
}

use crate::constants::*;
use crate::core::sequence::*;
use glam::Vec3;

const FRAME_MS: f64 = 1000.0 / 60.0;

/// Tick at a steady frame rate until `until_ms`, collecting events.
fn run(seq: &mut CameraSequence, from_ms: f64, until_ms: f64) -> (Vec<(f64, SequenceEvent)>, Option<Vec3>) {
    let mut events = Vec::new();
    let mut last_pos = None;
    let mut now = from_ms;
    while now <= until_ms {
        let step = seq.tick(now);
        if let Some(p) = step.position {
            last_pos = Some(p);
        }
        if let Some(e) = step.event {
            events.push((now, e));
        }
        now += FRAME_MS;
    }
    (events, last_pos)
}

#[test]
fn idle_sequence_does_nothing() {
    let mut seq = CameraSequence::default();
    assert!(seq.is_idle());
    assert_eq!(seq.tick(0.0), SequenceStep::default());
}

#[test]
fn approach_starts_from_current_position() {
    let mut seq = CameraSequence::default();
    let start = Vec3::new(8.0, 4.0, 20.0);
    seq.confirm(start);
    assert!(!seq.is_idle());
    assert_eq!(seq.tick(500.0).position, Some(start));
}

#[test]
fn approach_then_dolly_lands_on_waypoints() {
    let mut seq = CameraSequence::default();
    seq.confirm(Vec3::new(8.0, 4.0, 20.0));
    seq.tick(0.0);
    assert_eq!(seq.tick(APPROACH_DURATION_MS).position, Some(APPROACH_TARGET));
    assert!(matches!(seq.phase(), SequencePhase::Dolly(_)));

    let t0 = APPROACH_DURATION_MS + 10.0;
    let first = seq.tick(t0).position.unwrap();
    assert_eq!(first, APPROACH_TARGET);
    let mid = seq.tick(t0 + DOLLY_DURATION_MS / 2.0).position.unwrap();
    assert!((mid.x - APPROACH_TARGET.x).abs() < 1e-6);
    assert!((mid.y - APPROACH_TARGET.y).abs() < 1e-6);
    assert!((mid.z - 10.0).abs() < 1e-3);

    let end = seq.tick(t0 + DOLLY_DURATION_MS);
    assert_eq!(
        end.position,
        Some(Vec3::new(APPROACH_TARGET.x, APPROACH_TARGET.y, DOLLY_END_Z))
    );
    assert_eq!(end.event, Some(SequenceEvent::Reveal));
}

#[test]
fn navigate_follows_reveal_after_hold() {
    let mut seq = CameraSequence::default();
    seq.confirm(Vec3::new(8.0, 4.0, 20.0));
    let (events, last) = run(&mut seq, 0.0, 10_000.0);

    assert_eq!(events.len(), 2);
    let (reveal_at, first) = events[0];
    let (navigate_at, second) = events[1];
    assert_eq!(first, SequenceEvent::Reveal);
    assert_eq!(second, SequenceEvent::Navigate);
    assert!(navigate_at - reveal_at >= HOLD_BEFORE_NAVIGATE_MS);
    assert!(navigate_at - reveal_at < HOLD_BEFORE_NAVIGATE_MS + 2.0 * FRAME_MS);
    assert_eq!(last, Some(Vec3::new(0.0, 3.0, 0.0)));
    assert!(seq.is_idle());
    assert!(matches!(seq.phase(), SequencePhase::Finished));
}

#[test]
fn dolly_keeps_x_and_y_fixed() {
    let mut seq = CameraSequence::default();
    seq.confirm(Vec3::new(-3.0, 1.0, 40.0));
    let mut now = 0.0;
    let mut last_z = f32::MAX;
    while now < 5000.0 {
        let step = seq.tick(now);
        if matches!(seq.phase(), SequencePhase::Dolly(_) | SequencePhase::Hold { .. }) {
            if let Some(p) = step.position {
                assert_eq!(p.x, APPROACH_TARGET.x);
                assert_eq!(p.y, APPROACH_TARGET.y);
                assert!(p.z <= last_z);
                last_z = p.z;
            }
        }
        now += FRAME_MS;
    }
}

#[test]
fn reset_during_hold_cancels_navigation() {
    let mut seq = CameraSequence::default();
    seq.confirm(Vec3::new(8.0, 4.0, 20.0));
    let (events, _) = run(&mut seq, 0.0, 5000.0);
    assert_eq!(events.len(), 1);
    assert!(matches!(seq.phase(), SequencePhase::Hold { .. }));

    seq.reset();
    assert!(seq.is_idle());
    let (later, pos) = run(&mut seq, 5000.0, 20_000.0);
    assert!(later.is_empty());
    assert_eq!(pos, None);
}

#[test]
fn confirm_mid_flight_restarts_from_given_position() {
    let mut seq = CameraSequence::default();
    seq.confirm(Vec3::new(8.0, 4.0, 20.0));
    seq.tick(0.0);
    seq.tick(1000.0);
    seq.tick(1100.0);
    let mid = seq.tick(2600.0).position.unwrap();
    assert!(mid.z < APPROACH_TARGET.z && mid.z > DOLLY_END_Z);

    seq.confirm(mid);
    assert!(matches!(seq.phase(), SequencePhase::Approach(_)));
    assert_eq!(seq.tick(2700.0).position, Some(mid));
    assert_eq!(seq.tick(3700.0).position, Some(APPROACH_TARGET));
}

#[test]
fn confirm_during_hold_keeps_pending_navigation() {
    let mut seq = CameraSequence::default();
    seq.confirm(Vec3::new(8.0, 4.0, 20.0));
    let (events, _) = run(&mut seq, 0.0, 5000.0);
    assert_eq!(events.len(), 1);
    let reveal_at = events[0].0;

    assert!(!seq.confirm(Vec3::new(0.0, 3.0, 3.0)));
    assert!(matches!(seq.phase(), SequencePhase::Hold { .. }));

    let (later, pos) = run(&mut seq, 5000.0 + FRAME_MS, 10_000.0);
    assert_eq!(later.len(), 1);
    assert_eq!(later[0].1, SequenceEvent::Navigate);
    assert!(later[0].0 - reveal_at < HOLD_BEFORE_NAVIGATE_MS + 2.0 * FRAME_MS);
    assert_eq!(pos, None);
}

#[test]
fn confirm_after_finish_starts_again() {
    let mut seq = CameraSequence::default();
    seq.confirm(Vec3::new(8.0, 4.0, 20.0));
    run(&mut seq, 0.0, 10_000.0);
    assert!(matches!(seq.phase(), SequencePhase::Finished));
    assert!(seq.confirm(Vec3::new(8.0, 4.0, 20.0)));
    assert!(matches!(seq.phase(), SequencePhase::Approach(_)));
}
