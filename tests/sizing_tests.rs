// Host-side tests for viewport sizing.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod sizing {
    include!("../src/core/sizing.rs");
}

use sizing::*;

#[test]
fn pixel_ratio_is_capped() {
    assert_eq!(capped_pixel_ratio(1.0, 2.0), 1.0);
    assert_eq!(capped_pixel_ratio(1.5, 2.0), 1.5);
    assert_eq!(capped_pixel_ratio(3.0, 2.0), 2.0);
}

#[test]
fn unusable_pixel_ratio_falls_back_to_one() {
    assert_eq!(capped_pixel_ratio(0.0, 2.0), 1.0);
    assert_eq!(capped_pixel_ratio(-2.0, 2.0), 1.0);
    assert_eq!(capped_pixel_ratio(f64::NAN, 2.0), 1.0);
    assert_eq!(capped_pixel_ratio(f64::INFINITY, 2.0), 1.0);
}

#[test]
fn backing_size_scales_and_floors() {
    assert_eq!(backing_size(800.0, 600.0, 1.0, 2.0), (800, 600));
    assert_eq!(backing_size(800.0, 600.0, 3.0, 2.0), (1600, 1200));
    assert_eq!(backing_size(333.0, 101.0, 1.5, 2.0), (499, 151));
}

#[test]
fn backing_size_never_zero() {
    assert_eq!(backing_size(0.0, 0.0, 2.0, 2.0), (1, 1));
    assert_eq!(backing_size(-10.0, 5.0, 1.0, 2.0), (1, 5));
}

#[test]
fn aspect_guards_zero_height() {
    assert!((aspect(1600.0, 800.0) - 2.0).abs() < 1e-6);
    assert_eq!(aspect(640.0, 0.0), 640.0);
}
