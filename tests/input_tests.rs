// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod input {
    include!("../src/input.rs");
}

use input::*;

#[test]
fn uv_corners_map_to_ndc_corners() {
    assert_eq!(uv_to_ndc([0.5, 0.5]), glam::Vec2::ZERO);
    // Top-left of the canvas is (-1, 1) in NDC
    assert_eq!(uv_to_ndc([0.0, 0.0]), glam::Vec2::new(-1.0, 1.0));
    assert_eq!(uv_to_ndc([1.0, 1.0]), glam::Vec2::new(1.0, -1.0));
    assert_eq!(uv_to_ndc([1.0, 0.0]), glam::Vec2::new(1.0, 1.0));
}

#[test]
fn canvas_uv_normalizes_and_clamps() {
    assert_eq!(canvas_uv(200.0, 150.0, 800.0, 600.0), [0.25, 0.25]);
    assert_eq!(canvas_uv(-10.0, 900.0, 800.0, 600.0), [0.0, 1.0]);
}

#[test]
fn canvas_uv_degenerate_box_maps_to_center() {
    assert_eq!(canvas_uv(10.0, 10.0, 0.0, 600.0), [0.5, 0.5]);
    assert_eq!(canvas_uv(10.0, 10.0, 800.0, 0.0), [0.5, 0.5]);
}

#[test]
fn hover_switches_cursor() {
    assert_eq!(cursor_for_hover(true), "pointer");
    assert_eq!(cursor_for_hover(false), "default");
}
