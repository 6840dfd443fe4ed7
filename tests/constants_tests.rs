// Host-side tests for page contract constants.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
fn page_contract_ids_and_assets() {
    assert_eq!(CANVAS_ID, "app-canvas");
    assert_eq!(NOTIFICATION_ID, "notification");
    assert_eq!(MACHINE_MODEL_URL, "models/vending_machine_rendered.glb");
    assert_eq!(CAN_MODEL_URL, "models/soda_can.glb");
    assert_eq!(BULB_IMAGE_URL, "bulb.png");
    assert_ne!(BULB_ID, CANVAS_ID);
    assert_ne!(BULB_ID, NOTIFICATION_ID);
}

#[test]
fn bulb_is_pinned_top_right_above_canvas() {
    for rule in [
        "position:fixed",
        "top:120px",
        "right:20px",
        "width:50px",
        "height:50px",
        "z-index:10",
    ] {
        assert!(BULB_STYLE.contains(rule), "missing {rule}");
    }
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn render_tuning_is_sane() {
    assert!(SHADOW_PCF_RADIUS > 0.0);
    assert!(SHADOW_DEPTH_BIAS >= 0);
    assert!(SHADOW_SLOPE_BIAS >= 0.0);
    assert!(INITIAL_INSTANCE_CAPACITY > 0);
}

#[test]
fn scene_constants_match_reference_values() {
    use vending_core::constants as c;
    assert_eq!(c::DROP_DURATION.as_millis(), 1500);
    assert_eq!(c::NOTIFICATION_HOLD.as_millis(), 1500);
    assert_eq!(c::DROP_SPAWN_HEIGHT, 0.5);
    assert_eq!(c::DROP_REST_HEIGHT, -1.0);
    assert_eq!(c::GROUND_HEIGHT, c::DROP_REST_HEIGHT);
    assert_eq!(c::SHADOW_MAP_SIZE, 2048);
}
