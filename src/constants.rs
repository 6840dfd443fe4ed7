// Page contract and front-end tuning constants.
//
// Scene values (camera, lights, drop timing) live in the core crate; this
// file only holds what the browser side needs to find and style the page.
// DOM element ids
pub const CANVAS_ID: &str = "app-canvas";
pub const NOTIFICATION_ID: &str = "notification";
pub const BULB_ID: &str = "theme-bulb";

// Asset paths, relative to the page
pub const MACHINE_MODEL_URL: &str = "models/vending_machine_rendered.glb";
pub const CAN_MODEL_URL: &str = "models/soda_can.glb";
pub const BULB_IMAGE_URL: &str = "bulb.png";

// Theme toggle placement
pub const BULB_STYLE: &str =
    "position:fixed;top:120px;right:20px;width:50px;height:50px;cursor:pointer;z-index:10";

// Pointer cursors
pub const CURSOR_HOVER: &str = "pointer";
pub const CURSOR_DEFAULT: &str = "default";

// Percentage-closer filtering texel offset, in shadow map texels
pub const SHADOW_PCF_RADIUS: f32 = 1.0;
pub const SHADOW_DEPTH_BIAS: i32 = 2;
pub const SHADOW_SLOPE_BIAS: f32 = 2.0;

// Initial capacity of the per-frame can instance buffer; grows on demand
pub const INITIAL_INSTANCE_CAPACITY: usize = 16;
