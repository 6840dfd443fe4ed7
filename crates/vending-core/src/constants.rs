use glam::Vec3;
use std::f32::consts::PI;
use std::time::Duration;

// Shared scene tuning constants. Colors are 0xRRGGBB in sRGB space.

// Drop animation
pub const DROP_DURATION: Duration = Duration::from_millis(1500);
pub const DROP_SPAWN_HEIGHT: f32 = 0.5;
pub const DROP_REST_HEIGHT: f32 = -1.0; // matches the ground plane
pub const DROP_SPAWN_JITTER: f32 = 0.3; // full width of the random x offset
pub const ROTATION_STEP_X: f32 = 0.05; // radians per frame, not eased
pub const ROTATION_STEP_Z: f32 = 0.03;

// Notification banner
pub const NOTIFICATION_HOLD: Duration = Duration::from_millis(1500);
pub const NOTIFICATION_TEXT: &str = "Enjoy your soda!";

// Camera
pub const CAMERA_FOV_DEGREES: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_EYE: Vec3 = Vec3::new(0.0, 1.5, 5.0);
pub const CAMERA_TARGET: Vec3 = Vec3::new(0.0, 1.5, 0.0);

// Model placement
pub const MACHINE_POSITION: Vec3 = Vec3::new(0.0, -0.85, 0.0); // sits on the ground
pub const MACHINE_SCALE: f32 = 1.2;
pub const MACHINE_YAW: f32 = PI * 1.5;
pub const MACHINE_METALNESS: f32 = 0.5;
pub const MACHINE_ROUGHNESS: f32 = 0.2;
pub const CAN_SCALE: f32 = 1.0;

// Ground
pub const GROUND_HEIGHT: f32 = -1.0;
pub const GROUND_SIZE: f32 = 1000.0;
pub const GROUND_SHADOW_OPACITY: f32 = 0.5;

// Lights
pub const DIRECTIONAL_LIGHT_POSITION: Vec3 = Vec3::new(5.0, 10.0, 7.5);
pub const DIRECTIONAL_LIGHT_COLOR: u32 = 0xFFFFFF;
pub const SPOT_LIGHT_POSITION: Vec3 = Vec3::new(2.0, 5.0, 3.0);
pub const SPOT_LIGHT_ANGLE: f32 = PI / 4.0;
pub const SPOT_LIGHT_COLOR: u32 = 0xFFFFFF;
pub const SPOT_LIGHT_INTENSITY: f32 = 1.0;
pub const SHADOW_MAP_SIZE: u32 = 2048;
pub const SHADOW_HALF_EXTENT: f32 = 5.0; // ortho frustum half-size around the origin

// Day/night palettes
pub const DAY_CLEAR_COLOR: u32 = 0x87CEEB; // sky blue
pub const DAY_DIRECTIONAL_INTENSITY: f32 = 1.5;
pub const DAY_AMBIENT_INTENSITY: f32 = 1.0;
pub const DAY_AMBIENT_COLOR: u32 = 0xFFFFFF;

pub const NIGHT_CLEAR_COLOR: u32 = 0x000033; // dark blue
pub const NIGHT_DIRECTIONAL_INTENSITY: f32 = 0.8;
pub const NIGHT_AMBIENT_INTENSITY: f32 = 0.4;
pub const NIGHT_AMBIENT_COLOR: u32 = 0x555555;
