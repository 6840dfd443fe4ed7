//! Light rig of the scene: one shadow-casting directional light, an ambient
//! term and a spot light. Theme changes only touch the directional
//! intensity and the ambient color/intensity.

use crate::constants::*;
use crate::theme::ThemePalette;
use glam::{Mat4, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    pub position: Vec3,
    pub target: Vec3,
    pub color: u32,
    pub intensity: f32,
}

impl DirectionalLight {
    /// Unit vector pointing from the lit surface toward the light.
    pub fn to_light(&self) -> Vec3 {
        (self.position - self.target).normalize_or_zero()
    }

    /// Orthographic light-space matrix used to render the shadow map.
    pub fn shadow_view_projection(&self) -> Mat4 {
        let e = SHADOW_HALF_EXTENT;
        let far = self.position.distance(self.target) * 2.0 + e;
        let proj = Mat4::orthographic_rh(-e, e, -e, e, 0.1, far);
        let view = Mat4::look_at_rh(self.position, self.target, Vec3::Y);
        proj * view
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientLight {
    pub color: u32,
    pub intensity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpotLight {
    pub position: Vec3,
    pub target: Vec3,
    /// Half-angle of the cone in radians.
    pub angle: f32,
    pub color: u32,
    pub intensity: f32,
}

impl SpotLight {
    pub fn direction(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Lighting {
    pub directional: DirectionalLight,
    pub ambient: AmbientLight,
    pub spot: SpotLight,
}

impl Lighting {
    pub fn new(palette: ThemePalette) -> Self {
        let mut lighting = Self {
            directional: DirectionalLight {
                position: DIRECTIONAL_LIGHT_POSITION,
                target: Vec3::ZERO,
                color: DIRECTIONAL_LIGHT_COLOR,
                intensity: 0.0,
            },
            ambient: AmbientLight {
                color: 0,
                intensity: 0.0,
            },
            spot: SpotLight {
                position: SPOT_LIGHT_POSITION,
                target: Vec3::ZERO,
                angle: SPOT_LIGHT_ANGLE,
                color: SPOT_LIGHT_COLOR,
                intensity: SPOT_LIGHT_INTENSITY,
            },
        };
        lighting.apply_palette(palette);
        lighting
    }

    pub fn apply_palette(&mut self, palette: ThemePalette) {
        self.directional.intensity = palette.directional_intensity;
        self.ambient.intensity = palette.ambient_intensity;
        self.ambient.color = palette.ambient_color;
    }
}
