//! Scene host: the single context object that owns camera, lights, theme,
//! loaded models, spawned objects and the drop animator.
//!
//! Assets arrive asynchronously through [`SceneHost::install_machine`] and
//! [`SceneHost::install_can_template`]. Until both are present, clicks are
//! silently ignored, mirroring how the page behaves while models load.

use crate::animation::{DropAnimator, DropRequest, RotationStep};
use crate::constants::*;
use crate::lighting::Lighting;
use crate::model::ModelData;
use crate::notify::{Notification, NotificationChange};
use crate::picking::Ray;
use crate::state::{Camera, Transform};
use crate::theme::{Theme, ThemePalette};
use crate::world::{ObjectId, ObjectKind, SceneObject, World};
use glam::{Vec2, Vec3};
use instant::Instant;
use rand::prelude::*;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq)]
pub struct DropConfig {
    pub duration: Duration,
    pub spawn_height: f32,
    pub rest_height: f32,
    /// Full width of the random horizontal spawn offset around x = 0.
    pub spawn_jitter: f32,
    pub rotation_step: RotationStep,
}

impl Default for DropConfig {
    fn default() -> Self {
        Self {
            duration: DROP_DURATION,
            spawn_height: DROP_SPAWN_HEIGHT,
            rest_height: DROP_REST_HEIGHT,
            spawn_jitter: DROP_SPAWN_JITTER,
            rotation_step: RotationStep::default(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SceneConfig {
    pub drop: DropConfig,
    pub notification_text: String,
    pub notification_hold: Duration,
    pub machine_placement: Transform,
    pub machine_metalness: f32,
    pub machine_roughness: f32,
    pub can_scale: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            drop: DropConfig::default(),
            notification_text: NOTIFICATION_TEXT.to_string(),
            notification_hold: NOTIFICATION_HOLD,
            machine_placement: Transform::from_translation(MACHINE_POSITION)
                .with_uniform_scale(MACHINE_SCALE)
                .with_rotation(Vec3::new(0.0, MACHINE_YAW, 0.0)),
            machine_metalness: MACHINE_METALNESS,
            machine_roughness: MACHINE_ROUGHNESS,
            can_scale: CAN_SCALE,
        }
    }
}

/// What happened during one [`SceneHost::tick`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub settled: usize,
    pub notification: Option<NotificationChange>,
}

pub struct SceneHost {
    config: SceneConfig,
    camera: Camera,
    theme: Theme,
    lighting: Lighting,
    machine: Option<ModelData>,
    can_template: Option<ModelData>,
    world: World,
    animator: DropAnimator,
    notification: Notification,
    rng: StdRng,
}

impl SceneHost {
    pub fn new(config: SceneConfig, seed: u64) -> Self {
        let theme = Theme::default();
        let notification = Notification::new(
            config.notification_text.clone(),
            config.notification_hold,
        );
        let animator = DropAnimator::new(config.drop.rotation_step);
        Self {
            camera: Camera::default(),
            lighting: Lighting::new(theme.palette()),
            theme,
            machine: None,
            can_template: None,
            world: World::new(),
            animator,
            notification,
            rng: StdRng::seed_from_u64(seed),
            config,
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn lighting(&self) -> &Lighting {
        &self.lighting
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn palette(&self) -> ThemePalette {
        self.theme.palette()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn objects(&self) -> impl Iterator<Item = &SceneObject> {
        self.world.iter()
    }

    pub fn animator(&self) -> &DropAnimator {
        &self.animator
    }

    pub fn notification(&self) -> &Notification {
        &self.notification
    }

    pub fn machine(&self) -> Option<&ModelData> {
        self.machine.as_ref()
    }

    pub fn can_template(&self) -> Option<&ModelData> {
        self.can_template.as_ref()
    }

    pub fn machine_transform(&self) -> Transform {
        self.config.machine_placement
    }

    pub fn assets_ready(&self) -> bool {
        self.machine.is_some() && self.can_template.is_some()
    }

    /// Re-derive the projection for a new viewport. Zero sizes are ignored.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.camera.set_viewport(width, height);
    }

    /// Take ownership of the loaded vending machine and apply its surface
    /// overrides. Returns the adjusted model for GPU upload.
    pub fn install_machine(&mut self, mut model: ModelData) -> &ModelData {
        model.set_surface(self.config.machine_metalness, self.config.machine_roughness);
        log::info!(
            "[scene] vending machine installed ({} triangles)",
            model.triangle_count()
        );
        self.machine.insert(model)
    }

    pub fn install_can_template(&mut self, model: ModelData) -> &ModelData {
        log::info!(
            "[scene] soda can template installed ({} triangles)",
            model.triangle_count()
        );
        self.can_template.insert(model)
    }

    pub fn pointer_ray(&self, ndc: Vec2) -> Ray {
        self.camera.ray_from_ndc(ndc)
    }

    /// Distance to the vending machine under the pointer, if any.
    pub fn machine_hit(&self, ndc: Vec2) -> Option<f32> {
        let machine = self.machine.as_ref()?;
        let ray = self.pointer_ray(ndc);
        machine.raycast(&ray, self.config.machine_placement.matrix())
    }

    pub fn hover(&self, ndc: Vec2) -> bool {
        self.machine_hit(ndc).is_some()
    }

    /// Handle a pointer click. Spawns a can when both assets are loaded and
    /// the click lands on the machine.
    pub fn click(&mut self, ndc: Vec2, now: Instant) -> Option<ObjectId> {
        if !self.assets_ready() {
            return None;
        }
        let t = self.machine_hit(ndc)?;
        log::info!("[click] machine hit at distance {:.2}", t);
        self.spawn_can(now)
    }

    /// Spawn a fresh can above the machine tray and start its drop.
    pub fn spawn_can(&mut self, now: Instant) -> Option<ObjectId> {
        if self.can_template.is_none() {
            return None;
        }
        let cfg = &self.config.drop;
        let x = (self.rng.gen::<f32>() - 0.5) * cfg.spawn_jitter;
        let transform = Transform::from_translation(Vec3::new(x, cfg.spawn_height, 0.0))
            .with_uniform_scale(self.config.can_scale);
        let id = self.world.spawn(ObjectKind::SodaCan, transform);
        let request =
            DropRequest::new(id, cfg.spawn_height, cfg.rest_height).with_duration(cfg.duration);
        if !self.animator.start(request, now, &mut self.world) {
            self.world.despawn(id);
            return None;
        }
        self.notification.trigger(now);
        log::info!("[drop] spawned can {} at x={:.3}", id.raw(), x);
        Some(id)
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme.toggle();
        self.lighting.apply_palette(self.theme.palette());
        log::info!("[theme] switched to {}", self.theme.name());
        self.theme
    }

    /// Advance all per-frame activity: drop steps and banner visibility.
    pub fn tick(&mut self, now: Instant) -> TickReport {
        let settled = self.animator.tick(now, &mut self.world);
        TickReport {
            settled,
            notification: self.notification.poll(now),
        }
    }
}
