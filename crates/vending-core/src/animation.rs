//! Drop/settle animation for spawned objects.
//!
//! Every active drop is a [`DropTask`] record owned by the [`DropAnimator`].
//! The host calls [`DropAnimator::tick`] once per display frame. Each step
//! eases the object's height with smoothstep and spins it by a fixed
//! per-frame increment. The spin is deliberately not eased: it runs at a
//! constant rate and stops abruptly when the drop completes.

use crate::constants::{DROP_DURATION, ROTATION_STEP_X, ROTATION_STEP_Z};
use crate::world::{ObjectId, World};
use glam::Vec3;
use instant::Instant;
use std::time::Duration;

/// Cubic ease `t²(3 − 2t)`; input is clamped to `[0, 1]`.
#[inline]
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Height for an eased progress value.
#[inline]
pub fn eased_height(start_height: f32, target_height: f32, eased: f32) -> f32 {
    start_height * (1.0 - eased) + target_height * eased
}

/// Fraction of `duration` covered by `elapsed`, clamped to `[0, 1]`.
#[inline]
pub fn progress(elapsed: Duration, duration: Duration) -> f32 {
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0) as f32
}

/// Per-step rotation increments in radians.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotationStep {
    pub x: f32,
    pub z: f32,
}

impl Default for RotationStep {
    fn default() -> Self {
        Self {
            x: ROTATION_STEP_X,
            z: ROTATION_STEP_Z,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DropRequest {
    pub object: ObjectId,
    pub start_height: f32,
    pub target_height: f32,
    pub duration: Duration,
}

impl DropRequest {
    pub fn new(object: ObjectId, start_height: f32, target_height: f32) -> Self {
        Self {
            object,
            start_height,
            target_height,
            duration: DROP_DURATION,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Continue,
    Finished,
}

#[derive(Clone, Debug)]
pub struct DropTask {
    request: DropRequest,
    started_at: Instant,
    base_rotation: Vec3,
    rotation_step: RotationStep,
    steps: u32,
}

impl DropTask {
    pub fn object(&self) -> ObjectId {
        self.request.object
    }

    pub fn request(&self) -> &DropRequest {
        &self.request
    }

    /// Completed steps so far.
    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn progress_at(&self, now: Instant) -> f32 {
        let elapsed = if now > self.started_at {
            now - self.started_at
        } else {
            Duration::ZERO
        };
        progress(elapsed, self.request.duration)
    }

    fn step(&mut self, now: Instant, world: &mut World) -> Option<StepOutcome> {
        let obj = world.get_mut(self.request.object)?;
        let p = self.progress_at(now);
        let eased = smoothstep(p);
        obj.transform.translation.y =
            eased_height(self.request.start_height, self.request.target_height, eased);

        // base + step * n, so n steps land exactly on step * n
        self.steps += 1;
        let n = self.steps as f32;
        obj.transform.rotation.x = self.base_rotation.x + self.rotation_step.x * n;
        obj.transform.rotation.z = self.base_rotation.z + self.rotation_step.z * n;

        Some(if p < 1.0 {
            StepOutcome::Continue
        } else {
            StepOutcome::Finished
        })
    }
}

/// Collection of in-flight drop tasks, stepped once per frame.
#[derive(Debug, Default)]
pub struct DropAnimator {
    tasks: Vec<DropTask>,
    rotation_step: RotationStep,
}

impl DropAnimator {
    pub fn new(rotation_step: RotationStep) -> Self {
        Self {
            tasks: Vec::new(),
            rotation_step,
        }
    }

    /// Register a drop and run its first step immediately.
    ///
    /// Returns `false` when the object does not exist or already has an
    /// active drop; a running drop cannot be restarted.
    pub fn start(&mut self, request: DropRequest, now: Instant, world: &mut World) -> bool {
        if self.is_animating(request.object) {
            log::warn!("[drop] object {} is already dropping", request.object.raw());
            return false;
        }
        let Some(obj) = world.get(request.object) else {
            log::warn!("[drop] object {} does not exist", request.object.raw());
            return false;
        };
        let mut task = DropTask {
            request,
            started_at: now,
            base_rotation: obj.transform.rotation,
            rotation_step: self.rotation_step,
            steps: 0,
        };
        if task.step(now, world) == Some(StepOutcome::Continue) {
            self.tasks.push(task);
        }
        true
    }

    /// Step every active task. Returns the number of drops that came to
    /// rest during this call.
    pub fn tick(&mut self, now: Instant, world: &mut World) -> usize {
        let mut finished = 0;
        self.tasks.retain_mut(|task| match task.step(now, world) {
            Some(StepOutcome::Continue) => true,
            Some(StepOutcome::Finished) => {
                log::debug!(
                    "[drop] object {} at rest after {} steps",
                    task.object().raw(),
                    task.steps()
                );
                finished += 1;
                false
            }
            None => {
                log::warn!("[drop] object {} vanished mid-drop", task.object().raw());
                false
            }
        });
        finished
    }

    pub fn active_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_animating(&self, object: ObjectId) -> bool {
        self.tasks.iter().any(|t| t.object() == object)
    }

    pub fn tasks(&self) -> &[DropTask] {
        &self.tasks
    }
}
