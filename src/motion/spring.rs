//! Damped spring integration for the entry animation

use crate::consts::FIXED_DT;

/// Most substeps one frame may spend on the spring
pub const MAX_SPRING_SUBSTEPS: u32 = 64;

/// Largest step that keeps semi-implicit Euler stable for this spring
///
/// Keeps `k·h²/m <= 0.25` and `c·h/m <= 0.5`, well inside the
/// `k·h²/m + 2·c·h/m < 4` stability bound, and never above `FIXED_DT`.
pub fn max_stable_step(stiffness: f32, damping: f32, mass: f32) -> f32 {
    let mut step = FIXED_DT;
    if stiffness > 0.0 {
        step = step.min(0.5 * (mass / stiffness).sqrt());
    }
    if damping > 0.0 {
        step = step.min(0.5 * mass / damping);
    }
    step
}

/// Split `dt` into `(count, step)` substeps no longer than `max_step`
///
/// Time beyond `MAX_SPRING_SUBSTEPS` steps is dropped, like a frame clock
/// dropping backlog.
pub fn substeps(dt: f32, max_step: f32) -> (u32, f32) {
    if dt <= 0.0 || max_step <= 0.0 {
        return (0, 0.0);
    }
    let count = (dt / max_step).ceil().clamp(1.0, MAX_SPRING_SUBSTEPS as f32) as u32;
    let step = (dt / count as f32).min(max_step);
    (count, step)
}

/// One spring-driven axis (position or yaw)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringAxis {
    pub value: f32,
    pub velocity: f32,
    pub target: f32,
}

impl SpringAxis {
    pub fn new(value: f32, velocity: f32, target: f32) -> Self {
        Self {
            value,
            velocity,
            target,
        }
    }

    /// Semi-implicit Euler step of `m·a = -k·(x - target) - c·v`
    pub fn step(&mut self, stiffness: f32, damping: f32, mass: f32, dt: f32) {
        let displacement = self.value - self.target;
        let acceleration = (-stiffness * displacement - damping * self.velocity) / mass;
        self.velocity += acceleration * dt;
        self.value += self.velocity * dt;
    }

    /// Both offset and velocity inside `epsilon`
    pub fn at_rest(&self, epsilon: f32) -> bool {
        (self.value - self.target).abs() < epsilon && self.velocity.abs() < epsilon
    }

    /// Land exactly on target with no residual motion
    pub fn settle(&mut self) {
        self.value = self.target;
        self.velocity = 0.0;
    }
}
