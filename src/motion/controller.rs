//! Owning wrapper around motion state and its tuning

use glam::Vec2;

use super::input;
use super::state::{CardTransform, MotionPhase, MotionState};
use super::tick::tick;
use crate::tuning::MotionConfig;

/// One card's motion controller
///
/// Owns all mutable physics state for the card. The host frame loop calls
/// [`tick`](Self::tick) once per step and the input layer calls the touch
/// handlers; nothing else writes to the state.
#[derive(Debug, Clone)]
pub struct MotionController {
    config: MotionConfig,
    state: MotionState,
}

impl MotionController {
    /// Controller that plays the entry animation first
    pub fn new(config: MotionConfig) -> Self {
        let config = config.sanitized();
        let state = MotionState::entering(&config);
        Self { config, state }
    }

    /// Controller that starts at rest (reduced motion)
    pub fn settled(config: MotionConfig) -> Self {
        let config = config.sanitized();
        let state = MotionState::settled(&config);
        Self { config, state }
    }

    /// Swap in new tuning; the card keeps its current pose and phase
    pub fn set_config(&mut self, config: MotionConfig) {
        self.config = config.sanitized();
    }

    pub fn on_touch_grant(&mut self, point: Vec2, now: f64) {
        input::on_touch_grant(&mut self.state, point, now);
    }

    pub fn on_touch_move(&mut self, point: Vec2, now: f64) {
        input::on_touch_move(&mut self.state, &self.config, point, now);
    }

    pub fn on_touch_release(&mut self) {
        input::on_touch_release(&mut self.state, &self.config);
    }

    /// Advance by one frame of `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        tick(&mut self.state, &self.config, dt);
    }

    pub fn phase(&self) -> MotionPhase {
        self.state.phase
    }

    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging()
    }

    pub fn transform(&self) -> CardTransform {
        self.state.transform()
    }

    pub fn state(&self) -> &MotionState {
        &self.state
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }
}

impl Default for MotionController {
    fn default() -> Self {
        Self::new(MotionConfig::default())
    }
}
