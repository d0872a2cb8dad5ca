//! Touch event handling
//!
//! Handlers only record touch-derived targets and velocities. Phase
//! decisions that depend on physics wait for the next [`tick`](super::tick).

use glam::Vec2;

use super::state::{MotionPhase, MotionState};
use crate::tuning::MotionConfig;

/// Finger down at `point` (view-local pixels), `now` in seconds
pub fn on_touch_grant(state: &mut MotionState, point: Vec2, now: f64) {
    state.last_touch = Some(point);
    state.last_move_time = Some(now);
    state.has_released = false;
    state.angular_velocity = 0.0;
    state.recent_angular_samples.clear();

    match state.phase {
        MotionPhase::Idle | MotionPhase::Snapping | MotionPhase::Dragging => {
            // Pick up from where the card is, not where an old drag was headed
            state.target_rotation = state.rotation_y;
            state.phase = MotionPhase::Dragging;
        }
        // The entry spring keeps the card until it lands
        MotionPhase::Entering | MotionPhase::Settling => {}
    }
}

/// Finger moved to `point` at `now`
pub fn on_touch_move(state: &mut MotionState, config: &MotionConfig, point: Vec2, now: f64) {
    // A move with no grant is treated as a zero-length drag
    let last = state.last_touch.unwrap_or(point);
    let delta = point - last;
    let delta_t = state.last_move_time.map_or(0.0, |t| now - t) as f32;

    if state.phase == MotionPhase::Dragging && !state.has_released {
        let step = delta.x * config.rotate_gain;
        state.target_rotation += step;
        if delta_t > 0.0 {
            state.recent_angular_samples.push(step / delta_t);
        }
    }

    state.last_touch = Some(point);
    state.last_move_time = Some(now);
}

/// Finger lifted
pub fn on_touch_release(state: &mut MotionState, config: &MotionConfig) {
    if state.has_released {
        return;
    }
    state.has_released = true;
    state.last_touch = None;
    state.angular_velocity = state
        .recent_angular_samples
        .average()
        .map_or(0.0, |avg| avg * config.momentum_multiplier);
}
