//! Per-frame controller step
//!
//! Advances [`MotionState`] by one frame. Touch handlers have already run
//! for this frame, so the tick always sees the latest drag target.

use super::snap::{nearest_face, snap_step};
use super::spring::{SpringAxis, max_stable_step, substeps};
use super::state::{MotionPhase, MotionState};
use crate::tuning::MotionConfig;
use crate::wrapped_difference;

/// Advance the motion state by one frame of `dt` seconds
pub fn tick(state: &mut MotionState, config: &MotionConfig, dt: f32) {
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

    match state.phase {
        MotionPhase::Entering | MotionPhase::Settling => tick_spring(state, config, dt),

        MotionPhase::Dragging => {
            if state.has_released {
                // Release was recorded by the input handler; hand over to momentum
                state.phase = MotionPhase::Idle;
                tick_idle(state, config, dt);
            } else {
                state.rotation_y += (state.target_rotation - state.rotation_y) * config.ease_factor;
            }
        }

        MotionPhase::Idle => tick_idle(state, config, dt),

        MotionPhase::Snapping => {
            if snap_step(
                &mut state.rotation_y,
                state.snap_target,
                config.snap_speed,
                config.snap_epsilon,
            ) {
                state.phase = MotionPhase::Idle;
            }
        }
    }
}

fn tick_spring(state: &mut MotionState, config: &MotionConfig, dt: f32) {
    let mut position = SpringAxis::new(state.position_y, state.spring_velocity_y, config.target_y);
    let mut rotation = SpringAxis::new(
        state.rotation_y,
        state.spring_angular_velocity,
        config.target_rotation,
    );

    // Long frames are split so the integrator stays stable
    let max_step = max_stable_step(config.stiffness, config.spring_damping, config.mass);
    let (count, step) = substeps(dt, max_step);

    for _ in 0..count {
        position.step(config.stiffness, config.spring_damping, config.mass, step);
        rotation.step(config.stiffness, config.spring_damping, config.mass, step);

        if state.phase == MotionPhase::Entering
            && (position.value - position.target).abs() <= config.settle_distance
        {
            state.phase = MotionPhase::Settling;
        }

        if state.phase == MotionPhase::Settling
            && position.at_rest(config.rest_epsilon)
            && rotation.at_rest(config.rest_epsilon)
        {
            position.settle();
            rotation.settle();
            state.phase = MotionPhase::Idle;
            break;
        }
    }

    state.position_y = position.value;
    state.spring_velocity_y = position.velocity;
    state.rotation_y = rotation.value;
    state.spring_angular_velocity = rotation.velocity;
    state.target_rotation = rotation.value;
}

fn tick_idle(state: &mut MotionState, config: &MotionConfig, dt: f32) {
    if config.snap_enabled
        && state.has_released
        && state.angular_velocity.abs() < config.snap_start_threshold()
    {
        let (_, target) = nearest_face(state.rotation_y);
        // Already resting on a face: nothing to snap
        if wrapped_difference(target, state.rotation_y).abs() >= config.snap_epsilon {
            state.snap_target = target;
            state.angular_velocity = 0.0;
            state.phase = MotionPhase::Snapping;
            return;
        }
    }

    state.angular_velocity *= config.damping;
    if state.angular_velocity.abs() < config.min_velocity {
        state.angular_velocity = 0.0;
    }
    state.rotation_y += state.angular_velocity * dt;

    // Showcase spin until the user first touches the card
    if state.last_move_time.is_none() {
        state.rotation_y += config.auto_rotate_speed * dt;
    }

    state.velocity_y *= config.damping;
    if state.velocity_y.abs() < config.min_velocity {
        state.velocity_y = 0.0;
    }
    state.position_y += state.velocity_y * dt;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FIXED_DT;
    use glam::Vec2;
    use proptest::prelude::*;
    use std::f32::consts::{PI, TAU};

    use crate::motion::input::{on_touch_grant, on_touch_move, on_touch_release};
    use crate::tuning::TuningPreset;

    fn run_until_idle(state: &mut MotionState, config: &MotionConfig, dt: f32) -> u32 {
        let mut ticks = 0;
        while state.phase != MotionPhase::Idle {
            tick(state, config, dt);
            ticks += 1;
            assert!(ticks < 10_000, "stuck in {:?}", state.phase);
        }
        ticks
    }

    #[test]
    fn test_entry_reaches_idle_on_target() {
        let config = MotionConfig::default();
        let mut state = MotionState::entering(&config);
        run_until_idle(&mut state, &config, FIXED_DT);
        assert_eq!(state.position_y, config.target_y);
        assert_eq!(state.rotation_y, config.target_rotation);
        assert_eq!(state.spring_velocity_y, 0.0);
        assert_eq!(state.spring_angular_velocity, 0.0);
    }

    #[test]
    fn test_entry_survives_long_frames() {
        let config = MotionConfig::default();
        for dt in [0.1, 0.25, 1.0] {
            let mut state = MotionState::entering(&config);
            let ticks = run_until_idle(&mut state, &config, dt);
            assert!(ticks < 100, "dt {} took {} ticks", dt, ticks);
            assert_eq!(state.position_y, config.target_y);
            assert_eq!(state.rotation_y, config.target_rotation);
        }
    }

    #[test]
    fn test_single_hitch_mid_entry() {
        let config = MotionConfig::default();
        let mut state = MotionState::entering(&config);
        for _ in 0..5 {
            tick(&mut state, &config, FIXED_DT);
        }
        tick(&mut state, &config, 0.25);
        assert!(state.position_y.is_finite());
        assert!(state.rotation_y.is_finite());
        run_until_idle(&mut state, &config, FIXED_DT);
        assert_eq!(state.position_y, config.target_y);
    }

    #[test]
    fn test_stiff_spring_with_long_frames() {
        let config = MotionConfig {
            stiffness: 5_000.0,
            spring_damping: 120.0,
            ..Default::default()
        };
        let mut state = MotionState::entering(&config);
        run_until_idle(&mut state, &config, 0.2);
        assert_eq!(state.position_y, config.target_y);
    }

    #[test]
    fn test_bad_dt_leaves_state_alone() {
        let config = MotionConfig::default();
        let mut state = MotionState::entering(&config);
        tick(&mut state, &config, f32::NAN);
        tick(&mut state, &config, -0.5);
        assert_eq!(state.position_y, config.entry_start_y);
        assert_eq!(state.phase, MotionPhase::Entering);
    }

    #[test]
    fn test_entry_passes_through_settling() {
        let config = MotionConfig::default();
        let mut state = MotionState::entering(&config);
        let mut saw_settling = false;
        while state.phase != MotionPhase::Idle {
            tick(&mut state, &config, FIXED_DT);
            saw_settling |= state.phase == MotionPhase::Settling;
        }
        assert!(saw_settling);
    }

    #[test]
    fn test_drag_eases_toward_target() {
        let config = MotionConfig::default();
        let mut state = MotionState::settled(&config);
        on_touch_grant(&mut state, Vec2::ZERO, 0.0);
        on_touch_move(&mut state, &config, Vec2::new(100.0, 0.0), 0.016);

        tick(&mut state, &config, FIXED_DT);
        assert!((state.rotation_y - 0.15).abs() < 1e-5);
        tick(&mut state, &config, FIXED_DT);
        assert!((state.rotation_y - (0.15 + 0.85 * 0.15)).abs() < 1e-5);
        assert_eq!(state.position_y, config.target_y);
        assert_eq!(state.phase, MotionPhase::Dragging);
    }

    #[test]
    fn test_release_hands_over_to_momentum() {
        let config = MotionConfig::default();
        let mut state = MotionState::settled(&config);
        on_touch_grant(&mut state, Vec2::ZERO, 0.0);
        on_touch_move(&mut state, &config, Vec2::new(100.0, 0.0), 0.1);
        on_touch_release(&mut state, &config);
        let before = state.rotation_y;
        tick(&mut state, &config, FIXED_DT);
        assert_eq!(state.phase, MotionPhase::Idle);
        assert!(state.rotation_y > before);
    }

    #[test]
    fn test_momentum_decays_geometrically() {
        let config = MotionConfig::default();
        let mut state = MotionState::settled(&config);
        let v0 = 2.0;
        state.angular_velocity = v0;
        state.has_released = true;

        for k in 1..=50 {
            tick(&mut state, &config, FIXED_DT);
            let expected = v0 * config.damping.powi(k);
            assert!((state.angular_velocity - expected).abs() < 1e-4);
            assert_eq!(state.phase, MotionPhase::Idle);
        }
    }

    #[test]
    fn test_momentum_zeroes_below_min_velocity() {
        let config = MotionConfig {
            snap_enabled: false,
            ..Default::default()
        };
        let mut state = MotionState::settled(&config);
        state.angular_velocity = 0.01;
        state.has_released = true;

        let mut previous = state.angular_velocity;
        for _ in 0..2000 {
            tick(&mut state, &config, FIXED_DT);
            let v = state.angular_velocity;
            assert!(v <= previous);
            if v != 0.0 {
                assert!(v >= config.min_velocity);
            }
            previous = v;
        }
        assert_eq!(state.angular_velocity, 0.0);
    }

    #[test]
    fn test_slow_release_snaps_to_back_face() {
        let config = MotionConfig::default();
        let mut state = MotionState::settled(&config);
        state.rotation_y = 3.0;
        state.has_released = true;

        tick(&mut state, &config, FIXED_DT);
        assert_eq!(state.phase, MotionPhase::Snapping);
        assert!((state.snap_target - PI).abs() < 1e-6);

        run_until_idle(&mut state, &config, FIXED_DT);
        assert_eq!(state.rotation_y, state.snap_target);
    }

    #[test]
    fn test_snap_keeps_winding() {
        let config = MotionConfig::default();
        let mut state = MotionState::settled(&config);
        state.rotation_y = 6.2;
        state.has_released = true;

        tick(&mut state, &config, FIXED_DT);
        assert_eq!(state.phase, MotionPhase::Snapping);
        assert!((state.snap_target - TAU).abs() < 1e-5);

        let start = state.rotation_y;
        run_until_idle(&mut state, &config, FIXED_DT);
        // Went forward through 2π instead of unwinding back to 0
        assert!(state.rotation_y > start);
        assert!((state.rotation_y - TAU).abs() < 1e-5);
    }

    #[test]
    fn test_resting_on_face_does_not_snap() {
        let config = MotionConfig::default();
        let mut state = MotionState::settled(&config);
        state.has_released = true;
        for _ in 0..10 {
            tick(&mut state, &config, FIXED_DT);
            assert_eq!(state.phase, MotionPhase::Idle);
        }
    }

    #[test]
    fn test_snap_disabled_glides_to_stop() {
        let config = MotionConfig {
            snap_enabled: false,
            ..Default::default()
        };
        let mut state = MotionState::settled(&config);
        state.rotation_y = 1.2;
        state.has_released = true;
        tick(&mut state, &config, FIXED_DT);
        assert_eq!(state.phase, MotionPhase::Idle);
        assert_eq!(state.rotation_y, 1.2);
    }

    #[test]
    fn test_regrant_during_snap_aborts() {
        let config = MotionConfig::default();
        let mut state = MotionState::settled(&config);
        state.rotation_y = 2.0;
        state.has_released = true;
        tick(&mut state, &config, FIXED_DT);
        assert_eq!(state.phase, MotionPhase::Snapping);

        on_touch_grant(&mut state, Vec2::ZERO, 1.0);
        let held = state.rotation_y;
        tick(&mut state, &config, FIXED_DT);
        assert_eq!(state.phase, MotionPhase::Dragging);
        assert_eq!(state.rotation_y, held);
    }

    #[test]
    fn test_auto_rotate_before_first_touch() {
        let config = TuningPreset::FreeSpin.config();
        let mut state = MotionState::entering(&config);
        run_until_idle(&mut state, &config, FIXED_DT);
        assert_eq!(state.rotation_y, config.target_rotation);

        for _ in 0..60 {
            tick(&mut state, &config, FIXED_DT);
        }
        assert!((state.rotation_y - 0.6).abs() < 1e-3);
        assert_eq!(state.phase, MotionPhase::Idle);
    }

    #[test]
    fn test_auto_rotate_stops_after_touch() {
        let config = TuningPreset::FreeSpin.config();
        let mut state = MotionState::settled(&config);
        tick(&mut state, &config, FIXED_DT);
        assert!(state.rotation_y > 0.0);

        on_touch_grant(&mut state, Vec2::ZERO, 1.0);
        on_touch_release(&mut state, &config);
        tick(&mut state, &config, FIXED_DT);
        let held = state.rotation_y;
        for _ in 0..30 {
            tick(&mut state, &config, FIXED_DT);
        }
        assert_eq!(state.rotation_y, held);
    }

    #[test]
    fn test_classic_card_stays_still_when_idle() {
        let config = MotionConfig::default();
        let mut state = MotionState::settled(&config);
        for _ in 0..120 {
            tick(&mut state, &config, FIXED_DT);
        }
        assert_eq!(state.rotation_y, config.target_rotation);
        assert_eq!(state.phase, MotionPhase::Idle);
    }

    proptest! {
        #[test]
        fn entry_always_converges(
            dt in (1.0f32 / 240.0)..1.5f32,
            start_y in -12.0f32..-1.0,
            start_rot in -3.0f32..3.0,
        ) {
            let config = MotionConfig {
                entry_start_y: start_y,
                entry_start_rotation: start_rot,
                ..Default::default()
            };
            let mut state = MotionState::entering(&config);
            let mut ticks = 0;
            while state.phase != MotionPhase::Idle {
                tick(&mut state, &config, dt);
                ticks += 1;
                prop_assert!(ticks < 5_000);
            }
            prop_assert!((state.position_y - config.target_y).abs() < 0.01);
            prop_assert!((state.rotation_y - config.target_rotation).abs() < 0.01);
        }
    }
}
