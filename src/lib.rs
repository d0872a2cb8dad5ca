//! Card Motion - touch-driven motion for an interactive 3D status card
//!
//! Core modules:
//! - `motion`: Deterministic controller (entry spring, drag, momentum, snapping)
//! - `tuning`: Data-driven physics constants and presets
//! - `settings`: Persisted user preferences
//! - `platform`: Frame clock, touch queue and render sink plumbing

pub mod motion;
pub mod platform;
pub mod settings;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use motion::{CardTransform, MotionController, MotionPhase, MotionState};
pub use platform::{CardDriver, CardSink, FrameClock, TouchEvent, TouchQueue};
pub use settings::Settings;
pub use tuning::{MotionConfig, TuningPreset};

/// Frame loop constants
pub mod consts {
    /// Fixed controller timestep (60 Hz, one step per display refresh)
    pub const FIXED_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta accepted before clamping (tab switch, GC pause)
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Length of the release-velocity averaging window
    pub const SAMPLE_CAPACITY: usize = 5;
}

/// Shortest signed difference `to - from`, wrapped to [-π, π]
#[inline]
pub fn wrapped_difference(to: f32, from: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    let mut diff = (to - from) % TAU;
    if diff.abs() > PI {
        diff -= diff.signum() * TAU;
    }
    diff
}

/// Angle normalized to [0, 2π)
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(std::f32::consts::TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= std::f32::consts::TAU {
        0.0
    } else {
        wrapped
    }
}
