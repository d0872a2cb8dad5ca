//! Data-driven motion tuning
//!
//! Every physics constant the controller uses lives in [`MotionConfig`].
//! Different card screens get different "feel" by picking a preset or
//! overriding fields from JSON, never by forking control flow.

use serde::{Deserialize, Serialize};

/// Named tuning presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TuningPreset {
    /// Springy entry, light momentum, snaps to the nearest face
    #[default]
    Classic,
    /// Heavier card: slower drag easing, shorter glide
    Weighty,
    /// Turns slowly until touched, spins freely after release and never snaps
    FreeSpin,
}

impl TuningPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            TuningPreset::Classic => "Classic",
            TuningPreset::Weighty => "Weighty",
            TuningPreset::FreeSpin => "FreeSpin",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" | "default" => Some(TuningPreset::Classic),
            "weighty" | "heavy" => Some(TuningPreset::Weighty),
            "freespin" | "free-spin" | "free" => Some(TuningPreset::FreeSpin),
            _ => None,
        }
    }

    /// Full configuration for this preset
    pub fn config(&self) -> MotionConfig {
        let base = MotionConfig::default();
        match self {
            TuningPreset::Classic => base,
            TuningPreset::Weighty => MotionConfig {
                stiffness: 90.0,
                spring_damping: 17.0,
                mass: 1.2,
                ease_factor: 0.1,
                momentum_multiplier: 0.35,
                damping: 0.95,
                snap_speed: 0.08,
                ..base
            },
            TuningPreset::FreeSpin => MotionConfig {
                momentum_multiplier: 0.8,
                damping: 0.985,
                snap_enabled: false,
                // 0.01 rad per 60 Hz frame
                auto_rotate_speed: 0.6,
                ..base
            },
        }
    }
}

/// Upper bound on `stiffness / mass` (spring angular frequency of 100 rad/s)
pub const MAX_STIFFNESS_PER_MASS: f32 = 10_000.0;
/// Upper bound on `spring_damping / mass`
pub const MAX_DAMPING_PER_MASS: f32 = 400.0;

/// Physics constants for the card motion controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    // === Entry spring ===
    /// Vertical offset the card starts from (below the fold)
    pub entry_start_y: f32,
    /// Yaw the card starts from during entry (radians)
    pub entry_start_rotation: f32,
    /// Resting vertical offset
    pub target_y: f32,
    /// Resting yaw (radians)
    pub target_rotation: f32,
    /// Spring constant
    pub stiffness: f32,
    /// Spring velocity damping coefficient
    pub spring_damping: f32,
    /// Spring mass
    pub mass: f32,
    /// Distance from target at which Entering becomes Settling
    pub settle_distance: f32,
    /// Offset and velocity tolerance for ending the spring
    pub rest_epsilon: f32,

    // === Drag ===
    /// Radians of yaw per pixel of horizontal drag
    pub rotate_gain: f32,
    /// Fraction of the remaining gap closed per step while dragging
    pub ease_factor: f32,

    // === Momentum ===
    /// Scales the averaged release velocity
    pub momentum_multiplier: f32,
    /// Per-step velocity retention after release
    pub damping: f32,
    /// Velocities below this are zeroed (rad/s)
    pub min_velocity: f32,

    // === Snapping ===
    /// Snap starts below `min_velocity * snap_velocity_factor`
    pub snap_velocity_factor: f32,
    /// Fraction of the remaining angle closed per step while snapping
    pub snap_speed: f32,
    /// Angular tolerance for finishing a snap
    pub snap_epsilon: f32,
    /// Whether the card settles onto its front/back face after a flick
    pub snap_enabled: bool,

    // === Idle ===
    /// Yaw speed (rad/s) of the showcase spin before the first touch
    pub auto_rotate_speed: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            entry_start_y: -7.0,
            entry_start_rotation: -0.6,
            target_y: 0.0,
            target_rotation: 0.0,
            stiffness: 120.0,
            spring_damping: 18.0,
            mass: 1.0,
            settle_distance: 0.3,
            rest_epsilon: 0.01,

            rotate_gain: 0.01,
            ease_factor: 0.15,

            momentum_multiplier: 0.5,
            damping: 0.98,
            min_velocity: 0.0001,

            snap_velocity_factor: 500.0,
            snap_speed: 0.12,
            snap_epsilon: 0.01,
            snap_enabled: true,

            auto_rotate_speed: 0.0,
        }
    }
}

impl MotionConfig {
    /// Parse a config from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Angular speed below which a released card starts snapping
    #[inline]
    pub fn snap_start_threshold(&self) -> f32 {
        self.min_velocity * self.snap_velocity_factor
    }

    /// Clamp values that would make the integrator diverge or stall
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        for (name, value, max, fallback) in [
            ("ease_factor", &mut self.ease_factor, 1.0, defaults.ease_factor),
            ("snap_speed", &mut self.snap_speed, 1.0, defaults.snap_speed),
            ("damping", &mut self.damping, 1.0, defaults.damping),
            (
                "momentum_multiplier",
                &mut self.momentum_multiplier,
                f32::MAX,
                defaults.momentum_multiplier,
            ),
            ("min_velocity", &mut self.min_velocity, f32::MAX, defaults.min_velocity),
            (
                "snap_velocity_factor",
                &mut self.snap_velocity_factor,
                f32::MAX,
                defaults.snap_velocity_factor,
            ),
            ("spring_damping", &mut self.spring_damping, f32::MAX, defaults.spring_damping),
            ("settle_distance", &mut self.settle_distance, f32::MAX, defaults.settle_distance),
        ] {
            clamp_field(name, value, 0.0, max, fallback);
        }

        // Zero would divide by zero or never converge
        positive_field("mass", &mut self.mass, defaults.mass);
        positive_field("stiffness", &mut self.stiffness, defaults.stiffness);
        positive_field("rest_epsilon", &mut self.rest_epsilon, defaults.rest_epsilon);
        positive_field("snap_epsilon", &mut self.snap_epsilon, defaults.snap_epsilon);

        for (name, value, fallback) in [
            ("entry_start_y", &mut self.entry_start_y, defaults.entry_start_y),
            ("entry_start_rotation", &mut self.entry_start_rotation, defaults.entry_start_rotation),
            ("target_y", &mut self.target_y, defaults.target_y),
            ("target_rotation", &mut self.target_rotation, defaults.target_rotation),
            ("rotate_gain", &mut self.rotate_gain, defaults.rotate_gain),
            ("auto_rotate_speed", &mut self.auto_rotate_speed, defaults.auto_rotate_speed),
        ] {
            if !value.is_finite() {
                log::warn!("Tuning {} is not finite, using {}", name, fallback);
                *value = fallback;
            }
        }

        // Stiffer or more damped springs than this would need more substeps
        // than one frame is allowed
        let max_stiffness = self.mass * MAX_STIFFNESS_PER_MASS;
        if self.stiffness > max_stiffness {
            log::warn!(
                "Tuning stiffness = {} too stiff for mass {}, clamped to {}",
                self.stiffness,
                self.mass,
                max_stiffness
            );
            self.stiffness = max_stiffness;
        }
        let max_damping = self.mass * MAX_DAMPING_PER_MASS;
        if self.spring_damping > max_damping {
            log::warn!(
                "Tuning spring_damping = {} too high for mass {}, clamped to {}",
                self.spring_damping,
                self.mass,
                max_damping
            );
            self.spring_damping = max_damping;
        }

        self
    }
}

fn clamp_field(name: &str, value: &mut f32, min: f32, max: f32, fallback: f32) {
    if value.is_nan() {
        log::warn!("Tuning {} is NaN, using {}", name, fallback);
        *value = fallback;
    } else if *value < min || *value > max {
        let clamped = (*value).clamp(min, max);
        log::warn!("Tuning {} = {} out of range, clamped to {}", name, value, clamped);
        *value = clamped;
    }
}

fn positive_field(name: &str, value: &mut f32, fallback: f32) {
    if !value.is_finite() || *value <= 0.0 {
        log::warn!("Tuning {} = {} must be positive, using {}", name, value, fallback);
        *value = fallback;
    }
}
