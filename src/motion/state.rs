//! Motion state and core controller types
//!
//! Everything the controller mutates lives in [`MotionState`].

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::SAMPLE_CAPACITY;
use crate::tuning::MotionConfig;

/// Lifecycle stage of the card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionPhase {
    /// Spring is pulling the card up into view
    Entering,
    /// Close to rest, spring is damping out the overshoot
    Settling,
    /// At rest, or gliding on release momentum
    Idle,
    /// Finger is down and steering the card
    Dragging,
    /// Easing onto the nearest face
    Snapping,
}

impl MotionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            MotionPhase::Entering => "entering",
            MotionPhase::Settling => "settling",
            MotionPhase::Idle => "idle",
            MotionPhase::Dragging => "dragging",
            MotionPhase::Snapping => "snapping",
        }
    }

    /// True while the entry spring owns the card
    pub fn is_spring(&self) -> bool {
        matches!(self, MotionPhase::Entering | MotionPhase::Settling)
    }
}

/// Sliding window of recent angular velocity samples (oldest first)
#[derive(Debug, Clone, Default)]
pub struct SampleWindow {
    samples: VecDeque<f32>,
}

impl SampleWindow {
    pub fn new() -> Self {
        Self {
            samples: VecDeque::with_capacity(SAMPLE_CAPACITY),
        }
    }

    /// Append a sample, evicting the oldest when full
    pub fn push(&mut self, sample: f32) {
        if self.samples.len() == SAMPLE_CAPACITY {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Mean of the window, `None` when empty
    pub fn average(&self) -> Option<f32> {
        if self.samples.is_empty() {
            return None;
        }
        Some(self.samples.iter().sum::<f32>() / self.samples.len() as f32)
    }

    pub fn iter(&self) -> impl Iterator<Item = &f32> {
        self.samples.iter()
    }
}

/// What the renderer needs to place the card this frame
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CardTransform {
    pub position_y: f32,
    pub rotation_y: f32,
}

/// Complete controller state
#[derive(Debug, Clone)]
pub struct MotionState {
    /// Current phase
    pub phase: MotionPhase,
    /// Vertical offset (world units)
    pub position_y: f32,
    /// Yaw (radians, unwrapped)
    pub rotation_y: f32,
    /// Vertical momentum (world units/s)
    pub velocity_y: f32,
    /// Yaw momentum after release (rad/s)
    pub angular_velocity: f32,
    /// Entry spring velocity, vertical axis
    pub spring_velocity_y: f32,
    /// Entry spring velocity, yaw axis
    pub spring_angular_velocity: f32,
    /// Last touch location, `None` with no finger down
    pub last_touch: Option<Vec2>,
    /// Timestamp of the last grant/move (seconds)
    pub last_move_time: Option<f64>,
    /// Drag-driven yaw that `rotation_y` eases toward
    pub target_rotation: f32,
    /// Recent angular velocity samples for release averaging
    pub recent_angular_samples: SampleWindow,
    /// Pointer lifted since the last grant
    pub has_released: bool,
    /// Face the card is converging on while snapping
    pub snap_target: f32,
}

impl MotionState {
    /// Card below the fold, about to spring into view
    pub fn entering(config: &MotionConfig) -> Self {
        Self {
            phase: MotionPhase::Entering,
            position_y: config.entry_start_y,
            rotation_y: config.entry_start_rotation,
            velocity_y: 0.0,
            angular_velocity: 0.0,
            spring_velocity_y: 0.0,
            spring_angular_velocity: 0.0,
            last_touch: None,
            last_move_time: None,
            target_rotation: config.entry_start_rotation,
            recent_angular_samples: SampleWindow::new(),
            has_released: false,
            snap_target: config.target_rotation,
        }
    }

    /// Card already resting on its target
    pub fn settled(config: &MotionConfig) -> Self {
        Self {
            phase: MotionPhase::Idle,
            position_y: config.target_y,
            rotation_y: config.target_rotation,
            target_rotation: config.target_rotation,
            ..Self::entering(config)
        }
    }

    pub fn transform(&self) -> CardTransform {
        CardTransform {
            position_y: self.position_y,
            rotation_y: self.rotation_y,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == MotionPhase::Dragging
    }
}
