//! Touch input events
//!
//! Input callbacks push events here; the frame loop drains them into the
//! controller before ticking so every tick sees the latest drag target.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::motion::MotionController;

/// A discrete touch event in view-local pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TouchEvent {
    /// Finger down; `timestamp` in seconds
    Grant { point: Vec2, timestamp: f64 },
    /// Finger moved; `timestamp` in seconds
    Move { point: Vec2, timestamp: f64 },
    /// Finger up (or gesture cancelled)
    Release,
}

impl TouchEvent {
    /// Grant stamped in milliseconds, as browser and RN event clocks report
    pub fn grant_at_millis(point: Vec2, timestamp_ms: f64) -> Self {
        TouchEvent::Grant {
            point,
            timestamp: timestamp_ms / 1000.0,
        }
    }

    /// Move stamped in milliseconds
    pub fn move_at_millis(point: Vec2, timestamp_ms: f64) -> Self {
        TouchEvent::Move {
            point,
            timestamp: timestamp_ms / 1000.0,
        }
    }

    pub fn apply(&self, controller: &mut MotionController) {
        match *self {
            TouchEvent::Grant { point, timestamp } => controller.on_touch_grant(point, timestamp),
            TouchEvent::Move { point, timestamp } => controller.on_touch_move(point, timestamp),
            TouchEvent::Release => controller.on_touch_release(),
        }
    }
}

/// Events waiting for the next frame, in arrival order
#[derive(Debug, Clone, Default)]
pub struct TouchQueue {
    events: VecDeque<TouchEvent>,
}

impl TouchQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: TouchEvent) {
        self.events.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Apply every queued event to `controller`; returns how many ran
    pub fn drain_into(&mut self, controller: &mut MotionController) -> usize {
        let count = self.events.len();
        for event in self.events.drain(..) {
            event.apply(controller);
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::MotionPhase;
    use crate::tuning::MotionConfig;

    #[test]
    fn test_drain_applies_in_order() {
        let mut controller = MotionController::settled(MotionConfig::default());
        let mut queue = TouchQueue::new();
        queue.push(TouchEvent::Grant {
            point: Vec2::ZERO,
            timestamp: 0.0,
        });
        queue.push(TouchEvent::Move {
            point: Vec2::new(50.0, 0.0),
            timestamp: 0.05,
        });
        assert_eq!(queue.len(), 2);

        assert_eq!(queue.drain_into(&mut controller), 2);
        assert!(queue.is_empty());
        assert_eq!(controller.phase(), MotionPhase::Dragging);
        assert!((controller.state().target_rotation - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_millisecond_stamps_give_rad_per_second() {
        let mut controller = MotionController::settled(MotionConfig::default());
        let mut queue = TouchQueue::new();
        queue.push(TouchEvent::grant_at_millis(Vec2::ZERO, 16_000.0));
        queue.push(TouchEvent::move_at_millis(Vec2::new(100.0, 0.0), 16_100.0));
        queue.drain_into(&mut controller);

        // 100 px * 0.01 rad/px over 100 ms
        let sample = controller.state().recent_angular_samples.average().unwrap();
        assert!((sample - 10.0).abs() < 1e-3);

        controller.on_touch_release();
        assert!((controller.state().angular_velocity - 5.0).abs() < 1e-3);
    }

    #[test]
    fn test_release_before_grant_is_harmless() {
        let mut controller = MotionController::settled(MotionConfig::default());
        TouchEvent::Release.apply(&mut controller);
        assert_eq!(controller.phase(), MotionPhase::Idle);
        assert_eq!(controller.state().angular_velocity, 0.0);
    }

    #[test]
    fn test_event_json_shape() {
        let event: TouchEvent =
            serde_json::from_str(r#"{ "Move": { "point": [3.0, 4.0], "timestamp": 1.5 } }"#)
                .expect("valid event");
        assert_eq!(
            event,
            TouchEvent::Move {
                point: Vec2::new(3.0, 4.0),
                timestamp: 1.5,
            }
        );
    }
}
