//! Frame driver
//!
//! Holds the controller, clock and touch queue for one card screen and runs
//! them in the order a frame callback needs: input first, then fixed steps,
//! then hand the transform to the renderer.

use crate::motion::{CardTransform, MotionController, MotionPhase};
use crate::settings::Settings;
use crate::tuning::MotionConfig;

use super::input::{TouchEvent, TouchQueue};
use super::time::FrameClock;

/// Renderer-side handle that places the card each frame
pub trait CardSink {
    fn place(&mut self, transform: CardTransform);
}

impl<F: FnMut(CardTransform)> CardSink for F {
    fn place(&mut self, transform: CardTransform) {
        self(transform)
    }
}

/// One card screen's motion loop
#[derive(Debug, Clone)]
pub struct CardDriver {
    controller: MotionController,
    clock: FrameClock,
    queue: TouchQueue,
    last_phase: MotionPhase,
}

impl CardDriver {
    pub fn new(config: MotionConfig) -> Self {
        Self::with_controller(MotionController::new(config))
    }

    /// Driver configured from user settings
    pub fn from_settings(settings: &Settings) -> Self {
        let config = settings.motion_config();
        let controller = if settings.start_settled() {
            MotionController::settled(config)
        } else {
            MotionController::new(config)
        };
        Self::with_controller(controller)
    }

    pub fn with_controller(controller: MotionController) -> Self {
        log::info!("Card driver starting in {}", controller.phase().as_str());
        Self {
            last_phase: controller.phase(),
            controller,
            clock: FrameClock::default(),
            queue: TouchQueue::new(),
        }
    }

    /// Re-tune for changed user settings without restarting the card
    pub fn apply_settings(&mut self, settings: &Settings) {
        log::info!(
            "Applying settings: preset {}, snapping {}",
            settings.preset.as_str(),
            settings.snap_to_faces
        );
        self.controller.set_config(settings.motion_config());
    }

    /// Queue a touch event for the next frame
    pub fn push(&mut self, event: TouchEvent) {
        self.queue.push(event);
    }

    /// Run one display frame of `frame_dt` seconds and place the card
    pub fn frame(&mut self, frame_dt: f32, sink: &mut impl CardSink) -> CardTransform {
        self.queue.drain_into(&mut self.controller);
        self.note_phase();

        let steps = self.clock.advance(frame_dt);
        for _ in 0..steps {
            self.controller.tick(self.clock.step());
            self.note_phase();
        }

        let transform = self.controller.transform();
        sink.place(transform);
        transform
    }

    pub fn controller(&self) -> &MotionController {
        &self.controller
    }

    pub fn phase(&self) -> MotionPhase {
        self.controller.phase()
    }

    pub fn is_dragging(&self) -> bool {
        self.controller.is_dragging()
    }

    fn note_phase(&mut self) {
        let phase = self.controller.phase();
        if phase != self.last_phase {
            log::debug!("Card phase {} -> {}", self.last_phase.as_str(), phase.as_str());
            self.last_phase = phase;
        }
    }
}
