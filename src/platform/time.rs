//! Fixed-timestep frame clock

use crate::consts::{FIXED_DT, MAX_FRAME_DT, MAX_SUBSTEPS};

/// Turns variable display frame times into whole controller steps
#[derive(Debug, Clone)]
pub struct FrameClock {
    accumulator: f32,
    step: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(FIXED_DT)
    }
}

impl FrameClock {
    pub fn new(step: f32) -> Self {
        Self {
            accumulator: 0.0,
            step,
        }
    }

    /// Fixed step length in seconds
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Add a frame's elapsed time and return how many steps to run
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        let frame_dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.accumulator += frame_dt;

        let mut steps = 0;
        while self.accumulator >= self.step && steps < MAX_SUBSTEPS {
            self.accumulator -= self.step;
            steps += 1;
        }

        // Drop backlog we could not catch up on
        if steps == MAX_SUBSTEPS && self.accumulator >= self.step {
            log::debug!("Frame clock dropped {:.3}s of backlog", self.accumulator);
            self.accumulator %= self.step;
        }
        steps
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
