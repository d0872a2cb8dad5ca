//! Deterministic card motion module
//!
//! All card physics lives here. This module must be pure and deterministic:
//! - Time only enters through explicit `dt` and timestamps
//! - Tuning only enters through `MotionConfig`
//! - No rendering or platform dependencies

pub mod controller;
pub mod input;
pub mod snap;
pub mod spring;
pub mod state;
pub mod tick;

pub use controller::MotionController;
pub use input::{on_touch_grant, on_touch_move, on_touch_release};
pub use snap::{Face, nearest_face};
pub use spring::SpringAxis;
pub use state::{CardTransform, MotionPhase, MotionState, SampleWindow};
pub use tick::tick;
