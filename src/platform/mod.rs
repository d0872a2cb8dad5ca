//! Platform abstraction layer
//!
//! Glue between a host frame loop and the motion controller:
//! - Time: fixed-timestep frame clock
//! - Input: touch events queued until the next frame
//! - Output: render sink that receives the card transform

pub mod driver;
pub mod input;
pub mod time;

pub use driver::{CardDriver, CardSink};
pub use input::{TouchEvent, TouchQueue};
pub use time::FrameClock;
