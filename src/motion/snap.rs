//! Face snapping
//!
//! The card has two stable orientations: front (0 mod 2π) and back
//! (π mod 2π). Snap targets keep the winding number of the input so a card
//! that has been spun three times does not unwind on its way to rest.

use std::f32::consts::{PI, TAU};

use crate::{normalize_angle, wrapped_difference};

/// Which side of the card faces the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Front,
    Back,
}

/// Nearest face to `rotation`, returned in the same winding as the input
pub fn nearest_face(rotation: f32) -> (Face, f32) {
    let normalized = normalize_angle(rotation);
    let winding = rotation - normalized;

    let to_front = normalized.min(TAU - normalized);
    let to_back = (normalized - PI).abs();

    if to_back < to_front {
        (Face::Back, winding + PI)
    } else if normalized > PI {
        // Past the back face, the next front face is one turn up
        (Face::Front, winding + TAU)
    } else {
        (Face::Front, winding)
    }
}

/// One easing step toward `target`; returns true once landed
pub fn snap_step(rotation: &mut f32, target: f32, speed: f32, epsilon: f32) -> bool {
    let diff = wrapped_difference(target, *rotation);
    if diff.abs() < epsilon {
        *rotation = target;
        return true;
    }
    *rotation += diff * speed;
    false
}
