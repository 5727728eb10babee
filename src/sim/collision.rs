//! Collision detection between squares
//!
//! Squares collide as their inscribed circles: radius size/2 around the
//! square's center. Both tests use a strict `<`, so circles that exactly
//! touch do not collide.

use glam::Vec2;

use crate::square_center;

/// Circle overlap via squared distance (no square root)
pub fn circles_overlap_sq(a_pos: Vec2, a_size: f32, b_pos: Vec2, b_size: f32) -> bool {
    let delta = square_center(a_pos, a_size) - square_center(b_pos, b_size);
    let radii_sum = a_size / 2.0 + b_size / 2.0;
    delta.length_squared() < radii_sum * radii_sum
}

/// Circle overlap via true Euclidean distance
pub fn circles_overlap(a_pos: Vec2, a_size: f32, b_pos: Vec2, b_size: f32) -> bool {
    let distance = square_center(a_pos, a_size).distance(square_center(b_pos, b_size));
    distance < a_size / 2.0 + b_size / 2.0
}
