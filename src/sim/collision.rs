//! Collision predicates
//!
//! Ad hoc overlap tests; there is no physics engine. Circles overlap only on
//! strict penetration, while a circle touching a rectangle counts as a hit.

use glam::Vec2;

/// Circle-circle overlap. Exact tangency is not a collision.
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance(b) < ra + rb
}

/// Circle vs axis-aligned rectangle given by its center and size
///
/// Uses the clamped-distance formula: reject when the circle is beyond the
/// half-extent plus radius on either axis, accept when the center projects
/// inside the rectangle on either axis, otherwise compare the corner distance.
pub fn circle_rect_overlap(center: Vec2, radius: f32, rect_center: Vec2, size: Vec2) -> bool {
    let half = size * 0.5;
    let dist = (center - rect_center).abs();

    if dist.x > half.x + radius || dist.y > half.y + radius {
        return false;
    }
    if dist.x <= half.x || dist.y <= half.y {
        return true;
    }

    let corner = dist - half;
    corner.length_squared() <= radius * radius
}
