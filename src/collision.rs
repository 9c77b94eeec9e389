//! Stateless geometric collision queries.
//!
//! Called fresh every frame; nothing here retains state between calls.

use crate::math::{Rect, Vec2};

/// AABB overlap test on boxes given as opposing (min, max) corners.
///
/// Uses strict inequalities: boxes that only share an edge or a corner
/// (zero overlap area) do NOT overlap.
#[inline]
pub fn aabb_overlap(a_min: Vec2, a_max: Vec2, b_min: Vec2, b_max: Vec2) -> bool {
    a_min.x < b_max.x && a_max.x > b_min.x && a_min.y < b_max.y && a_max.y > b_min.y
}

/// AABB overlap test on two rectangles.
///
/// Negative widths/heights are normalized before testing, so mirrored rects
/// behave like their normalized counterparts.
#[inline]
pub fn check_aabb_overlap(a: Rect, b: Rect) -> bool {
    let (a_min, a_max) = a.corners();
    let (b_min, b_max) = b.corners();
    aabb_overlap(a_min, a_max, b_min, b_max)
}

/// Point containment test, half-open like [`Rect::contains`].
#[inline]
pub fn point_in_rect(point: Vec2, rect: Rect) -> bool {
    rect.contains(point)
}
