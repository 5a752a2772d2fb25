use std::ops::Range;

use crate::utils::log_once::error_once;

use super::math::vec::Vec3;

/// A half-line with a unit direction.
///
/// Only parameters strictly inside `bounds` count as hits: primary rays use
/// `(0, ∞)`, secondary rays start a little away from their surface, and
/// shadow rays stop at the light.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    pub bounds: (f32, f32),
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
            bounds: (0.0, f32::INFINITY),
        }
    }

    pub fn new_with_range(origin: Vec3, direction: Vec3, range: Range<f32>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
            bounds: (range.start, range.end),
        }
    }

    /// Whether `t` lies strictly inside the ray bounds. NaN never does.
    pub fn contains(&self, t: f32) -> bool {
        self.bounds.0 < t && t < self.bounds.1
    }

    pub fn is_empty(&self) -> bool {
        !(self.bounds.0 < self.bounds.1)
    }

    pub fn at(&self, t: f32) -> Vec3 {
        if !self.contains(t) {
            error_once!("a ray has been accessed out of bounds");
        }

        self.at_unchecked(t)
    }

    pub fn at_unchecked(&self, t: f32) -> Vec3 {
        self.origin + t * self.direction
    }
}
