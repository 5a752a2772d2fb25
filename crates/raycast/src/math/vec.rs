pub use glam::Vec3;

use crate::utils::log_once::warn_once;

use super::float::FloatAsExt;

/// Below this length a vector is considered degenerate.
const DEGENERATE_LENGTH: f32 = 1e-6;

pub trait RefrReflVecExt: Sized {
    fn reflect(self, normal: Self) -> Self;

    /// Bends `self` through a surface whose `normal` faces the incoming side.
    ///
    /// `relative_index` is the ratio `n_incoming / n_transmitted`.
    /// Returns `None` on total internal reflection.
    fn refract(self, normal: Self, relative_index: f32) -> Option<Self>;
}

impl RefrReflVecExt for Vec3 {
    fn reflect(self, normal: Vec3) -> Vec3 {
        self - (2.0 * self.dot(normal) * normal)
    }

    fn refract(self, normal: Vec3, relative_index: f32) -> Option<Vec3> {
        if self.dot(normal) > 0.0 {
            warn_once!("Refraction expects the normal to face the incoming direction");
        }

        // Unit vector along the part of `self` lying in the surface.
        // At normal incidence there is no such part and the ray goes straight through.
        let tangent = normal
            .cross(self)
            .into_non_zero(DEGENERATE_LENGTH)
            .map(|axis| axis.normalize().cross(normal).normalize())
            .unwrap_or(Vec3::ZERO);

        let sin_out = relative_index * self.dot(tangent);
        let cos_out_squared = 1.0 - sin_out * sin_out;
        if cos_out_squared < 0.0 {
            return None;
        }

        Some(sin_out * tangent - cos_out_squared.sqrt() * normal)
    }
}

pub trait Vec3SameDirExt {
    fn same_direction(self, other: Self) -> Self;
}

impl Vec3SameDirExt for Vec3 {
    /// Returns `self` if `self` and `other` point in the same general direction (`self.dot(other) > 0.0`), else `-self`
    fn same_direction(self, other: Self) -> Self {
        if self.dot(other) > 0.0 {
            self
        } else {
            -self
        }
    }
}

pub trait Vec3AsNonZero: Sized {
    fn into_non_zero(self, eps: f32) -> Option<Self>;
}

impl Vec3AsNonZero for Vec3 {
    fn into_non_zero(self, eps: f32) -> Option<Self> {
        self.length_squared().into_non_zero(eps * eps).and(Some(self))
    }
}
