use glam::Vec3;

use crate::{material::Material, ray::Ray};

use super::{local_info, IntersectionResult, MinIntersectionResult, RayIntersection, Shape};

/// An infinite plane through `origin`.
///
/// `normal` does not need to be normalized, it is normalized where it is used.
pub struct Plane {
    pub origin: Vec3,
    pub normal: Vec3,
    pub material: Material,
}

impl Shape for Plane {
    fn intersect_bare(&self, ray: Ray) -> MinIntersectionResult {
        let normal = self.normal.normalize();
        // A ray parallel to the plane divides by zero, the resulting inf or NaN is never inside the bounds
        let t = -(ray.origin - self.origin).dot(normal) / ray.direction.dot(normal);

        if !ray.contains(t) {
            return IntersectionResult::NoIntersection;
        }

        IntersectionResult::Intersection(RayIntersection {
            t,
            local_info: local_info::Minimum { pos: ray.at(t) },
        })
    }

    fn normal_at(&self, _pos: Vec3) -> Vec3 {
        self.normal.normalize()
    }

    fn material(&self) -> &Material {
        &self.material
    }
}
