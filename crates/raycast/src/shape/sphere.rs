use glam::Vec3;

use crate::{material::Material, ray::Ray};

use super::{local_info, IntersectionResult, MinIntersectionResult, RayIntersection, Shape};

pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
    pub material: Material,
}

impl Shape for Sphere {
    fn intersect_bare(&self, ray: Ray) -> MinIntersectionResult {
        let oc = ray.origin - self.center;
        let a = ray.direction.length_squared();
        let b = 2.0 * ray.direction.dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return IntersectionResult::NoIntersection;
        }

        // Near root first, the far one only matters when the ray starts inside
        let sqrt_discriminant = discriminant.sqrt();
        let near = (-b - sqrt_discriminant) / (2.0 * a);
        let far = (-b + sqrt_discriminant) / (2.0 * a);
        let t = if ray.contains(near) {
            near
        } else if ray.contains(far) {
            far
        } else {
            return IntersectionResult::NoIntersection;
        };

        IntersectionResult::Intersection(RayIntersection {
            t,
            local_info: local_info::Minimum { pos: ray.at(t) },
        })
    }

    fn normal_at(&self, pos: Vec3) -> Vec3 {
        (pos - self.center).normalize()
    }

    fn material(&self) -> &Material {
        &self.material
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::Sphere;
    use crate::{
        ray::Ray,
        shape::{IntersectionResult, RayIntersection, Shape},
    };

    fn unit_sphere() -> Sphere {
        Sphere {
            center: Vec3::ZERO,
            radius: 1.0,
            material: Default::default(),
        }
    }

    #[test]
    fn hits_near_side_first() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);

        let IntersectionResult::Intersection(RayIntersection { t, local_info }) =
            sphere.intersect_bare(ray)
        else {
            panic!("expected a hit");
        };
        assert!((t - 4.0).abs() < 1e-6);
        assert!(local_info.pos.abs_diff_eq(Vec3::new(0.0, 0.0, -1.0), 1e-6));
        assert!(sphere
            .normal_at(local_info.pos)
            .abs_diff_eq(Vec3::new(0.0, 0.0, -1.0), 1e-6));
    }

    #[test]
    fn tangent_ray_hits_once() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::new(-5.0, 1.0, 0.0), Vec3::X);

        let t = sphere.intersect_bare(ray).t().expect("tangent ray must hit");
        assert!((t - 5.0).abs() < 1e-5);
    }

    #[test]
    fn ray_pointing_away_misses() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), -Vec3::Z);

        assert!(!sphere.intersect_bare(ray).is_intersection());
    }

    #[test]
    fn ray_passing_by_misses() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::new(0.0, 2.0, -5.0), Vec3::Z);

        assert!(!sphere.intersect_bare(ray).is_intersection());
    }

    #[test]
    fn ray_from_inside_hits_far_side() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::ZERO, Vec3::Y);

        let t = sphere.intersect_bare(ray).t().unwrap();
        assert!((t - 1.0).abs() < 1e-6);
    }

    #[test]
    fn respects_upper_bound() {
        let sphere = unit_sphere();
        let ray = Ray::new_with_range(Vec3::new(0.0, 0.0, -5.0), Vec3::Z, 0.0..3.0);

        assert!(!sphere.intersect_bare(ray).is_intersection());
    }
}
