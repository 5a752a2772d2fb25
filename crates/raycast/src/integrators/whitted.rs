use std::f32::INFINITY;

use glam::Vec3;

use crate::{
    color::{linear, Rgb},
    material::Phong,
    math::vec::{RefrReflVecExt, Vec3SameDirExt},
    ray::Ray,
    shape::{local_info, IntersectionResult, ObjectId, RayIntersection},
    utils::{counter::RayKind, log_once::error_once},
    Ctx,
};

use super::Integrator;

/// Secondary rays start this far from the surface they leave.
pub const SELF_INTERSECTION_EPSILON: f32 = 1e-3;

pub const DEFAULT_MAX_DEPTH: u32 = 5;

/// Recursive ray tracer: direct lighting with hard shadows, plus mirror
/// reflection and refraction up to `max_depth` bounces.
pub struct WhittedIntegrator {
    pub max_depth: u32,
    pub shading: Phong,
}

impl Default for WhittedIntegrator {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            shading: Default::default(),
        }
    }
}

impl Integrator for WhittedIntegrator {
    fn camera_ray(&self, ctx: &mut Ctx, ray: Ray) -> Rgb {
        self.ray_cast(ctx, ray, self.max_depth)
    }
}

impl WhittedIntegrator {
    pub fn new(max_depth: u32, shading: Phong) -> Self {
        Self { max_depth, shading }
    }

    /// Color seen along `ray`, allowing `depth` more bounces.
    ///
    /// At depth 0 only the local illumination of the first hit is computed.
    pub fn ray_cast(&self, ctx: &mut Ctx, ray: Ray, depth: u32) -> Rgb {
        self.trace(ctx, ray, RayKind::Primary, None, depth)
    }

    fn trace(
        &self,
        ctx: &mut Ctx,
        ray: Ray,
        kind: RayKind,
        exclude: Option<ObjectId>,
        depth: u32,
    ) -> Rgb {
        let IntersectionResult::Intersection(intersection) = ctx.first_hit(kind, ray, exclude) else {
            return self.sky_ray(ctx, ray);
        };
        let local_info::Full {
            pos,
            normal,
            object,
        } = intersection.local_info;

        let scene = ctx.scene;
        let Some(shape) = scene.objects.get(object) else {
            error_once!("Intersection with object {object:?} which is not in the scene");
            return linear::BLACK;
        };
        let material = shape.material();

        let mut local = linear::BLACK;
        for light in scene.lights.iter() {
            let Some(sample) = light.sample(pos) else { continue };

            let shadow_ray = Ray::new_with_range(
                pos,
                sample.direction,
                SELF_INTERSECTION_EPSILON..sample.distance,
            );
            if ctx.first_hit(RayKind::Shadow, shadow_ray, None).is_intersection() {
                continue;
            }

            local += self
                .shading
                .shade(material, light, sample, normal, ray.direction);
        }

        if depth == 0 {
            return local;
        }

        let mut color = material.local_weight() * local;

        let reflection = 'reflection: {
            if material.reflectivity <= 0.0 {
                break 'reflection linear::BLACK;
            }

            let reflected = ray.direction.reflect(normal);
            // Leaving the outside of a surface, the ray cannot come back to it
            let exclude = (ray.direction.dot(normal) < 0.0).then_some(object);

            let reflected_ray =
                Ray::new_with_range(pos, reflected, SELF_INTERSECTION_EPSILON..INFINITY);
            self.trace(ctx, reflected_ray, RayKind::Secondary, exclude, depth - 1)
        };
        color += material.reflectivity * reflection;

        let transmission = 'transmission: {
            if material.refractivity <= 0.0 {
                break 'transmission linear::BLACK;
            }

            let transmitted_ray = self.transmit(ctx, ray.direction, pos, normal, object, material.ior);
            self.trace(ctx, transmitted_ray, RayKind::Secondary, None, depth - 1)
        };
        color += material.refractivity * transmission;

        color
    }

    /// Follows a ray through `object`: refraction at `pos`, then at the
    /// point where it leaves the object.
    ///
    /// Total internal reflection at either interface sends the ray along
    /// the mirror direction instead. When the ray is mirrored at `pos` or
    /// never leaves the object (planes), the ray starting at `pos` is
    /// returned.
    fn transmit(
        &self,
        ctx: &mut Ctx,
        direction: Vec3,
        pos: Vec3,
        normal: Vec3,
        object: ObjectId,
        ior: f32,
    ) -> Ray {
        let entering = direction.dot(normal) < 0.0;
        let relative_index = if entering { 1.0 / ior } else { ior };

        let inner_direction = bend(direction, normal, relative_index);
        let inner_ray =
            Ray::new_with_range(pos, inner_direction, SELF_INTERSECTION_EPSILON..INFINITY);

        // Mirrored at `pos`, the ray stays on its side of the surface
        let crossed = (inner_direction.dot(normal) < 0.0) == entering;
        if !crossed {
            return inner_ray;
        }

        let IntersectionResult::Intersection(RayIntersection { local_info: exit, .. }) =
            ctx.intersect_object(inner_ray, object)
        else {
            return inner_ray;
        };

        let outer_direction = bend(inner_direction, exit.normal, 1.0 / relative_index);
        Ray::new_with_range(
            exit.pos,
            outer_direction,
            SELF_INTERSECTION_EPSILON..INFINITY,
        )
    }
}

/// Refracts `direction` through a surface of normal `normal`, whatever side
/// it faces, or mirrors it on total internal reflection.
fn bend(direction: Vec3, normal: Vec3, relative_index: f32) -> Vec3 {
    let facing = normal.same_direction(-direction);
    direction
        .refract(facing, relative_index)
        .unwrap_or_else(|| direction.reflect(facing))
}
