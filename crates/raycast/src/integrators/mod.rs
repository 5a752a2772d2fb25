use crate::{
    color::{linear, Rgb},
    ray::Ray,
    Ctx,
};

mod whitted;

pub use whitted::{WhittedIntegrator, DEFAULT_MAX_DEPTH};

/// Turns a camera ray into a color.
pub trait Integrator: Send + Sync {
    fn camera_ray(&self, ctx: &mut Ctx, ray: Ray) -> Rgb;

    /// Color of a ray that escapes the scene
    fn sky_ray(&self, _ctx: &mut Ctx, _ray: Ray) -> Rgb {
        linear::BLACK
    }
}
