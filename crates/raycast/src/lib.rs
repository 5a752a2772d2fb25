pub mod aggregate;
pub mod camera;
pub mod color;
pub mod error;
pub mod integrators;
pub mod light;
pub mod loader;
pub mod material;
pub mod math;
pub mod ray;
pub mod renderer;
pub mod scene;
pub mod shape;
pub mod utils;

pub use error::{Result, SceneError};
pub use renderer::{render, ExecutionMode, RenderOutput, Renderer, RendererBuilder};
pub use scene::Scene;

use aggregate::Aggregate;
use ray::Ray;
use shape::{FullIntersectionResult, ObjectId};
use utils::counter::{RayKind, RayStats};

/// Per-worker state threaded through the integrators.
pub struct Ctx<'a> {
    pub scene: &'a Scene,
    pub stats: RayStats,
}

impl<'a> Ctx<'a> {
    pub fn new(scene: &'a Scene) -> Self {
        Self {
            scene,
            stats: Default::default(),
        }
    }

    pub fn first_hit(
        &mut self,
        kind: RayKind,
        ray: Ray,
        exclude: Option<ObjectId>,
    ) -> FullIntersectionResult {
        self.stats.inc(kind);
        self.scene.objects.first_hit(ray, exclude)
    }

    /// Intersect a single object, counted as a secondary ray
    pub fn intersect_object(&mut self, ray: Ray, object: ObjectId) -> FullIntersectionResult {
        self.stats.inc(RayKind::Secondary);
        self.scene.objects.intersect_object(ray, object)
    }
}
