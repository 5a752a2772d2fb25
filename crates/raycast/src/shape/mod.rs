//! Contains the objects that are meant to be rendered:
//! - Spheres
//! - Planes
//!
//! Shapes only answer geometric questions (where does a ray hit me, what is
//! my normal there). Picking the closest shape among many is the job of
//! [`crate::aggregate::shapelist::ShapeList`].

pub mod plane;
pub mod sphere;

pub use plane::Plane;
pub use sphere::Sphere;

use glam::Vec3;

use crate::{material::Material, ray::Ray};

/// An abstracted shape to be rendered by raytracing.
pub trait Shape: Sync + Send {
    /// Check whether `ray` hits the shape strictly inside its bounds, and if so where.
    ///
    /// When the ray crosses the shape twice, the first crossing inside the bounds is returned.
    fn intersect_bare(&self, ray: Ray) -> MinIntersectionResult;

    /// Unit normal of the shape at `pos`, assumed to lie on the shape.
    fn normal_at(&self, pos: Vec3) -> Vec3;

    fn material(&self) -> &Material;
}

/// Index of an object in a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(pub usize);

pub mod local_info {
    use glam::Vec3;

    use super::ObjectId;

    /// Everything the shading code needs to know about a hit.
    #[derive(Debug, Clone, Copy)]
    pub struct Full {
        pub pos: Vec3,
        pub normal: Vec3,
        pub object: ObjectId,
    }

    /// Contains only the pure geometrical information needed to locate the point.
    #[derive(Debug, Clone, Copy)]
    pub struct Minimum {
        pub pos: Vec3,
    }
}

/// Holds local informations and the time of a collision between a ray and a shape.
#[derive(Debug, Clone, Copy)]
pub struct RayIntersection<LocalInfo> {
    pub t: f32,
    pub local_info: LocalInfo,
}

/// A `Result`-like type that takes care of intersections data.
#[derive(Debug, Clone, Copy)]
pub enum IntersectionResult<LocalInfo> {
    Intersection(RayIntersection<LocalInfo>),
    NoIntersection,
}

impl<T> IntersectionResult<T> {
    pub fn is_intersection(&self) -> bool {
        matches!(self, Self::Intersection(_))
    }

    pub fn t(&self) -> Option<f32> {
        match self {
            Self::Intersection(RayIntersection { t, .. }) => Some(*t),
            Self::NoIntersection => None,
        }
    }
}

pub type MinIntersectionResult = IntersectionResult<local_info::Minimum>;
pub type FullIntersectionResult = IntersectionResult<local_info::Full>;
