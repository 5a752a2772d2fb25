pub mod shapelist;

pub use shapelist::ShapeList;

use crate::{
    ray::Ray,
    shape::{FullIntersectionResult, ObjectId},
};

/// A collection of shapes that can answer "what does this ray see first".
pub trait Aggregate: Sync + Send {
    /// Closest hit strictly inside the ray bounds, skipping `exclude` if given.
    fn first_hit(&self, ray: Ray, exclude: Option<ObjectId>) -> FullIntersectionResult;

    /// Hit against a single object, ignoring everything else.
    fn intersect_object(&self, ray: Ray, object: ObjectId) -> FullIntersectionResult;
}
