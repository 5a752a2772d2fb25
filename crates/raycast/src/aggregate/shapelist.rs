use crate::{
    ray::Ray,
    shape::{
        local_info, FullIntersectionResult, IntersectionResult, ObjectId, RayIntersection, Shape,
    },
};

use super::Aggregate;

/// Flat list of shapes, an object's id is its index in the list.
#[derive(Default)]
pub struct ShapeList(pub Vec<Box<dyn Shape>>);

impl ShapeList {
    pub fn push(&mut self, shape: Box<dyn Shape>) -> ObjectId {
        self.0.push(shape);
        ObjectId(self.0.len() - 1)
    }

    pub fn get(&self, id: ObjectId) -> Option<&dyn Shape> {
        self.0.get(id.0).map(|shape| shape.as_ref())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn complete(&self, id: ObjectId, t: f32, pos: glam::Vec3) -> FullIntersectionResult {
        let Some(shape) = self.get(id) else {
            return IntersectionResult::NoIntersection;
        };

        IntersectionResult::Intersection(RayIntersection {
            t,
            local_info: local_info::Full {
                pos,
                normal: shape.normal_at(pos),
                object: id,
            },
        })
    }
}

impl Aggregate for ShapeList {
    fn first_hit(&self, mut ray: Ray, exclude: Option<ObjectId>) -> FullIntersectionResult {
        let mut closest = None;

        for (idx, shape) in self.0.iter().enumerate() {
            if ray.is_empty() {
                break;
            }
            if exclude == Some(ObjectId(idx)) {
                continue;
            }

            // Shrinking the upper bound makes every later shape compete against the best hit so far
            if let IntersectionResult::Intersection(RayIntersection { t, local_info }) =
                shape.intersect_bare(ray)
            {
                ray.bounds.1 = t;
                closest = Some((ObjectId(idx), t, local_info.pos));
            }
        }

        match closest {
            Some((id, t, pos)) => self.complete(id, t, pos),
            None => IntersectionResult::NoIntersection,
        }
    }

    fn intersect_object(&self, ray: Ray, object: ObjectId) -> FullIntersectionResult {
        let Some(shape) = self.get(object) else {
            return IntersectionResult::NoIntersection;
        };

        match shape.intersect_bare(ray) {
            IntersectionResult::Intersection(RayIntersection { t, local_info }) => {
                self.complete(object, t, local_info.pos)
            }
            IntersectionResult::NoIntersection => IntersectionResult::NoIntersection,
        }
    }
}
