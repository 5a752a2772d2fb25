use glam::Vec3;

use crate::{
    aggregate::shapelist::ShapeList,
    camera::Camera,
    light::Light,
    material::Material,
    shape::{ObjectId, Plane, Shape, Sphere},
};

/// Everything a render needs, built once and then only read.
pub struct Scene {
    pub camera: Camera,
    pub objects: ShapeList,
    pub lights: Vec<Light>,
}

impl Scene {
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            objects: Default::default(),
            lights: Default::default(),
        }
    }

    /// Insert an object in the scene
    pub fn insert_object<T: Shape + 'static>(&mut self, object: T) -> ObjectId {
        self.objects.push(Box::new(object))
    }

    pub fn insert_sphere(&mut self, center: Vec3, radius: f32, material: Material) -> ObjectId {
        self.insert_object(Sphere {
            center,
            radius,
            material,
        })
    }

    pub fn insert_plane(&mut self, origin: Vec3, normal: Vec3, material: Material) -> ObjectId {
        self.insert_object(Plane {
            origin,
            normal,
            material,
        })
    }

    /// Insert a light in the scene
    pub fn insert_light(&mut self, light: Light) {
        self.lights.push(light);
    }
}
