//! Scene description files.
//!
//! A scene is a JSON list of typed records:
//!
//! ```json
//! [
//!   { "type": "camera", "width": 2.0, "height": 2.0 },
//!   { "type": "sphere", "position": [0, 0, 5], "radius": 1,
//!     "diffuse_color": [1, 0, 0], "specular_color": [1, 1, 1], "reflectivity": 0.2 },
//!   { "type": "plane", "position": [0, -1, 0], "normal": [0, 1, 0],
//!     "diffuse_color": [0.5, 0.5, 0.5] },
//!   { "type": "light", "position": [2, 5, 0], "color": [1, 1, 1],
//!     "radial-a2": 0.05, "direction": [0, -1, 0], "theta": 0.5, "angular-a0": 2 }
//! ]
//! ```
//!
//! A light carrying a `direction` is a spot light. Unknown types or keys are rejected.

use std::{f32::consts::TAU, path::Path};

use glam::Vec3;
use serde::Deserialize;

use crate::{
    aggregate::shapelist::ShapeList,
    camera::Camera,
    color::Rgb,
    error::{Result, SceneError},
    light::{Light, RadialAttenuation},
    material::Material,
    scene::Scene,
    shape::{Plane, Sphere},
};

#[derive(Deserialize, Debug)]
#[serde(tag = "type", rename_all = "lowercase")]
enum Record {
    Camera(CameraRecord),
    Sphere(SphereRecord),
    Plane(PlaneRecord),
    Light(LightRecord),
}

impl Record {
    fn kind(&self) -> &'static str {
        match self {
            Record::Camera(_) => "camera",
            Record::Sphere(_) => "sphere",
            Record::Plane(_) => "plane",
            Record::Light(_) => "light",
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct CameraRecord {
    width: f32,
    height: f32,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct SphereRecord {
    position: [f32; 3],
    radius: f32,
    #[serde(default)]
    diffuse_color: Rgb,
    #[serde(default)]
    specular_color: Rgb,
    #[serde(default)]
    reflectivity: f32,
    #[serde(default)]
    refractivity: f32,
    #[serde(default = "default_ior")]
    ior: f32,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct PlaneRecord {
    position: [f32; 3],
    normal: [f32; 3],
    #[serde(default)]
    diffuse_color: Rgb,
    #[serde(default)]
    specular_color: Rgb,
    #[serde(default)]
    reflectivity: f32,
    #[serde(default)]
    refractivity: f32,
    #[serde(default = "default_ior")]
    ior: f32,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct LightRecord {
    position: [f32; 3],
    color: Rgb,
    direction: Option<[f32; 3]>,
    #[serde(default)]
    theta: f32,
    #[serde(rename = "angular-a0", default)]
    angular_a0: f32,
    #[serde(rename = "radial-a0", default = "default_radial_a0")]
    radial_a0: f32,
    #[serde(rename = "radial-a1", default)]
    radial_a1: f32,
    #[serde(rename = "radial-a2", default)]
    radial_a2: f32,
}

fn default_ior() -> f32 {
    1.0
}

fn default_radial_a0() -> f32 {
    RadialAttenuation::default().a0
}

/// Read and validate the scene stored at `path`.
pub fn load_scene(path: impl AsRef<Path>) -> Result<Scene> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| SceneError::Io {
        path: path.to_owned(),
        source,
    })?;

    log::debug!("Parsing scene file {path:?}");
    parse_scene(&content)
}

/// Parse and validate a scene description.
pub fn parse_scene(content: &str) -> Result<Scene> {
    let records: Vec<Record> = serde_json::from_str(content)?;

    let mut camera = None;
    let mut objects = ShapeList::default();
    let mut lights = vec![];

    for (index, record) in records.into_iter().enumerate() {
        let check = Check {
            index,
            kind: record.kind(),
        };

        match record {
            Record::Camera(record) => {
                let new_camera = Camera::new(
                    check.non_negative("width", record.width)?,
                    check.non_negative("height", record.height)?,
                );
                if camera.replace(new_camera).is_some() {
                    log::warn!("Record #{index}: scene has several cameras, keeping the last one");
                }
            }
            Record::Sphere(record) => {
                let material = check.material(
                    record.diffuse_color,
                    record.specular_color,
                    record.reflectivity,
                    record.refractivity,
                    record.ior,
                )?;
                objects.push(Box::new(Sphere {
                    center: check.vector("position", record.position)?,
                    radius: check.non_negative("radius", record.radius)?,
                    material,
                }));
            }
            Record::Plane(record) => {
                let material = check.material(
                    record.diffuse_color,
                    record.specular_color,
                    record.reflectivity,
                    record.refractivity,
                    record.ior,
                )?;
                objects.push(Box::new(Plane {
                    origin: check.vector("position", record.position)?,
                    normal: check.direction("normal", record.normal)?,
                    material,
                }));
            }
            Record::Light(record) => {
                let position = check.vector("position", record.position)?;
                let color = check.color("color", record.color)?;
                let attenuation = RadialAttenuation {
                    a0: check.non_negative("radial-a0", record.radial_a0)?,
                    a1: check.non_negative("radial-a1", record.radial_a1)?,
                    a2: check.non_negative("radial-a2", record.radial_a2)?,
                };

                let light = match record.direction {
                    Some(direction) => Light::spot(
                        position,
                        color,
                        check.direction("direction", direction)?,
                        check.finite("theta", record.theta)? % TAU,
                        check.non_negative("angular-a0", record.angular_a0)?,
                    ),
                    None => Light::point(position, color),
                };
                lights.push(light.with_attenuation(attenuation));
            }
        }
        log::debug!("Record #{index}: loaded {}", check.kind);
    }

    let camera = camera.ok_or(SceneError::MissingCamera)?;
    log::info!(
        "Scene loaded: {} objects, {} lights, {}x{} view plane",
        objects.len(),
        lights.len(),
        camera.width,
        camera.height
    );

    Ok(Scene {
        camera,
        objects,
        lights,
    })
}

/// Range checks for the fields of one record.
struct Check {
    index: usize,
    kind: &'static str,
}

impl Check {
    fn invalid(&self, field: &'static str, reason: impl Into<String>) -> SceneError {
        SceneError::InvalidValue {
            index: self.index,
            kind: self.kind,
            field,
            reason: reason.into(),
        }
    }

    fn finite(&self, field: &'static str, value: f32) -> Result<f32> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(self.invalid(field, format!("{value} is not a finite number")))
        }
    }

    fn non_negative(&self, field: &'static str, value: f32) -> Result<f32> {
        let value = self.finite(field, value)?;
        if value < 0.0 {
            return Err(self.invalid(field, format!("{value} is less than 0")));
        }
        Ok(value)
    }

    fn unit_interval(&self, field: &'static str, value: f32) -> Result<f32> {
        let value = self.finite(field, value)?;
        if !(0.0..=1.0).contains(&value) {
            return Err(self.invalid(field, format!("{value} is not between 0 and 1")));
        }
        Ok(value)
    }

    fn vector(&self, field: &'static str, value: [f32; 3]) -> Result<Vec3> {
        let value = Vec3::from_array(value);
        if !value.is_finite() {
            return Err(self.invalid(field, format!("{value} is not a finite vector")));
        }
        Ok(value)
    }

    fn direction(&self, field: &'static str, value: [f32; 3]) -> Result<Vec3> {
        let value = self.vector(field, value)?;
        if value == Vec3::ZERO {
            return Err(self.invalid(field, "a direction cannot be the zero vector"));
        }
        Ok(value)
    }

    fn color(&self, field: &'static str, value: Rgb) -> Result<Rgb> {
        if !value.is_finite() {
            return Err(self.invalid(field, "color values must be finite"));
        }
        if value.0.iter().any(|&c| c < 0.0) {
            return Err(self.invalid(field, "color values cannot be less than 0"));
        }
        Ok(value)
    }

    fn material(
        &self,
        diffuse: Rgb,
        specular: Rgb,
        reflectivity: f32,
        refractivity: f32,
        ior: f32,
    ) -> Result<Material> {
        let reflectivity = self.unit_interval("reflectivity", reflectivity)?;
        let refractivity = self.unit_interval("refractivity", refractivity)?;
        let sum = reflectivity + refractivity;
        if sum > 1.0 {
            return Err(SceneError::Energy {
                index: self.index,
                kind: self.kind,
                sum,
            });
        }

        let ior = self.finite("ior", ior)?;
        if ior <= 0.0 {
            return Err(self.invalid("ior", format!("{ior} must be greater than 0")));
        }

        Ok(Material {
            diffuse: self.color("diffuse_color", diffuse)?,
            specular: self.color("specular_color", specular)?,
            reflectivity,
            refractivity,
            ior,
        })
    }
}
