pub mod phong;

pub use phong::Phong;

use crate::color::{linear, Rgb};

/// Optical description of a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub diffuse: Rgb,
    pub specular: Rgb,
    /// Fraction of light sent along the mirror direction, in `[0, 1]`.
    pub reflectivity: f32,
    /// Fraction of light transmitted through the surface, in `[0, 1]`.
    pub refractivity: f32,
    /// Index of refraction of the medium behind the surface.
    pub ior: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            diffuse: linear::BLACK,
            specular: linear::BLACK,
            reflectivity: 0.0,
            refractivity: 0.0,
            ior: 1.0,
        }
    }
}

impl Material {
    pub fn diffuse(diffuse: Rgb) -> Self {
        Self {
            diffuse,
            ..Default::default()
        }
    }

    /// Weight of the local (diffuse + specular) illumination once reflection
    /// and refraction took their share.
    ///
    /// Saturates at 0 when `reflectivity + refractivity > 1`, such materials
    /// are rejected by the scene loader but can still be built in code.
    pub fn local_weight(&self) -> f32 {
        (1.0 - (self.reflectivity + self.refractivity)).max(0.0)
    }
}
