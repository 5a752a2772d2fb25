use std::fmt::Display;

use crate::{math::vec::Vec3, ray::Ray};

/// A pinhole camera sitting at the origin and looking toward `+Z`.
///
/// `width` and `height` are the extent of the view plane at distance 1, in world unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub width: f32,
    pub height: f32,
}

impl Camera {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Generate the primary ray going through the given [ViewportCoord]
    pub fn ray(&self, coords: ViewportCoord) -> Ray {
        Ray::new(Vec3::ZERO, Vec3::new(coords.vx, coords.vy, 1.0))
    }
}

/// Size of the rendered image, in pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Represent a coordinate in the pixel space.
///
/// $\left(0, 0\right)$ is the top left corner of the image, `x` grows to the right and `y` downward.
#[derive(Debug, Clone, Copy)]
pub struct PixelCoord {
    pub x: f32,
    pub y: f32,
}

impl PixelCoord {
    /// The center of the pixel located at `(x, y)`
    pub fn center_of(x: u32, y: u32) -> Self {
        Self {
            x: x as f32 + 0.5,
            y: y as f32 + 0.5,
        }
    }
}

/// Represent a coordinate on the view plane, in world unit.
///
/// $\left(0, 0\right)$ is the center of the view plane, `vy` grows upward.
#[derive(Debug, Clone, Copy)]
pub struct ViewportCoord {
    pub vx: f32,
    pub vy: f32,
}

impl ViewportCoord {
    // Convert a coordinate in pixel space into viewport space
    pub fn from_pixel_coord(camera: &Camera, dimensions: Dimensions, coord: PixelCoord) -> Self {
        let pixel_width = camera.width / dimensions.width as f32;
        let pixel_height = camera.height / dimensions.height as f32;

        Self {
            vx: -camera.width / 2.0 + pixel_width * coord.x,
            vy: camera.height / 2.0 - pixel_height * coord.y,
        }
    }
}
