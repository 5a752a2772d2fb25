use std::{fmt::Display, str::FromStr};

use rayon::prelude::*;

use crate::{
    camera::{Dimensions, PixelCoord, ViewportCoord},
    color::{linear, Rgb},
    integrators::{Integrator, WhittedIntegrator, DEFAULT_MAX_DEPTH},
    material::Phong,
    scene::Scene,
    utils::{counter::RayStats, log_once::error_once},
    Ctx,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExecutionMode {
    #[default]
    Multithreaded,
    Monothreaded,
}

impl FromStr for ExecutionMode {
    type Err = &'static str;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "multithreaded" => Ok(Self::Multithreaded),
            "monothreaded" => Ok(Self::Monothreaded),
            _ => Err("expected monothreaded or multithreaded"),
        }
    }
}

impl Display for ExecutionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecutionMode::Multithreaded => f.write_str("multithreaded"),
            ExecutionMode::Monothreaded => f.write_str("monothreaded"),
        }
    }
}

pub struct RendererBuilder {
    pub dimensions: Dimensions,
    pub max_depth: u32,
    pub shininess: f32,
    pub execution_mode: ExecutionMode,
}

impl Default for RendererBuilder {
    fn default() -> Self {
        Self {
            dimensions: Dimensions {
                width: 800,
                height: 600,
            },
            max_depth: DEFAULT_MAX_DEPTH,
            shininess: Phong::default().shininess,
            execution_mode: Default::default(),
        }
    }
}

impl RendererBuilder {
    pub fn dimensions(mut self, dimensions: Dimensions) -> Self {
        self.dimensions = dimensions;
        self
    }

    pub fn max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn shininess(mut self, shininess: f32) -> Self {
        self.shininess = shininess;
        self
    }

    pub fn execution_mode(mut self, execution_mode: ExecutionMode) -> Self {
        self.execution_mode = execution_mode;
        self
    }

    pub fn build(self) -> Renderer {
        Renderer {
            dimensions: self.dimensions,
            execution_mode: self.execution_mode,
            integrator: Box::new(WhittedIntegrator::new(
                self.max_depth,
                Phong {
                    shininess: self.shininess,
                },
            )),
        }
    }
}

pub struct Renderer {
    pub dimensions: Dimensions,
    pub execution_mode: ExecutionMode,
    pub integrator: Box<dyn Integrator>,
}

/// A rendered image, row-major from the top left corner, with unclamped colors.
pub struct RenderOutput {
    pub dimensions: Dimensions,
    pub pixels: Vec<Rgb>,
    pub stats: RayStats,
}

impl Renderer {
    pub fn render(&self, scene: &Scene) -> RenderOutput {
        self.render_with_progress(scene, |_| ())
    }

    /// Render `scene`, calling `on_row_rendered` with the index of every finished row.
    ///
    /// Rows may finish in any order in multithreaded mode.
    pub fn render_with_progress<F>(&self, scene: &Scene, on_row_rendered: F) -> RenderOutput
    where
        F: Fn(u32) + Sync,
    {
        let mut pixels = vec![linear::BLACK; self.dimensions.pixel_count()];
        if pixels.is_empty() {
            log::warn!("Nothing to render for a {} image", self.dimensions);
            return RenderOutput {
                dimensions: self.dimensions,
                pixels,
                stats: Default::default(),
            };
        }

        let width = self.dimensions.width as usize;
        let worker = |(y, row): (usize, &mut [Rgb])| {
            let stats = self.row_worker(scene, y as u32, row);
            on_row_rendered(y as u32);
            stats
        };

        let stats = match self.execution_mode {
            ExecutionMode::Multithreaded => pixels
                .par_chunks_mut(width)
                .enumerate()
                .map(worker)
                .reduce(RayStats::default, RayStats::merge),
            ExecutionMode::Monothreaded => pixels
                .chunks_mut(width)
                .enumerate()
                .map(worker)
                .fold(RayStats::default(), RayStats::merge),
        };

        RenderOutput {
            dimensions: self.dimensions,
            pixels,
            stats,
        }
    }

    fn row_worker(&self, scene: &Scene, y: u32, row: &mut [Rgb]) -> RayStats {
        log::trace!("working on row {y}");
        let mut ctx = Ctx::new(scene);

        for (x, pixel) in row.iter_mut().enumerate() {
            let coords = ViewportCoord::from_pixel_coord(
                &scene.camera,
                self.dimensions,
                PixelCoord::center_of(x as u32, y),
            );
            let color = self
                .integrator
                .camera_ray(&mut ctx, scene.camera.ray(coords));

            if !color.is_finite() {
                error_once!("Pixel ({x}, {y}) has a non-finite color {color:?}, it will be black");
            }
            *pixel = color;
        }

        ctx.stats
    }
}

/// Render `scene` with the default settings into a `width`x`height` buffer.
pub fn render(scene: &Scene, width: u32, height: u32) -> Vec<Rgb> {
    RendererBuilder::default()
        .dimensions(Dimensions::new(width, height))
        .build()
        .render(scene)
        .pixels
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use glam::Vec3;

    use super::{render, ExecutionMode, RendererBuilder};
    use crate::{
        camera::{Camera, Dimensions},
        color::linear,
        light::Light,
        material::Material,
        scene::Scene,
    };

    fn scene() -> Scene {
        let mut scene = Scene::new(Camera::new(2.0, 2.0));
        scene.insert_sphere(
            Vec3::new(0.0, 0.0, 5.0),
            1.0,
            Material {
                specular: linear::WHITE,
                reflectivity: 0.3,
                refractivity: 0.3,
                ior: 1.3,
                ..Material::diffuse(linear::RED)
            },
        );
        scene.insert_plane(
            Vec3::new(0.0, -1.0, 0.0),
            Vec3::Y,
            Material {
                reflectivity: 0.5,
                ..Material::diffuse(linear::WHITE)
            },
        );
        scene.insert_light(Light::point(Vec3::new(2.0, 4.0, 1.0), linear::WHITE));
        scene.insert_light(Light::spot(
            Vec3::new(-2.0, 3.0, 5.0),
            linear::BLUE,
            Vec3::new(0.5, -1.0, 0.0),
            0.4,
            2.0,
        ));
        scene
    }

    fn builder() -> RendererBuilder {
        RendererBuilder::default().dimensions(Dimensions::new(24, 16))
    }

    #[test]
    fn render_is_idempotent() {
        let scene = scene();
        let renderer = builder().build();

        let first = renderer.render(&scene);
        let second = renderer.render(&scene);

        assert_eq!(first.pixels, second.pixels);
        assert_eq!(first.stats, second.stats);
    }

    #[test]
    fn execution_modes_agree() {
        let scene = scene();

        let multi = builder()
            .execution_mode(ExecutionMode::Multithreaded)
            .build()
            .render(&scene);
        let mono = builder()
            .execution_mode(ExecutionMode::Monothreaded)
            .build()
            .render(&scene);

        assert_eq!(multi.pixels, mono.pixels);
        assert_eq!(multi.stats, mono.stats);
        assert_eq!(multi.stats.primary, 24 * 16);
    }

    #[test]
    fn every_row_is_reported() {
        let scene = scene();
        let rows = AtomicU32::new(0);

        let output = builder()
            .build()
            .render_with_progress(&scene, |_| {
                rows.fetch_add(1, Ordering::Relaxed);
            });

        assert_eq!(rows.load(Ordering::Relaxed), 16);
        assert_eq!(output.pixels.len(), 24 * 16);
    }

    #[test]
    fn center_pixel_sees_the_sphere() {
        let mut scene = Scene::new(Camera::new(2.0, 2.0));
        scene.insert_sphere(
            Vec3::new(0.0, 0.0, 5.0),
            1.0,
            Material::diffuse(linear::RED),
        );
        scene.insert_light(Light::point(Vec3::ZERO, linear::WHITE));

        let pixels = render(&scene, 3, 3);

        assert_eq!(pixels.len(), 9);
        assert!((pixels[4].0[0] - 1.0).abs() < 1e-5);
        assert_eq!(pixels[0], linear::BLACK);
    }

    #[test]
    fn reflex_spot_angle_keeps_pixels_finite() {
        let scene = crate::loader::parse_scene(
            r#"[
                { "type": "camera", "width": 2, "height": 2 },
                { "type": "plane", "position": [0, -1, 0], "normal": [0, 1, 0],
                  "diffuse_color": [1, 1, 1] },
                { "type": "light", "position": [0, 1, 4], "color": [1, 1, 1],
                  "direction": [0, 1, 0], "theta": 4.0, "angular-a0": 1.5 }
            ]"#,
        )
        .unwrap();

        let pixels = render(&scene, 8, 8);

        assert!(pixels.iter().all(|p| p.is_finite()));
    }

    #[test]
    fn empty_image() {
        let output = RendererBuilder::default()
            .dimensions(Dimensions::new(0, 10))
            .build()
            .render(&scene());

        assert!(output.pixels.is_empty());
        assert_eq!(output.stats.total(), 0);
    }

    #[test]
    fn execution_mode_from_str() {
        assert_eq!(
            "Monothreaded".parse::<ExecutionMode>(),
            Ok(ExecutionMode::Monothreaded)
        );
        assert_eq!(
            "multithreaded".parse::<ExecutionMode>(),
            Ok(ExecutionMode::Multithreaded)
        );
        assert!("sometimes".parse::<ExecutionMode>().is_err());
        assert_eq!(ExecutionMode::Monothreaded.to_string(), "monothreaded");
    }
}
