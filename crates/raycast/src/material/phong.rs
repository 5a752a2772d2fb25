use glam::Vec3;

use crate::{
    color::{linear, Rgb},
    light::{Light, LightSample},
    math::vec::RefrReflVecExt,
};

use super::Material;

/// Diffuse + specular reflection of a single light.
#[derive(Debug, Clone, Copy)]
pub struct Phong {
    /// Specular exponent
    pub shininess: f32,
}

impl Default for Phong {
    fn default() -> Self {
        Self { shininess: 20.0 }
    }
}

impl Phong {
    /// Light reflected towards the viewer by a surface point.
    ///
    /// `incoming` is the direction of the ray that reached the point (from the
    /// viewer to the surface), `sample` locates the light from the point.
    pub fn shade(
        &self,
        material: &Material,
        light: &Light,
        sample: LightSample,
        normal: Vec3,
        incoming: Vec3,
    ) -> Rgb {
        let LightSample {
            direction: light_dir,
            distance,
        } = sample;

        let cone = light.cone_factor(light_dir);
        if cone == 0.0 {
            return linear::BLACK;
        }
        let light_color = (cone * light.attenuation.factor(distance)) * light.color;

        let lambert = light_dir.dot(normal).max(0.0);
        let diffuse = lambert * (material.diffuse * light_color);

        let omega = light_dir.reflect(normal).dot(incoming).max(0.0);
        let specular = omega.powf(self.shininess) * (material.specular * light_color);

        diffuse + specular
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::Phong;
    use crate::{
        color::{linear, Rgb},
        light::{Light, RadialAttenuation},
        material::Material,
    };

    const EPS: f32 = 1e-5;

    fn assert_rgb_eq(a: Rgb, b: Rgb) {
        let close = a.0.iter().zip(b.0).all(|(x, y)| (x - y).abs() < EPS);
        assert!(close, "{a:?} != {b:?}");
    }

    #[test]
    fn diffuse_follows_lambert() {
        let material = Material::diffuse(Rgb::from_array([1.0, 0.5, 0.0]));
        let light = Light::point(Vec3::new(0.0, 1.0, 1.0), linear::WHITE);
        let sample = light.sample(Vec3::ZERO).unwrap();

        let color = Phong::default().shade(&material, &light, sample, Vec3::Y, -Vec3::Y);

        let cos = std::f32::consts::FRAC_1_SQRT_2;
        assert_rgb_eq(color, Rgb::from_array([cos, 0.5 * cos, 0.0]));
    }

    #[test]
    fn light_behind_surface_gives_no_diffuse() {
        let material = Material::diffuse(linear::WHITE);
        let light = Light::point(Vec3::new(0.0, -1.0, 0.0), linear::WHITE);
        let sample = light.sample(Vec3::ZERO).unwrap();

        let color = Phong::default().shade(&material, &light, sample, Vec3::Y, -Vec3::Y);
        assert_rgb_eq(color, linear::BLACK);
    }

    #[test]
    fn specular_peaks_on_mirror_direction() {
        let material = Material {
            specular: linear::WHITE,
            ..Default::default()
        };
        let light = Light::point(Vec3::new(1.0, 1.0, 0.0), linear::WHITE);
        let sample = light.sample(Vec3::ZERO).unwrap();
        let phong = Phong { shininess: 20.0 };

        // Viewer exactly on the mirror direction of the light
        let incoming = Vec3::new(1.0, -1.0, 0.0).normalize();
        let color = phong.shade(&material, &light, sample, Vec3::Y, incoming);
        assert_rgb_eq(color, linear::WHITE);

        // Viewer looking straight down: cos(45°)^20
        let color = phong.shade(&material, &light, sample, Vec3::Y, -Vec3::Y);
        let expected = std::f32::consts::FRAC_1_SQRT_2.powf(20.0);
        assert_rgb_eq(color, Rgb::splat(expected));
    }

    #[test]
    fn attenuated_and_colored_light() {
        let material = Material::diffuse(linear::WHITE);
        let light = Light::point(Vec3::new(0.0, 2.0, 0.0), Rgb::from_array([0.0, 1.0, 0.5]))
            .with_attenuation(RadialAttenuation {
                a0: 1.0,
                a1: 0.0,
                a2: 1.0,
            });
        let sample = light.sample(Vec3::ZERO).unwrap();

        let color = Phong::default().shade(&material, &light, sample, Vec3::Y, -Vec3::Y);
        assert_rgb_eq(color, Rgb::from_array([0.0, 0.2, 0.1]));
    }

    #[test]
    fn spot_outside_cone_is_dark() {
        let material = Material::diffuse(linear::WHITE);
        let light = Light::spot(Vec3::new(0.0, 1.0, 0.0), linear::WHITE, Vec3::X, 0.3, 1.0);
        let sample = light.sample(Vec3::ZERO).unwrap();

        let color = Phong::default().shade(&material, &light, sample, Vec3::Y, -Vec3::Y);
        assert_rgb_eq(color, linear::BLACK);
    }
}
