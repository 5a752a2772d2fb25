use glam::Vec3;

use crate::{
    color::Rgb,
    math::{float::FloatAsExt, vec::Vec3AsNonZero},
    utils::log_once::warn_once,
};

/// Lights closer than this to the shaded point are ignored.
const MIN_LIGHT_DISTANCE: f32 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    Point,
    /// A light restricted to a cone around `direction`.
    Spot {
        direction: Vec3,
        /// Cone half-angle, in radians.
        theta: f32,
        /// Angular falloff exponent.
        angular_a0: f32,
    },
}

/// `1 / (a2·d² + a1·d + a0)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialAttenuation {
    pub a0: f32,
    pub a1: f32,
    pub a2: f32,
}

impl Default for RadialAttenuation {
    fn default() -> Self {
        Self {
            a0: 1.0,
            a1: 0.0,
            a2: 0.0,
        }
    }
}

impl RadialAttenuation {
    pub fn factor(&self, distance: f32) -> f32 {
        let denominator = self.a2 * distance * distance + self.a1 * distance + self.a0;
        match denominator.into_positive() {
            Some(denominator) => 1.0 / denominator,
            None => {
                warn_once!("Radial attenuation denominator is {denominator}, light left unattenuated");
                1.0
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Vec3,
    pub color: Rgb,
    pub kind: LightKind,
    pub attenuation: RadialAttenuation,
}

/// Where a light is, seen from a surface point.
#[derive(Debug, Clone, Copy)]
pub struct LightSample {
    /// Unit vector from the surface point to the light.
    pub direction: Vec3,
    pub distance: f32,
}

impl Light {
    pub fn point(position: Vec3, color: Rgb) -> Self {
        Self {
            position,
            color,
            kind: LightKind::Point,
            attenuation: Default::default(),
        }
    }

    pub fn spot(position: Vec3, color: Rgb, direction: Vec3, theta: f32, angular_a0: f32) -> Self {
        Self {
            position,
            color,
            kind: LightKind::Spot {
                direction,
                theta,
                angular_a0,
            },
            attenuation: Default::default(),
        }
    }

    pub fn with_attenuation(self, attenuation: RadialAttenuation) -> Self {
        Self {
            attenuation,
            ..self
        }
    }

    /// Returns `None` when `point` sits on the light itself.
    pub fn sample(&self, point: Vec3) -> Option<LightSample> {
        let to_light = (self.position - point).into_non_zero(MIN_LIGHT_DISTANCE)?;
        let distance = to_light.length();

        Some(LightSample {
            direction: to_light / distance,
            distance,
        })
    }

    /// Angular factor of the light along `-light_dir`, 1 for point lights.
    ///
    /// A spot never lights what lies behind it, whatever its cone angle.
    pub fn cone_factor(&self, light_dir: Vec3) -> f32 {
        match self.kind {
            LightKind::Point => 1.0,
            LightKind::Spot {
                direction,
                theta,
                angular_a0,
            } => {
                let cos = (-light_dir).dot(direction.normalize());
                if cos <= 0.0 || cos < theta.sin() {
                    0.0
                } else {
                    cos.powf(angular_a0)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::{Light, RadialAttenuation};
    use crate::color::linear;

    #[test]
    fn attenuation() {
        let quadratic = RadialAttenuation {
            a0: 1.0,
            a1: 0.0,
            a2: 1.0,
        };
        assert!((quadratic.factor(2.0) - 0.2).abs() < 1e-6);
        assert_eq!(RadialAttenuation::default().factor(123.0), 1.0);
    }

    #[test]
    fn attenuation_with_zero_denominator_is_ignored() {
        let none = RadialAttenuation {
            a0: 0.0,
            a1: 0.0,
            a2: 0.0,
        };
        assert_eq!(none.factor(3.0), 1.0);
        assert_eq!(none.factor(0.0), 1.0);
    }

    #[test]
    fn sample() {
        let light = Light::point(Vec3::new(0.0, 3.0, 4.0), linear::WHITE);
        let sample = light.sample(Vec3::ZERO).unwrap();

        assert!((sample.distance - 5.0).abs() < 1e-6);
        assert!(sample.direction.abs_diff_eq(Vec3::new(0.0, 0.6, 0.8), 1e-6));
        assert!(light.sample(light.position).is_none());
    }

    #[test]
    fn spot_cone() {
        let spot = Light::spot(Vec3::ZERO, linear::WHITE, Vec3::Z, 0.5, 2.0);

        // On the axis
        assert!((spot.cone_factor(-Vec3::Z) - 1.0).abs() < 1e-6);

        // Well outside of the cone
        let off_axis = -Vec3::new(5.0, 0.0, 0.1).normalize();
        assert_eq!(spot.cone_factor(off_axis), 0.0);

        // Inside the cone, attenuated by the falloff exponent
        let inside = -Vec3::new(0.0, 0.6, 0.8);
        assert!((spot.cone_factor(inside) - 0.64).abs() < 1e-6);

        assert_eq!(Light::point(Vec3::ZERO, linear::WHITE).cone_factor(inside), 1.0);
    }

    #[test]
    fn spot_with_reflex_angle_stays_dark_behind() {
        // sin(4.0) < 0 would let every direction pass the cutoff
        let spot = Light::spot(Vec3::ZERO, linear::WHITE, Vec3::Y, 4.0, 1.5);

        let behind = spot.cone_factor(Vec3::Y);
        assert_eq!(behind, 0.0);

        let sideways = spot.cone_factor(-Vec3::X);
        assert_eq!(sideways, 0.0);

        let ahead = spot.cone_factor(-Vec3::new(0.0, 0.8, 0.6));
        assert!(ahead.is_finite());
        assert!((ahead - 0.8f32.powf(1.5)).abs() < 1e-6);
    }
}
