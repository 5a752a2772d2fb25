use std::ops::{Add, AddAssign, Mul};

use bytemuck::{Pod, Zeroable};
use serde::Deserialize;

/// A linear RGB color.
///
/// Channels are meant to live in `[0, 1]` but intermediate results (sums of
/// several lights, recursive contributions) are left unclamped until
/// [`Rgb::clamp`] is applied at the output boundary.
#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Pod, Zeroable, Deserialize)]
#[serde(from = "[f32; 3]")]
pub struct Rgb(pub [f32; 3]);

impl Rgb {
    pub const fn from_array(arr: [f32; 3]) -> Self {
        Self(arr)
    }

    pub fn splat(c: f32) -> Self {
        Self([c; 3])
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|c| c.is_finite())
    }

    /// Maps every channel into `[0, 1]`. NaN channels become 0.
    pub fn clamp(self) -> Self {
        // f32::max returns the non-NaN operand
        Self(self.0.map(|c| c.max(0.0).min(1.0)))
    }

    /// Clamps then quantizes to 8 bits per channel.
    pub fn to_byte_array(self) -> [u8; 3] {
        self.clamp().0.map(|c| (c * 255. + 0.5) as u8)
    }
}

impl From<[f32; 3]> for Rgb {
    fn from(val: [f32; 3]) -> Self {
        Rgb::from_array(val)
    }
}

impl Add for Rgb {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self([
            self.0[0] + rhs.0[0],
            self.0[1] + rhs.0[1],
            self.0[2] + rhs.0[2],
        ])
    }
}

impl AddAssign for Rgb {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// Channel-wise product, used to filter a light by a surface color.
impl Mul for Rgb {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self([
            self.0[0] * rhs.0[0],
            self.0[1] * rhs.0[1],
            self.0[2] * rhs.0[2],
        ])
    }
}

impl Mul<Rgb> for f32 {
    type Output = Rgb;

    fn mul(self, rhs: Rgb) -> Self::Output {
        Rgb(rhs.0.map(|c| self * c))
    }
}

pub mod linear {
    use super::Rgb;

    pub const WHITE: Rgb = Rgb::from_array([1.0, 1.0, 1.0]);
    pub const BLACK: Rgb = Rgb::from_array([0.0, 0.0, 0.0]);
    pub const RED: Rgb = Rgb::from_array([1.0, 0.0, 0.0]);
    pub const GREEN: Rgb = Rgb::from_array([0.0, 1.0, 0.0]);
    pub const BLUE: Rgb = Rgb::from_array([0.0, 0.0, 1.0]);
}
