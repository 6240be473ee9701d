//! Colors for field elements

use serde::{Deserialize, Serialize};

use crate::field::ParticleColor;

/// sRGB color with straight alpha, as understood by canvas style strings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different alpha
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// CSS `rgba(...)` string for canvas fill/stroke styles
    pub fn css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

pub const CYAN: Rgba = Rgba::new(0, 212, 255, 0.8);
pub const ORANGE: Rgba = Rgba::new(255, 107, 53, 0.8);
pub const GREEN: Rgba = Rgba::new(0, 255, 136, 0.6);
pub const AMBER: Rgba = Rgba::new(255, 170, 0, 0.6);
/// Connection lines; alpha is replaced per pair
pub const CONNECTION: Rgba = Rgba::new(0, 212, 255, 1.0);

impl From<ParticleColor> for Rgba {
    fn from(color: ParticleColor) -> Self {
        match color {
            ParticleColor::Cyan => CYAN,
            ParticleColor::Orange => ORANGE,
            ParticleColor::Green => GREEN,
            ParticleColor::Amber => AMBER,
        }
    }
}
