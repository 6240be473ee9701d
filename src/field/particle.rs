//! Particle entity and palette

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Fixed particle palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleColor {
    Cyan,
    Orange,
    Green,
    Amber,
}

impl ParticleColor {
    /// Every palette entry, in lookup order
    pub const ALL: [ParticleColor; 4] = [
        ParticleColor::Cyan,
        ParticleColor::Orange,
        ParticleColor::Green,
        ParticleColor::Amber,
    ];
}

/// A single animated point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Opacity at birth; fades linearly to 0 over the lifespan
    pub base_opacity: f32,
    pub color: ParticleColor,
    /// Ticks lived so far
    pub age: u32,
    /// Age at which the particle is retired (always > 0)
    pub lifespan: u32,
}

impl Particle {
    /// True once the particle has lived its full lifespan
    #[inline]
    pub fn is_expired(&self) -> bool {
        self.age >= self.lifespan
    }

    /// Remaining life fraction: 1.0 at birth, 0.0 at or after expiry
    pub fn life_fraction(&self) -> f32 {
        if self.lifespan == 0 {
            return 0.0;
        }
        (1.0 - self.age as f32 / self.lifespan as f32).clamp(0.0, 1.0)
    }

    /// Current render opacity, in `[0, base_opacity]`
    #[inline]
    pub fn opacity(&self) -> f32 {
        self.base_opacity * self.life_fraction()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particle(age: u32, lifespan: u32) -> Particle {
        Particle {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: 2.0,
            base_opacity: 0.5,
            color: ParticleColor::Cyan,
            age,
            lifespan,
        }
    }

    #[test]
    fn test_opacity_fades_linearly() {
        assert_eq!(particle(0, 200).opacity(), 0.5);
        assert!((particle(100, 200).opacity() - 0.25).abs() < 1e-6);
        assert_eq!(particle(200, 200).opacity(), 0.0);
    }

    #[test]
    fn test_opacity_clamped_after_expiry() {
        let p = particle(250, 200);
        assert!(p.is_expired());
        assert_eq!(p.opacity(), 0.0);
    }

    #[test]
    fn test_zero_lifespan_is_expired_and_invisible() {
        let p = particle(0, 0);
        assert!(p.is_expired());
        assert_eq!(p.opacity(), 0.0);
    }
}
