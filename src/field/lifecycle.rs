//! Particle lifecycle: spawn, initial population, retirement
//!
//! The population never changes size: every retirement spawns exactly one
//! replacement into the same slot.

use glam::Vec2;
use rand::Rng;

use super::bounds::SurfaceSize;
use super::particle::{Particle, ParticleColor};
use super::state::FieldState;
use crate::settings::Settings;

/// Create one particle placed uniformly inside `surface`
pub fn spawn<R: Rng + ?Sized>(rng: &mut R, surface: SurfaceSize, settings: &Settings) -> Particle {
    let speed = settings.max_spawn_speed;
    let color = ParticleColor::ALL[rng.random_range(0..ParticleColor::ALL.len())];

    Particle {
        pos: Vec2::new(
            rng.random_range(0.0..=surface.width),
            rng.random_range(0.0..=surface.height),
        ),
        vel: Vec2::new(
            rng.random_range(-speed..=speed),
            rng.random_range(-speed..=speed),
        ),
        radius: rng.random_range(settings.radius_min..=settings.radius_max),
        base_opacity: rng.random_range(settings.opacity_min..=settings.opacity_max),
        color,
        age: 0,
        lifespan: rng.random_range(settings.lifespan_min..=settings.lifespan_max),
    }
}

impl<R: Rng> FieldState<R> {
    /// Spawn one particle against the current surface and settings
    pub fn spawn_one(&mut self) -> Particle {
        spawn(&mut self.rng, self.surface, &self.settings)
    }

    /// Replace the whole population with `count` fresh particles
    pub fn initialize(&mut self, count: usize) {
        self.particles.clear();
        self.particles.reserve(count);
        for _ in 0..count {
            let particle = self.spawn_one();
            self.particles.push(particle);
        }
        log::debug!(
            "Initialized {} particles on {}x{}",
            count,
            self.surface.width,
            self.surface.height
        );
    }

    /// Remove the particle at `index` and spawn its replacement.
    ///
    /// Returns the retired particle, or `None` if `index` is out of range.
    pub fn retire(&mut self, index: usize) -> Option<Particle> {
        if index >= self.particles.len() {
            return None;
        }
        let replacement = self.spawn_one();
        Some(std::mem::replace(&mut self.particles[index], replacement))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_within_ranges() {
        let mut rng = Pcg32::seed_from_u64(7);
        let settings = Settings::default();
        let surface = SurfaceSize::new(800.0, 600.0);

        for _ in 0..1000 {
            let p = spawn(&mut rng, surface, &settings);
            assert!(surface.contains(p.pos));
            assert!(p.vel.x.abs() <= 0.25 && p.vel.y.abs() <= 0.25);
            assert!((1.0..=4.0).contains(&p.radius));
            assert!((0.2..=0.7).contains(&p.base_opacity));
            assert!((200..=500).contains(&p.lifespan));
            assert_eq!(p.age, 0);
        }
    }

    #[test]
    fn test_spawn_uses_whole_palette() {
        let mut rng = Pcg32::seed_from_u64(11);
        let settings = Settings::default();
        let mut seen = Vec::new();
        for _ in 0..500 {
            let p = spawn(&mut rng, SurfaceSize::default(), &settings);
            if !seen.contains(&p.color) {
                seen.push(p.color);
            }
        }
        assert_eq!(seen.len(), ParticleColor::ALL.len());
    }

    #[test]
    fn test_spawn_on_degenerate_surface_is_finite() {
        let mut rng = Pcg32::seed_from_u64(3);
        let surface = SurfaceSize::new(0.0, f32::NAN);
        let p = spawn(&mut rng, surface, &Settings::default());
        assert!(p.pos.is_finite());
        assert!(p.vel.is_finite());
    }

    #[test]
    fn test_initialize_exact_count() {
        let mut state = FieldState::new(
            Settings::default(),
            SurfaceSize::default(),
            Pcg32::seed_from_u64(1),
        );
        state.initialize(50);
        assert_eq!(state.particles.len(), 50);

        // Re-initializing replaces rather than appends
        state.initialize(5);
        assert_eq!(state.particles.len(), 5);
    }

    #[test]
    fn test_retire_replaces_in_place() {
        let mut state = FieldState::new(
            Settings::default(),
            SurfaceSize::default(),
            Pcg32::seed_from_u64(2),
        );
        state.initialize(3);
        state.particles[1].age = 999;

        let retired = state.retire(1).unwrap();
        assert_eq!(retired.age, 999);
        assert_eq!(state.particles.len(), 3);
        assert_eq!(state.particles[1].age, 0);

        assert!(state.retire(3).is_none());
        assert_eq!(state.particles.len(), 3);
    }
}
