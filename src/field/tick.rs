//! Per-frame simulation step
//!
//! One call advances every particle by exactly one tick.

use glam::Vec2;
use rand::Rng;

use super::bounds::SurfaceSize;
use super::particle::Particle;
use super::state::FieldState;
use crate::settings::Settings;

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Particles retired (and replaced) at the start of the tick
    pub retired: usize,
    /// Particles that reached their lifespan this tick
    pub expired: usize,
}

/// Attraction falloff: 1.0 at the pointer, 0.0 at or beyond `radius`
#[inline]
pub fn attraction_factor(distance: f32, radius: f32) -> f32 {
    if distance < radius {
        (radius - distance) / radius
    } else {
        0.0
    }
}

/// Advance the field by one tick
pub fn tick<R: Rng>(state: &mut FieldState<R>) -> TickReport {
    let mut report = TickReport::default();

    // Particles that expired last tick were drawn once at zero opacity;
    // swap them out before moving anything.
    for i in 0..state.particles.len() {
        if state.particles[i].is_expired() {
            state.retire(i);
            report.retired += 1;
        }
    }

    let pointer = state.pointer;
    let surface = state.surface;
    for particle in &mut state.particles {
        step_particle(particle, pointer, surface, &state.settings);
        if particle.is_expired() {
            report.expired += 1;
        }
    }

    state.time_ticks += 1;

    if report.retired > 0 {
        log::trace!(
            "tick {}: retired {} particle(s)",
            state.time_ticks,
            report.retired
        );
    }
    report
}

/// Attraction, Euler integration, boundary reflection and aging for one particle
fn step_particle(p: &mut Particle, pointer: Option<Vec2>, surface: SurfaceSize, settings: &Settings) {
    if let Some(pointer) = pointer {
        let delta = pointer - p.pos;
        let force = attraction_factor(delta.length(), settings.interaction_radius);
        if force > 0.0 {
            p.vel += delta * force * settings.attraction_strength;
        }
    }

    p.pos += p.vel;

    // Reflect only; position stays where it landed
    if !surface.contains_x(p.pos.x) {
        p.vel.x = -p.vel.x;
    }
    if !surface.contains_y(p.pos.y) {
        p.vel.y = -p.vel.y;
    }

    p.age = p.age.saturating_add(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::ParticleColor;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn field(count: usize) -> FieldState<Pcg32> {
        let mut state = FieldState::new(
            Settings::default(),
            SurfaceSize::new(800.0, 600.0),
            Pcg32::seed_from_u64(12345),
        );
        state.initialize(count);
        state
    }

    fn still_particle(pos: Vec2) -> Particle {
        Particle {
            pos,
            vel: Vec2::ZERO,
            radius: 2.0,
            base_opacity: 0.5,
            color: ParticleColor::Green,
            age: 0,
            lifespan: 300,
        }
    }

    #[test]
    fn test_population_constant_over_many_lifespans() {
        let mut state = field(50);
        state.set_pointer(Vec2::new(400.0, 300.0));
        let mut total_retired = 0;
        for _ in 0..2000 {
            total_retired += tick(&mut state).retired;
            assert_eq!(state.particles.len(), 50);
        }
        // 2000 ticks covers at least four lifespans of every particle
        assert!(total_retired >= 50 * 3);
        assert_eq!(state.time_ticks, 2000);
    }

    #[test]
    fn test_particle_one_tick_from_expiry() {
        let mut state = field(5);
        state.particles[0].age = state.particles[0].lifespan - 1;
        let lifespan = state.particles[0].lifespan;

        let report = tick(&mut state);
        assert_eq!(report.expired, 1);
        assert_eq!(state.particles[0].age, lifespan);
        assert_eq!(state.particles[0].opacity(), 0.0);
        assert_eq!(state.particles.len(), 5);

        let report = tick(&mut state);
        assert_eq!(report.retired, 1);
        // Replacement already ticked once
        assert_eq!(state.particles[0].age, 1);
        assert_eq!(state.particles.len(), 5);
    }

    #[test]
    fn test_euler_step() {
        let mut state = field(0);
        let mut p = still_particle(Vec2::new(100.0, 100.0));
        p.vel = Vec2::new(0.2, -0.1);
        state.particles.push(p);

        tick(&mut state);
        let p = &state.particles[0];
        assert!((p.pos - Vec2::new(100.2, 99.9)).length() < 1e-4);
        assert_eq!(p.vel, Vec2::new(0.2, -0.1));
        assert_eq!(p.age, 1);
    }

    #[test]
    fn test_reflects_without_clamping() {
        let mut state = field(0);
        let mut p = still_particle(Vec2::new(0.1, 599.9));
        p.vel = Vec2::new(-0.25, 0.25);
        state.particles.push(p);

        tick(&mut state);
        let p = &state.particles[0];
        assert!(p.pos.x < 0.0 && p.pos.y > 600.0);
        assert_eq!(p.vel, Vec2::new(0.25, -0.25));

        // Next tick carries it back inside
        tick(&mut state);
        assert!(state.surface.contains(state.particles[0].pos));
    }

    #[test]
    fn test_attraction_factor_falloff() {
        assert_eq!(attraction_factor(0.0, 100.0), 1.0);
        assert!(attraction_factor(0.0, 100.0) > attraction_factor(99.0, 100.0));
        assert!(attraction_factor(99.0, 100.0) > 0.0);
        assert_eq!(attraction_factor(100.0, 100.0), 0.0);
        assert_eq!(attraction_factor(150.0, 100.0), 0.0);
    }

    #[test]
    fn test_pointer_pulls_nearby_particle() {
        let mut state = field(0);
        state.particles.push(still_particle(Vec2::new(100.0, 100.0)));
        state.set_pointer(Vec2::new(150.0, 100.0));

        tick(&mut state);
        let vel = state.particles[0].vel;
        // delta 50 * factor 0.5 * 0.0001
        assert!((vel.x - 0.0025).abs() < 1e-7);
        assert_eq!(vel.y, 0.0);
    }

    #[test]
    fn test_pointer_on_particle_adds_no_impulse() {
        let mut state = field(0);
        state.particles.push(still_particle(Vec2::new(100.0, 100.0)));
        state.set_pointer(Vec2::new(100.0, 100.0));

        tick(&mut state);
        assert_eq!(state.particles[0].vel, Vec2::ZERO);
    }

    #[test]
    fn test_pointer_out_of_range_ignored() {
        let mut state = field(0);
        state.particles.push(still_particle(Vec2::new(100.0, 100.0)));
        state.set_pointer(Vec2::new(200.0, 100.0));

        tick(&mut state);
        assert_eq!(state.particles[0].vel, Vec2::ZERO);
    }

    #[test]
    fn test_determinism_with_seeded_rng() {
        let mut a = field(50);
        let mut b = field(50);
        for _ in 0..600 {
            tick(&mut a);
            tick(&mut b);
        }
        assert_eq!(a.particles, b.particles);
    }
}
