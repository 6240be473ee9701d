//! Field state
//!
//! Everything the engine owns for one mount: particles, pointer, surface
//! size and the random source. Nothing here outlives an unmount.

use glam::Vec2;
use rand::Rng;

use super::bounds::SurfaceSize;
use super::particle::Particle;
use crate::settings::Settings;

/// Mutable simulation state for one engine instance
#[derive(Debug)]
pub struct FieldState<R> {
    pub settings: Settings,
    /// Live particles (length == `settings.population` once initialized)
    pub particles: Vec<Particle>,
    /// Last known pointer position; `None` until the first pointer event so
    /// particles near (0, 0) are not pulled toward a pointer that never moved
    pub pointer: Option<Vec2>,
    pub surface: SurfaceSize,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub(super) rng: R,
}

impl<R: Rng> FieldState<R> {
    /// Create an empty field. Call [`FieldState::initialize`] to populate it.
    pub fn new(settings: Settings, surface: SurfaceSize, rng: R) -> Self {
        Self {
            settings: settings.or_default(),
            particles: Vec::new(),
            pointer: None,
            surface,
            time_ticks: 0,
            rng,
        }
    }

    /// Create and populate a field with `settings.population` particles
    pub fn populated(settings: Settings, surface: SurfaceSize, rng: R) -> Self {
        let mut state = Self::new(settings, surface, rng);
        state.initialize(state.settings.population);
        state
    }

    /// Record a pointer position. Non-finite coordinates are dropped.
    pub fn set_pointer(&mut self, pos: Vec2) {
        if pos.is_finite() {
            self.pointer = Some(pos);
        }
    }

    /// Update the surface bounds. Existing particles are not moved.
    pub fn resize(&mut self, surface: SurfaceSize) {
        self.surface = surface;
    }
}
