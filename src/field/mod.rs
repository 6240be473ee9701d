//! Particle field simulation
//!
//! All particle logic lives here:
//! - One tick per rendered frame, unit time-step
//! - Randomness comes from the injected `Rng` only
//! - No rendering or platform dependencies

pub mod bounds;
pub mod lifecycle;
pub mod particle;
pub mod state;
pub mod tick;

pub use bounds::SurfaceSize;
pub use lifecycle::spawn;
pub use particle::{Particle, ParticleColor};
pub use state::FieldState;
pub use tick::{TickReport, attraction_factor, tick};
