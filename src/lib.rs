//! Particle Field - an ambient 2D particle background
//!
//! Core modules:
//! - `field`: Particle simulation (lifecycle, physics step, field state)
//! - `renderer`: Frame painting onto an abstract 2D drawing surface
//! - `engine`: Running/Stopped frame driver owning the field
//! - `platform`: Browser mount/unmount wiring (wasm32 only)
//! - `settings`: Tunables with defaults from `consts`

pub mod engine;
pub mod error;
pub mod field;
pub mod platform;
pub mod renderer;
pub mod settings;

pub use engine::{Engine, EngineStatus, FrameControl, FrameStats};
pub use error::{MountError, SettingsError};
pub use settings::Settings;

/// Field configuration constants
pub mod consts {
    /// Live particle count kept constant for the engine's lifetime
    pub const DEFAULT_POPULATION: usize = 50;
    /// Upper bound accepted from settings
    pub const MAX_POPULATION: usize = 5_000;
    /// Upper bound for speeds, radii and scales accepted from settings
    pub const MAX_SETTING_MAGNITUDE: f32 = 1.0e6;

    /// Pointer attraction radius (pixels)
    pub const INTERACTION_RADIUS: f32 = 100.0;
    /// Velocity impulse scale applied inside the interaction radius
    pub const ATTRACTION_STRENGTH: f32 = 0.0001;

    /// Spawn velocity components are drawn from ±this (pixels/tick)
    pub const MAX_SPAWN_SPEED: f32 = 0.25;
    /// Particle radius range (pixels)
    pub const RADIUS_MIN: f32 = 1.0;
    pub const RADIUS_MAX: f32 = 4.0;
    /// Base opacity range
    pub const OPACITY_MIN: f32 = 0.2;
    pub const OPACITY_MAX: f32 = 0.7;
    /// Lifespan range (ticks)
    pub const LIFESPAN_MIN: u32 = 200;
    pub const LIFESPAN_MAX: u32 = 500;

    /// Pairs closer than this get a connection line
    pub const CONNECTION_RADIUS: f32 = 100.0;
    /// Line opacity for two coincident particles
    pub const CONNECTION_MAX_ALPHA: f32 = 0.2;
    pub const CONNECTION_LINE_WIDTH: f32 = 1.5;

    /// Glow halo radius multiplier and opacity share
    pub const GLOW_SCALE: f32 = 2.0;
    pub const GLOW_ALPHA: f32 = 0.2;

    /// Surface size used before the viewport is known (or when it is degenerate)
    pub const DEFAULT_SURFACE_WIDTH: f32 = 800.0;
    pub const DEFAULT_SURFACE_HEIGHT: f32 = 600.0;
}
