//! Field settings
//!
//! The browser build always runs with `Settings::default()`. Custom values
//! only come in through the native harness or tests.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;

/// Field tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Live particle count
    pub population: usize,

    // === Pointer interaction ===
    /// Attraction radius around the pointer
    pub interaction_radius: f32,
    /// Impulse scale inside the radius
    pub attraction_strength: f32,

    // === Spawn ranges ===
    pub max_spawn_speed: f32,
    pub radius_min: f32,
    pub radius_max: f32,
    pub opacity_min: f32,
    pub opacity_max: f32,
    pub lifespan_min: u32,
    pub lifespan_max: u32,

    // === Rendering ===
    pub connection_radius: f32,
    pub connection_max_alpha: f32,
    pub connection_line_width: f32,
    pub glow_scale: f32,
    pub glow_alpha: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            population: DEFAULT_POPULATION,

            interaction_radius: INTERACTION_RADIUS,
            attraction_strength: ATTRACTION_STRENGTH,

            max_spawn_speed: MAX_SPAWN_SPEED,
            radius_min: RADIUS_MIN,
            radius_max: RADIUS_MAX,
            opacity_min: OPACITY_MIN,
            opacity_max: OPACITY_MAX,
            lifespan_min: LIFESPAN_MIN,
            lifespan_max: LIFESPAN_MAX,

            connection_radius: CONNECTION_RADIUS,
            connection_max_alpha: CONNECTION_MAX_ALPHA,
            connection_line_width: CONNECTION_LINE_WIDTH,
            glow_scale: GLOW_SCALE,
            glow_alpha: GLOW_ALPHA,
        }
    }
}

impl Settings {
    /// Parse settings from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check every range and radius. Spawning samples these ranges directly,
    /// so an inverted range must never reach the lifecycle code.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.population > MAX_POPULATION {
            return Err(SettingsError::TooLarge {
                field: "population",
            });
        }
        bounded("interaction_radius", self.interaction_radius)?;
        bounded("connection_radius", self.connection_radius)?;
        bounded("max_spawn_speed", self.max_spawn_speed)?;
        bounded("radius_max", self.radius_max)?;
        bounded("glow_scale", self.glow_scale)?;

        positive("interaction_radius", self.interaction_radius)?;
        positive("connection_radius", self.connection_radius)?;
        positive("radius_min", self.radius_min)?;
        positive("glow_scale", self.glow_scale)?;

        if !self.attraction_strength.is_finite() || self.attraction_strength < 0.0 {
            return Err(SettingsError::NonPositive {
                field: "attraction_strength",
            });
        }
        if !self.max_spawn_speed.is_finite() || self.max_spawn_speed < 0.0 {
            return Err(SettingsError::NonPositive {
                field: "max_spawn_speed",
            });
        }

        range("radius", self.radius_min, self.radius_max)?;
        range("opacity", self.opacity_min, self.opacity_max)?;
        if self.opacity_min <= 0.0 || self.opacity_max >= 1.0 {
            return Err(SettingsError::InvalidRange { field: "opacity" });
        }
        if self.lifespan_min == 0 {
            return Err(SettingsError::NonPositive {
                field: "lifespan_min",
            });
        }
        if self.lifespan_min > self.lifespan_max {
            return Err(SettingsError::InvalidRange { field: "lifespan" });
        }
        range("connection_max_alpha", 0.0, self.connection_max_alpha)?;
        range("glow_alpha", 0.0, self.glow_alpha)?;
        positive("connection_line_width", self.connection_line_width)?;
        Ok(())
    }

    /// Return these settings if valid, otherwise the defaults
    pub fn or_default(self) -> Self {
        match self.validate() {
            Ok(()) => self,
            Err(e) => {
                log::warn!("Invalid settings ({}), using defaults", e);
                Self::default()
            }
        }
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), SettingsError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SettingsError::NonPositive { field })
    }
}

/// Finite but huge values overflow `max - min` inside `random_range`.
/// Non-finite values are left to the positivity and range checks.
fn bounded(field: &'static str, value: f32) -> Result<(), SettingsError> {
    if !value.is_finite() || value.abs() <= MAX_SETTING_MAGNITUDE {
        Ok(())
    } else {
        Err(SettingsError::TooLarge { field })
    }
}

fn range(field: &'static str, min: f32, max: f32) -> Result<(), SettingsError> {
    if min.is_finite() && max.is_finite() && min <= max && (max - min).is_finite() {
        Ok(())
    } else {
        Err(SettingsError::InvalidRange { field })
    }
}
