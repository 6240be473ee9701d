//! Drawing surface dimensions

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_SURFACE_HEIGHT, DEFAULT_SURFACE_WIDTH};

/// Width/height of the drawing target.
///
/// Always finite and positive: degenerate axes are replaced on construction
/// so spawn and reflection never see a zero-area or NaN surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: f32,
    pub height: f32,
}

impl Default for SurfaceSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_SURFACE_WIDTH,
            height: DEFAULT_SURFACE_HEIGHT,
        }
    }
}

impl SurfaceSize {
    pub fn new(width: f32, height: f32) -> Self {
        let size = Self {
            width: sanitize(width, DEFAULT_SURFACE_WIDTH),
            height: sanitize(height, DEFAULT_SURFACE_HEIGHT),
        };
        if size.width != width || size.height != height {
            log::debug!(
                "Degenerate surface {}x{}, using {}x{}",
                width,
                height,
                size.width,
                size.height
            );
        }
        size
    }

    /// Build from an optional viewport reading (e.g. `window.innerWidth`)
    pub fn from_viewport(width: Option<f64>, height: Option<f64>) -> Self {
        Self::new(
            width.map_or(f32::NAN, |w| w as f32),
            height.map_or(f32::NAN, |h| h as f32),
        )
    }

    #[inline]
    pub fn contains_x(&self, x: f32) -> bool {
        (0.0..=self.width).contains(&x)
    }

    #[inline]
    pub fn contains_y(&self, y: f32) -> bool {
        (0.0..=self.height).contains(&y)
    }

    pub fn contains(&self, p: Vec2) -> bool {
        self.contains_x(p.x) && self.contains_y(p.y)
    }
}

#[inline]
fn sanitize(value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_size_kept() {
        let size = SurfaceSize::new(1024.0, 768.0);
        assert_eq!(size.width, 1024.0);
        assert_eq!(size.height, 768.0);
    }

    #[test]
    fn test_degenerate_axes_fall_back() {
        let size = SurfaceSize::new(0.0, f32::NAN);
        assert_eq!(size, SurfaceSize::default());

        let size = SurfaceSize::new(f32::INFINITY, 300.0);
        assert_eq!(size.width, DEFAULT_SURFACE_WIDTH);
        assert_eq!(size.height, 300.0);
    }

    #[test]
    fn test_missing_viewport_falls_back() {
        assert_eq!(SurfaceSize::from_viewport(None, None), SurfaceSize::default());
        assert_eq!(
            SurfaceSize::from_viewport(Some(1280.0), Some(-5.0)),
            SurfaceSize::new(1280.0, DEFAULT_SURFACE_HEIGHT)
        );
    }

    #[test]
    fn test_contains_is_inclusive() {
        let size = SurfaceSize::new(800.0, 600.0);
        assert!(size.contains(Vec2::new(0.0, 600.0)));
        assert!(!size.contains(Vec2::new(-0.1, 10.0)));
        assert!(!size.contains(Vec2::new(10.0, 600.1)));
    }
}
