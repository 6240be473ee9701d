//! Frame rendering
//!
//! Paints the field onto anything implementing [`Surface`]. The browser build
//! uses the canvas 2D context; tests and the native harness record draw calls
//! into a `Vec<DrawCommand>`.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod color;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use color::Rgba;

use glam::Vec2;
use serde::Serialize;

use crate::field::{FieldState, Particle, SurfaceSize};
use crate::settings::Settings;

/// A 2D drawing target
pub trait Surface {
    /// Erase the whole surface
    fn clear(&mut self, size: SurfaceSize);
    /// Straight line; `color.a` is the stroke opacity
    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba, width: f32);
    /// Filled circle in `color`, composited at global `alpha`
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba, alpha: f32);
}

/// One recorded draw call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawCommand {
    Clear {
        size: SurfaceSize,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Rgba,
        width: f32,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Rgba,
        alpha: f32,
    },
}

/// Recording surface
impl Surface for Vec<DrawCommand> {
    fn clear(&mut self, size: SurfaceSize) {
        Vec::clear(self);
        self.push(DrawCommand::Clear { size });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba, width: f32) {
        self.push(DrawCommand::Line {
            from,
            to,
            color,
            width,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba, alpha: f32) {
        self.push(DrawCommand::Circle {
            center,
            radius,
            color,
            alpha,
        });
    }
}

/// A line between two nearby particles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    /// Indices into the particle list, `a < b`
    pub a: usize,
    pub b: usize,
    pub alpha: f32,
}

/// Draw-call counts for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RenderStats {
    pub connections: usize,
    pub particles: usize,
}

/// Line opacity for two points, `None` at or beyond `radius`.
///
/// Depends only on the distance, so `(a, b)` and `(b, a)` always agree.
#[inline]
pub fn connection_alpha(a: Vec2, b: Vec2, radius: f32, max_alpha: f32) -> Option<f32> {
    let d = a.distance(b);
    (d < radius).then(|| max_alpha * (1.0 - d / radius))
}

/// Every unordered pair closer than the connection radius.
///
/// Plain O(n²) scan; fine for the default population of 50 (1225 pairs).
pub fn connections<'a>(
    particles: &'a [Particle],
    settings: &'a Settings,
) -> impl Iterator<Item = Connection> + 'a {
    particles.iter().enumerate().flat_map(move |(i, p)| {
        particles[i + 1..]
            .iter()
            .enumerate()
            .filter_map(move |(k, q)| {
                connection_alpha(
                    p.pos,
                    q.pos,
                    settings.connection_radius,
                    settings.connection_max_alpha,
                )
                .map(|alpha| Connection {
                    a: i,
                    b: i + 1 + k,
                    alpha,
                })
            })
    })
}

/// Paint one complete frame. Never touches particle state.
pub fn render<R, S: Surface + ?Sized>(state: &FieldState<R>, surface: &mut S) -> RenderStats {
    let settings = &state.settings;
    let particles = &state.particles;
    let mut stats = RenderStats::default();

    surface.clear(state.surface);

    for link in connections(particles, settings) {
        surface.stroke_line(
            particles[link.a].pos,
            particles[link.b].pos,
            color::CONNECTION.with_alpha(link.alpha),
            settings.connection_line_width,
        );
        stats.connections += 1;
    }

    for particle in particles {
        let color = Rgba::from(particle.color);
        let opacity = particle.opacity();
        surface.fill_circle(particle.pos, particle.radius, color, opacity);
        // Soft halo
        surface.fill_circle(
            particle.pos,
            particle.radius * settings.glow_scale,
            color,
            opacity * settings.glow_alpha,
        );
        stats.particles += 1;
    }

    stats
}
