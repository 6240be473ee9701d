//! Canvas 2D surface

use std::f64::consts::TAU;

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{Rgba, Surface};
use crate::error::MountError;
use crate::field::SurfaceSize;

/// [`Surface`] backed by a `CanvasRenderingContext2d`
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Grab the 2D context of `canvas`
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, MountError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| MountError::Js(format!("{:?}", e)))?
            .ok_or(MountError::ContextUnavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| MountError::ContextUnavailable)?;
        Ok(Self { canvas, ctx })
    }

    /// Match the canvas backing store to `size` (CSS pixels)
    pub fn resize(&self, size: SurfaceSize) {
        self.canvas.set_width(size.width as u32);
        self.canvas.set_height(size.height as u32);
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, size: SurfaceSize) {
        self.ctx
            .clear_rect(0.0, 0.0, size.width as f64, size.height as f64);
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba, width: f32) {
        self.ctx.begin_path();
        self.ctx.set_stroke_style_str(&color.css());
        self.ctx.set_line_width(width as f64);
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.stroke();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba, alpha: f32) {
        self.ctx.begin_path();
        // arc() only throws for a negative radius
        if self
            .ctx
            .arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU)
            .is_err()
        {
            return;
        }
        self.ctx.set_fill_style_str(&color.css());
        self.ctx.set_global_alpha(alpha as f64);
        self.ctx.fill();
        self.ctx.set_global_alpha(1.0);
    }
}
