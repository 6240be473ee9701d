//! Frame driver
//!
//! Owns the field for one mount and gates every frame on its
//! Running/Stopped status. The host (browser or native harness) schedules
//! frames and reports the handle back so a stop can cancel it.

use glam::Vec2;
use rand::Rng;
use serde::Serialize;

use crate::field::{FieldState, SurfaceSize, tick};
use crate::renderer::{Surface, render};
use crate::settings::Settings;

/// Host-side id of a scheduled frame callback (`requestAnimationFrame` id)
pub type FrameHandle = i32;

/// Engine lifecycle. `Stopped` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EngineStatus {
    /// A frame callback is (or is about to be) scheduled
    Running,
    /// No callback scheduled, listeners detached
    Stopped,
}

/// Whether the host should schedule another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameControl {
    Continue,
    Halt,
}

/// Running totals, reported by the native harness
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FrameStats {
    pub frames: u64,
    pub retired: u64,
    pub particles: usize,
    pub connections: usize,
    pub fps: u32,
}

/// Particle field engine for one mount
pub struct Engine<R> {
    state: FieldState<R>,
    status: EngineStatus,
    pending_frame: Option<FrameHandle>,
    stats: FrameStats,
    // FPS tracking
    frame_times: [f64; 60],
    frame_index: usize,
}

impl<R: Rng> Engine<R> {
    /// Populate a field sized to `viewport` and start in `Running`
    pub fn mount(settings: Settings, viewport: SurfaceSize, rng: R) -> Self {
        let state = FieldState::populated(settings, viewport, rng);
        log::info!(
            "Particle field mounted: {} particles on {}x{}",
            state.particles.len(),
            viewport.width,
            viewport.height
        );
        Self {
            state,
            status: EngineStatus::Running,
            pending_frame: None,
            stats: FrameStats::default(),
            frame_times: [0.0; 60],
            frame_index: 0,
        }
    }

    pub fn status(&self) -> EngineStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == EngineStatus::Running
    }

    pub fn state(&self) -> &FieldState<R> {
        &self.state
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending_frame
    }

    /// Record the handle of the next scheduled frame
    pub fn frame_scheduled(&mut self, handle: FrameHandle) {
        if self.is_running() {
            self.pending_frame = Some(handle);
        }
    }

    /// Frame callback body: tick, then paint.
    ///
    /// A callback that fires after [`Engine::stop`] does nothing and returns
    /// `Halt`.
    pub fn run_frame<S: Surface + ?Sized>(&mut self, surface: &mut S, time: f64) -> FrameControl {
        self.pending_frame = None;
        if !self.is_running() {
            return FrameControl::Halt;
        }

        let report = tick(&mut self.state);
        let drawn = render(&self.state, surface);

        self.stats.frames += 1;
        self.stats.retired += report.retired as u64;
        self.stats.particles = drawn.particles;
        self.stats.connections = drawn.connections;
        self.track_fps(time);

        FrameControl::Continue
    }

    /// Viewport changed. Only future spawns and reflections see the new bounds.
    pub fn resize(&mut self, size: SurfaceSize) {
        if !self.is_running() {
            return;
        }
        log::debug!("Surface resized to {}x{}", size.width, size.height);
        self.state.resize(size);
    }

    /// Pointer moved; read by the next tick
    pub fn pointer_moved(&mut self, pos: Vec2) {
        if self.is_running() {
            self.state.set_pointer(pos);
        }
    }

    /// Transition to `Stopped`.
    ///
    /// Returns the pending frame handle the host must cancel. Calling it again
    /// is a no-op returning `None`.
    pub fn stop(&mut self) -> Option<FrameHandle> {
        if !self.is_running() {
            return None;
        }
        self.status = EngineStatus::Stopped;
        log::info!("Particle field stopped after {} frames", self.stats.frames);
        self.pending_frame.take()
    }

    fn track_fps(&mut self, time: f64) {
        self.frame_times[self.frame_index] = time;
        self.frame_index = (self.frame_index + 1) % 60;

        // Oldest sample is the one about to be overwritten; 59 intervals span the window
        let oldest_time = self.frame_times[self.frame_index];
        if oldest_time > 0.0 {
            let elapsed = time - oldest_time;
            if elapsed > 0.0 {
                let intervals = (self.frame_times.len() - 1) as f64;
                self.stats.fps = (intervals * 1000.0 / elapsed).round() as u32;
            }
        }

        if self.stats.frames % 600 == 0 {
            log::debug!(
                "{} fps, {} connections, {} retired so far",
                self.stats.fps,
                self.stats.connections,
                self.stats.retired
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::DrawCommand;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn engine() -> Engine<Pcg32> {
        Engine::mount(
            Settings::default(),
            SurfaceSize::new(800.0, 600.0),
            Pcg32::seed_from_u64(2024),
        )
    }

    #[test]
    fn test_mount_starts_running_and_populated() {
        let engine = engine();
        assert_eq!(engine.status(), EngineStatus::Running);
        assert_eq!(engine.state().particles.len(), 50);
        assert_eq!(engine.pending_frame(), None);
    }

    #[test]
    fn test_run_frame_ticks_and_paints() {
        let mut engine = engine();
        let mut frame: Vec<DrawCommand> = Vec::new();

        assert_eq!(engine.run_frame(&mut frame, 16.0), FrameControl::Continue);
        assert_eq!(engine.state().time_ticks, 1);
        assert!(matches!(frame[0], DrawCommand::Clear { .. }));
        assert_eq!(engine.stats().frames, 1);
        assert_eq!(engine.stats().particles, 50);
    }

    #[test]
    fn test_stop_before_first_frame() {
        let mut engine = engine();
        engine.frame_scheduled(1);

        assert_eq!(engine.stop(), Some(1));
        assert_eq!(engine.status(), EngineStatus::Stopped);

        // A stale callback must not mutate anything or ask for more frames
        let before = engine.state().particles.clone();
        let mut frame: Vec<DrawCommand> = Vec::new();
        assert_eq!(engine.run_frame(&mut frame, 16.0), FrameControl::Halt);
        assert!(frame.is_empty());
        assert_eq!(engine.state().time_ticks, 0);
        assert_eq!(engine.state().particles, before);

        engine.frame_scheduled(2);
        assert_eq!(engine.pending_frame(), None);
    }

    #[test]
    fn test_stop_is_terminal_and_idempotent() {
        let mut engine = engine();
        engine.frame_scheduled(7);
        assert_eq!(engine.stop(), Some(7));
        assert_eq!(engine.stop(), None);
        assert_eq!(engine.status(), EngineStatus::Stopped);
    }

    #[test]
    fn test_inputs_ignored_after_stop() {
        let mut engine = engine();
        engine.stop();
        engine.pointer_moved(Vec2::new(10.0, 10.0));
        engine.resize(SurfaceSize::new(100.0, 100.0));
        assert_eq!(engine.state().pointer, None);
        assert_eq!(engine.state().surface, SurfaceSize::new(800.0, 600.0));
    }

    #[test]
    fn test_in_flight_frame_completes_then_halts() {
        let mut engine = engine();
        let mut frame: Vec<DrawCommand> = Vec::new();
        engine.frame_scheduled(1);
        assert_eq!(engine.run_frame(&mut frame, 16.0), FrameControl::Continue);
        engine.frame_scheduled(2);
        // Unmount lands between frames: the pending request is handed back
        assert_eq!(engine.stop(), Some(2));
        assert_eq!(engine.run_frame(&mut frame, 32.0), FrameControl::Halt);
        assert_eq!(engine.state().time_ticks, 1);
    }

    #[test]
    fn test_resize_and_pointer_flow_into_state() {
        let mut engine = engine();
        engine.resize(SurfaceSize::new(1920.0, 1080.0));
        engine.pointer_moved(Vec2::new(5.0, 6.0));
        assert_eq!(engine.state().surface.width, 1920.0);
        assert_eq!(engine.state().pointer, Some(Vec2::new(5.0, 6.0)));
    }

    #[test]
    fn test_fps_tracking() {
        let mut engine = engine();
        let mut frame: Vec<DrawCommand> = Vec::new();
        for i in 1..=120 {
            engine.run_frame(&mut frame, i as f64 * 1000.0 / 60.0);
        }
        assert_eq!(engine.stats().fps, 60);
    }
}
