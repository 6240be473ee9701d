//! Particle Field entry point
//!
//! On the web this mounts the background field. Natively it runs the engine
//! headlessly against a recording surface and prints frame statistics.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    log::info!("Particle field starting...");
    particle_field::platform::web::mount_particle_field();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let ticks = match args.next().map(|a| a.parse::<u64>()) {
        None => 600,
        Some(Ok(n)) => n,
        Some(Err(e)) => {
            log::error!("Invalid tick count: {}", e);
            std::process::exit(2);
        }
    };
    let settings = match args.next() {
        None => particle_field::Settings::default(),
        Some(path) => match load_settings(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("Could not load settings from {}: {}", path, e);
                std::process::exit(2);
            }
        },
    };

    let stats = headless::run(settings, ticks);
    match serde_json::to_string_pretty(&stats) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize stats: {}", e),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn load_settings(
    path: &str,
) -> Result<particle_field::Settings, Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(path)?;
    Ok(particle_field::Settings::from_json(&json)?)
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::Vec2;
    use particle_field::engine::FrameStats;
    use particle_field::field::SurfaceSize;
    use particle_field::renderer::DrawCommand;
    use particle_field::{Engine, FrameControl, Settings};

    /// Simulated display refresh (ms)
    const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Drive `ticks` frames with a pointer circling the middle of an 800x600 surface
    pub fn run(settings: Settings, ticks: u64) -> FrameStats {
        let size = SurfaceSize::default();
        let mut engine = Engine::mount(settings, size, rand::rng());
        let mut frame: Vec<DrawCommand> = Vec::new();
        let center = Vec2::new(size.width / 2.0, size.height / 2.0);

        for i in 0..ticks {
            let angle = i as f32 * 0.01;
            engine.pointer_moved(center + Vec2::new(angle.cos(), angle.sin()) * 150.0);
            if engine.run_frame(&mut frame, (i + 1) as f64 * FRAME_MS) == FrameControl::Halt {
                break;
            }
        }

        engine.stop();
        log::info!("Last frame: {} draw calls", frame.len());
        engine.stats()
    }
}
