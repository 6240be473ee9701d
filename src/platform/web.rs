//! Browser mount/unmount
//!
//! A [`WebMount`] owns one engine instance plus everything it registered with
//! the browser. Dropping it (or calling [`WebMount::unmount`]) stops the
//! engine, cancels the pending animation frame and removes both listeners.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use rand::rngs::ThreadRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, HtmlCanvasElement, MouseEvent, Window};

use crate::engine::{Engine, FrameControl};
use crate::error::MountError;
use crate::field::SurfaceSize;
use crate::renderer::CanvasSurface;
use crate::settings::Settings;

/// Id of the background canvas
pub const CANVAS_ID: &str = "particle-field";

/// Full-viewport layer behind all page content, ignoring pointer input
const BACKGROUND_STYLE: &str = "position: fixed; top: 0; left: 0; width: 100%; height: 100%; \
                                z-index: -2; pointer-events: none; display: block;";

type FrameCallback = Closure<dyn FnMut(f64)>;

/// State touched from browser callbacks
struct Shared {
    engine: Engine<ThreadRng>,
    surface: CanvasSurface,
}

/// A running particle field attached to one canvas
pub struct WebMount {
    window: Window,
    shared: Rc<RefCell<Shared>>,
    /// Self-rescheduling frame closure; holds an Rc to its own slot until released
    frame_callback: Rc<RefCell<Option<FrameCallback>>>,
    on_resize: Option<Closure<dyn FnMut(Event)>>,
    on_pointer: Option<Closure<dyn FnMut(MouseEvent)>>,
}

impl WebMount {
    /// Size `canvas` to the viewport, populate the field and start the frame loop.
    ///
    /// On error nothing stays registered: the partially built mount is dropped
    /// and releases whatever it had attached.
    pub fn mount(canvas: HtmlCanvasElement) -> Result<Self, MountError> {
        let window = web_sys::window().ok_or(MountError::NoWindow)?;
        let surface = CanvasSurface::new(canvas)?;
        let size = viewport_size(&window);
        surface.resize(size);

        let engine = Engine::mount(Settings::default(), size, rand::rng());
        let mut mount = Self {
            window,
            shared: Rc::new(RefCell::new(Shared { engine, surface })),
            frame_callback: Rc::new(RefCell::new(None)),
            on_resize: None,
            on_pointer: None,
        };
        mount.attach_listeners()?;
        mount.start_frames()?;
        Ok(mount)
    }

    /// Stop the field and detach from the browser
    pub fn unmount(mut self) {
        self.release();
    }

    fn attach_listeners(&mut self) -> Result<(), MountError> {
        // Viewport resize
        {
            let shared = Rc::clone(&self.shared);
            let window = self.window.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: Event| {
                let size = viewport_size(&window);
                let mut s = shared.borrow_mut();
                s.surface.resize(size);
                s.engine.resize(size);
            });
            self.window
                .add_event_listener_with_callback("resize", as_function(&closure))
                .map_err(js_error)?;
            self.on_resize = Some(closure);
        }

        // Pointer move (viewport coordinates match the fixed full-screen canvas)
        {
            let shared = Rc::clone(&self.shared);
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let pos = Vec2::new(event.client_x() as f32, event.client_y() as f32);
                shared.borrow_mut().engine.pointer_moved(pos);
            });
            self.window
                .add_event_listener_with_callback("mousemove", as_function(&closure))
                .map_err(js_error)?;
            self.on_pointer = Some(closure);
        }

        Ok(())
    }

    fn start_frames(&mut self) -> Result<(), MountError> {
        let shared = Rc::clone(&self.shared);
        let window = self.window.clone();
        let slot = Rc::clone(&self.frame_callback);

        let closure = FrameCallback::new(move |time: f64| {
            let mut guard = shared.borrow_mut();
            let Shared { engine, surface } = &mut *guard;
            if engine.run_frame(surface, time) == FrameControl::Halt {
                return;
            }
            if let Some(callback) = slot.borrow().as_ref() {
                match window.request_animation_frame(as_function(callback)) {
                    Ok(handle) => engine.frame_scheduled(handle),
                    Err(e) => {
                        log::warn!("requestAnimationFrame failed: {:?}", e);
                        engine.stop();
                    }
                }
            }
        });

        let handle = self
            .window
            .request_animation_frame(as_function(&closure))
            .map_err(js_error)?;
        *self.frame_callback.borrow_mut() = Some(closure);
        self.shared.borrow_mut().engine.frame_scheduled(handle);
        Ok(())
    }

    /// Idempotent teardown shared by `unmount` and `Drop`
    fn release(&mut self) {
        let pending = self.shared.borrow_mut().engine.stop();
        if let Some(handle) = pending {
            let _ = self.window.cancel_animation_frame(handle);
        }

        if let Some(closure) = self.on_resize.take() {
            let _ = self
                .window
                .remove_event_listener_with_callback("resize", as_function(&closure));
        }
        if let Some(closure) = self.on_pointer.take() {
            let _ = self
                .window
                .remove_event_listener_with_callback("mousemove", as_function(&closure));
        }

        // Breaks the closure -> slot -> closure cycle
        self.frame_callback.borrow_mut().take();
    }
}

impl Drop for WebMount {
    fn drop(&mut self) {
        self.release();
    }
}

thread_local! {
    static ACTIVE: RefCell<Option<WebMount>> = const { RefCell::new(None) };
}

/// Mount the field on `#particle-field`, creating the canvas if the page has none.
///
/// Any previous mount is torn down first; remounting always builds a fresh engine.
pub fn mount_background() -> Result<(), MountError> {
    unmount_particle_field();
    let canvas = find_or_create_canvas(CANVAS_ID)?;
    let mount = WebMount::mount(canvas)?;
    ACTIVE.with(|active| *active.borrow_mut() = Some(mount));
    Ok(())
}

/// JS entry: mount the background field. Returns `false` (and draws nothing)
/// if the page cannot host it.
#[wasm_bindgen(js_name = mountParticleField)]
pub fn mount_particle_field() -> bool {
    match mount_background() {
        Ok(()) => true,
        Err(e) => {
            log::warn!("Particle field not mounted: {}", e);
            false
        }
    }
}

/// JS entry: stop the background field and release its browser resources
#[wasm_bindgen(js_name = unmountParticleField)]
pub fn unmount_particle_field() {
    let mount = ACTIVE.with(|active| active.borrow_mut().take());
    if let Some(mount) = mount {
        mount.unmount();
        log::info!("Particle field unmounted");
    }
}

/// Look up an existing canvas by id
pub fn canvas_by_id(id: &str) -> Result<HtmlCanvasElement, MountError> {
    let document = web_sys::window()
        .ok_or(MountError::NoWindow)?
        .document()
        .ok_or(MountError::NoDocument)?;
    document
        .get_element_by_id(id)
        .ok_or_else(|| MountError::CanvasMissing(id.to_string()))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| MountError::NotACanvas(id.to_string()))
}

fn find_or_create_canvas(id: &str) -> Result<HtmlCanvasElement, MountError> {
    match canvas_by_id(id) {
        Err(MountError::CanvasMissing(_)) => {}
        found => return found,
    }

    let document = web_sys::window()
        .ok_or(MountError::NoWindow)?
        .document()
        .ok_or(MountError::NoDocument)?;
    let element = document.create_element("canvas").map_err(js_error)?;
    element.set_id(id);
    element
        .set_attribute("style", BACKGROUND_STYLE)
        .map_err(js_error)?;
    document
        .body()
        .ok_or(MountError::NoBody)?
        .append_child(&element)
        .map_err(js_error)?;
    log::info!("Created background canvas #{}", id);

    element
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| MountError::NotACanvas(id.to_string()))
}

fn viewport_size(window: &Window) -> SurfaceSize {
    SurfaceSize::from_viewport(
        window.inner_width().ok().and_then(|v| v.as_f64()),
        window.inner_height().ok().and_then(|v| v.as_f64()),
    )
}

fn as_function<T: ?Sized>(closure: &Closure<T>) -> &js_sys::Function {
    closure.as_ref().unchecked_ref()
}

fn js_error(e: JsValue) -> MountError {
    MountError::Js(format!("{:?}", e))
}
