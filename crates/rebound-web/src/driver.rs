use std::cell::RefCell;
use std::rc::Rc;

use rebound_engine::World;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Drives a [`World`] from `requestAnimationFrame`.
///
/// Each frame does a bounded amount of work, in order: draw the world as the
/// previous frame's stepping left it, feed the frame timestamp to the step
/// scheduler, then queue the next frame. This is the only place wall-clock
/// time enters the simulation. Stopping the loop is the host's business —
/// the driver has no cancellation of its own; it runs for as long as the
/// browser keeps scheduling frames.
pub struct FrameDriver {
    world: Rc<RefCell<World<CanvasRenderingContext2d>>>,
    surface: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl FrameDriver {
    /// Build a driver rendering into the given canvas.
    pub fn new(
        world: Rc<RefCell<World<CanvasRenderingContext2d>>>,
        canvas: &HtmlCanvasElement,
    ) -> Result<Self, JsValue> {
        let surface = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self {
            world,
            surface,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
        })
    }

    /// Look up a canvas element by id and build a driver for it.
    pub fn for_canvas_id(
        world: Rc<RefCell<World<CanvasRenderingContext2d>>>,
        id: &str,
    ) -> Result<Self, JsValue> {
        let document = window()
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas = document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str("canvas element not found"))?
            .dyn_into::<HtmlCanvasElement>()?;
        Self::new(world, &canvas)
    }

    /// Render, then update. `timestamp_ms` is the raf timestamp in
    /// milliseconds; when absent (a manual kick-off) the performance clock
    /// stands in. The scheduler works in seconds, hence the division.
    pub fn run_frame(&mut self, timestamp_ms: Option<f64>) {
        let t = timestamp_ms.unwrap_or_else(now_ms);
        let mut world = self.world.borrow_mut();
        self.surface.clear_rect(0.0, 0.0, self.width, self.height);
        world.render(&mut self.surface);
        world.update(t / 1000.0);
    }

    /// Consume the driver and run forever on the browser's frame clock.
    pub fn start(mut self) {
        let handle: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
        let next = handle.clone();
        *handle.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
            self.run_frame(Some(timestamp));
            request_animation_frame(next.borrow().as_ref().expect("frame closure dropped"));
        }));
        request_animation_frame(handle.borrow().as_ref().expect("frame closure just installed"));
    }
}

fn window() -> web_sys::Window {
    web_sys::window().expect("no global window")
}

fn request_animation_frame(f: &Closure<dyn FnMut(f64)>) {
    window()
        .request_animation_frame(f.as_ref().unchecked_ref())
        .expect("requestAnimationFrame unavailable");
}

fn now_ms() -> f64 {
    window().performance().map(|p| p.now()).unwrap_or(0.0)
}
