use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

use fx_core::{Effect, EffectHandle, Scheduler};
use instant::Instant;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::constants::MAX_FRAME_DT_MS;
use crate::surface::CanvasSurface;

struct LoopState {
    scheduler: RefCell<Scheduler<CanvasSurface>>,
    tick: RefCell<Option<Closure<dyn FnMut()>>>,
    raf_id: Cell<Option<i32>>,
    last: Cell<Option<Instant>>,
}

/// requestAnimationFrame driver for the scheduler.
///
/// Runs only while at least one effect is alive and re-arms itself when a new
/// effect is mounted.
pub struct FrameLoop {
    state: Rc<LoopState>,
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameLoop {
    pub fn new() -> Self {
        let state = Rc::new(LoopState {
            scheduler: RefCell::new(Scheduler::new()),
            tick: RefCell::new(None),
            raf_id: Cell::new(None),
            last: Cell::new(None),
        });
        // the closure only holds a Weak, so dropping the loop frees everything
        let weak: Weak<LoopState> = Rc::downgrade(&state);
        *state.tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            if let Some(state) = weak.upgrade() {
                on_frame(&state);
            }
        }) as Box<dyn FnMut()>));
        Self { state }
    }

    pub fn mount(&self, effect: Box<dyn Effect>, surface: CanvasSurface) -> EffectHandle {
        let handle = self.state.scheduler.borrow_mut().mount(effect, surface);
        if self.state.raf_id.get().is_none() {
            log::debug!("[frame] loop started");
            request(&self.state);
        }
        handle
    }

    pub fn live(&self) -> usize {
        self.state.scheduler.borrow().live()
    }

    /// Stop every effect and cancel any pending frame.
    pub fn shutdown(&self) {
        self.state.scheduler.borrow_mut().stop_all();
        if let Some(id) = self.state.raf_id.take() {
            if let Some(w) = web::window() {
                let _ = w.cancel_animation_frame(id);
            }
        }
        self.state.last.set(None);
        // retire the stopped slots now; no further frame will do it
        self.state.scheduler.borrow_mut().frame(Duration::ZERO);
        log::info!("[frame] loop shut down");
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn request(state: &LoopState) {
    let Some(w) = web::window() else {
        return;
    };
    let tick = state.tick.borrow();
    let Some(tick) = tick.as_ref() else {
        return;
    };
    match w.request_animation_frame(tick.as_ref().unchecked_ref()) {
        Ok(id) => state.raf_id.set(Some(id)),
        Err(e) => log::error!("[frame] requestAnimationFrame failed: {:?}", e),
    }
}

fn on_frame(state: &LoopState) {
    state.raf_id.set(None);
    let now = Instant::now();
    let dt = state
        .last
        .replace(Some(now))
        .map_or(Duration::ZERO, |prev| now - prev)
        .min(Duration::from_millis(MAX_FRAME_DT_MS));

    let report = state.scheduler.borrow_mut().frame(dt);
    if report.skipped > 0 {
        log::trace!("[frame] #{} skipped {}", report.index, report.skipped);
    }

    if state.scheduler.borrow().is_idle() {
        state.last.set(None);
        log::debug!("[frame] loop idle");
        return;
    }
    request(state);
}
