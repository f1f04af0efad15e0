// Host-side tests for the DOM-free browser helpers.
// The web crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod attach {
    include!("../src/attach.rs");
}
mod constants {
    include!("../src/constants.rs");
}
mod fit {
    include!("../src/fit.rs");
}
mod input {
    include!("../src/input.rs");
}

use attach::Attachment;
use constants::*;
use fit::*;
use fx_core::{GlowSpot, PointerState};
use glam::Vec2;
use std::cell::Cell;
use std::rc::Rc;
use input::*;

#[test]
fn glow_values_use_percent_and_pixels() {
    let spot = GlowSpot::from_pointer(
        PointerState::At(Vec2::new(480.0, 270.0)),
        Vec2::new(1920.0, 1080.0),
    )
    .expect("pointer present");
    let values = glow_css_values(&spot);
    assert_eq!(values[0], (CSS_MOUSE_X, "25.00%".to_string()));
    assert_eq!(values[1], (CSS_MOUSE_Y, "25.00%".to_string()));
    assert_eq!(values[2], (CSS_MOUSE_PX, "480.0px".to_string()));
    assert_eq!(values[3], (CSS_MOUSE_PY, "270.0px".to_string()));
}

#[test]
fn fit_resolution() {
    let viewport = Vec2::new(1280.0, 720.0);
    assert_eq!(SurfaceFit::Viewport.resolve(viewport), viewport);
    let fixed = SurfaceFit::from_config(Some(640.0), Some(480.0), SurfaceFit::Viewport);
    assert_eq!(fixed.resolve(viewport), Vec2::new(640.0, 480.0));
    assert!(!fixed.follows_resize());
    // a single fixed axis is not enough to stop tracking the host
    let partial = SurfaceFit::from_config(Some(640.0), None, SurfaceFit::Viewport);
    assert_eq!(partial, SurfaceFit::Viewport);
    assert!(partial.follows_resize());
}

#[test]
fn backing_size_rounds_and_clamps() {
    assert_eq!(backing_size(Vec2::new(300.4, 199.6), MIN_BACKING_PX), (300, 200));
    assert_eq!(backing_size(Vec2::new(0.0, -5.0), MIN_BACKING_PX), (1, 1));
    assert_eq!(backing_size(Vec2::new(f32::NAN, 10.0), MIN_BACKING_PX), (1, 10));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn constants_are_sane() {
    assert!(MAX_FRAME_DT_MS >= 17);
    assert!(MIN_BACKING_PX >= 1);
    for name in [CSS_MOUSE_X, CSS_MOUSE_Y, CSS_MOUSE_PX, CSS_MOUSE_PY] {
        assert!(name.starts_with("--"));
    }
}

struct Wiring {
    live: Rc<Cell<u32>>,
}

impl Wiring {
    fn install(live: &Rc<Cell<u32>>) -> Result<Self, ()> {
        live.set(live.get() + 1);
        Ok(Self { live: live.clone() })
    }
}

impl Drop for Wiring {
    fn drop(&mut self) {
        self.live.set(self.live.get() - 1);
    }
}

#[test]
fn detach_releases_and_ensure_reinstalls_once() {
    let live = Rc::new(Cell::new(0));
    let slot = Attachment::new(Wiring::install(&live).unwrap());
    assert!(slot.is_attached());
    assert_eq!(slot.ensure(|| Wiring::install(&live)), Ok(false));
    assert_eq!(live.get(), 1);

    drop(slot.detach());
    assert!(!slot.is_attached());
    assert_eq!(live.get(), 0);
    assert!(slot.detach().is_none());

    assert_eq!(slot.ensure(|| Wiring::install(&live)), Ok(true));
    assert_eq!(slot.ensure(|| Wiring::install(&live)), Ok(false));
    assert_eq!(live.get(), 1);
}

#[test]
fn failed_install_leaves_slot_detached() {
    let slot: Attachment<u32> = Attachment::default();
    assert_eq!(slot.ensure(|| Err::<u32, _>("no window")), Err("no window"));
    assert!(!slot.is_attached());
}
