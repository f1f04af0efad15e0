#![cfg(target_arch = "wasm32")]
//! Browser front-end: mounts the dashboard effects on `<canvas>` elements and
//! drives them from `requestAnimationFrame`.

mod attach;
mod constants;
mod dom;
mod fit;
mod frame;
mod input;
mod pointer;
mod surface;

use std::cell::RefCell;

use anyhow::Context;
use fx_core::{
    EffectHandle, NetworkConfig, NetworkEffect, ParticleFieldConfig, ParticleFieldEffect,
    PointerTracker, RngSource, Surface,
};
use glam::Vec2;
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;
use web_sys as web;

use crate::attach::Attachment;
use crate::dom::Interval;
use crate::fit::SurfaceFit;
use crate::frame::FrameLoop;
use crate::pointer::PointerWiring;
use crate::surface::CanvasSurface;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("fx-web starting");
    Ok(())
}

/// One dashboard view: a shared pointer tracker plus every mounted effect.
#[wasm_bindgen]
pub struct Dashboard {
    window: web::Window,
    frames: FrameLoop,
    pointer: PointerTracker,
    handles: RefCell<Vec<EffectHandle>>,
    pointer_wiring: Attachment<PointerWiring>,
}

#[wasm_bindgen]
impl Dashboard {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<Dashboard, JsValue> {
        let window = dom::window().map_err(to_js)?;
        let pointer = PointerTracker::new();
        let wiring = PointerWiring::install(&window, &pointer).map_err(to_js)?;
        Ok(Dashboard {
            window,
            frames: FrameLoop::new(),
            pointer,
            handles: RefCell::new(Vec::new()),
            pointer_wiring: Attachment::new(wiring),
        })
    }

    /// Full-page particle field. `config` is a `ParticleFieldConfig`-shaped
    /// object; `undefined` or `null` means defaults.
    #[wasm_bindgen(js_name = mountParticles)]
    pub fn mount_particles(
        &self,
        canvas: web::HtmlCanvasElement,
        config: JsValue,
    ) -> Result<EffectController, JsValue> {
        self.try_mount_particles(canvas, &config)
            .inspect_err(|e| log::error!("[mount] particles failed: {:#}", e))
            .map_err(to_js)
    }

    /// Layered network diagram with travelling pulses.
    #[wasm_bindgen(js_name = mountNetwork)]
    pub fn mount_network(
        &self,
        canvas: web::HtmlCanvasElement,
        config: JsValue,
    ) -> Result<EffectController, JsValue> {
        self.try_mount_network(canvas, &config)
            .inspect_err(|e| log::error!("[mount] network failed: {:#}", e))
            .map_err(to_js)
    }

    /// Number of effects still running.
    #[wasm_bindgen(js_name = liveEffects)]
    pub fn live_effects(&self) -> usize {
        self.frames.live()
    }

    /// Stop every effect and the frame loop, and detach the pointer
    /// listeners. A later mount reattaches them.
    pub fn unmount(&self) {
        for handle in self.handles.borrow_mut().drain(..) {
            handle.stop();
        }
        self.frames.shutdown();
        if self.pointer_wiring.detach().is_some() {
            self.pointer.leave();
            log::info!("[pointer] listeners detached");
        }
    }
}

impl Dashboard {
    fn attach_pointer(&self) -> anyhow::Result<()> {
        if self
            .pointer_wiring
            .ensure(|| PointerWiring::install(&self.window, &self.pointer))?
        {
            log::info!("[pointer] listeners reattached");
        }
        Ok(())
    }

    fn try_mount_particles(
        &self,
        canvas: web::HtmlCanvasElement,
        config: &JsValue,
    ) -> anyhow::Result<EffectController> {
        let config: ParticleFieldConfig = parse_config(config).context("particle config")?;
        config.validate()?;
        let fit = SurfaceFit::from_config(config.width, config.height, SurfaceFit::Viewport);
        let surface = CanvasSurface::attach(&self.window, canvas, fit)?;
        let measured = surface.size();
        let effect = ParticleFieldEffect::new(
            &config,
            measured,
            self.pointer.reader(),
            &mut RngSource::from_entropy(),
        )?;
        self.attach_pointer()?;
        let handle = self.frames.mount(Box::new(effect), surface);
        Ok(self.track(handle))
    }

    fn try_mount_network(
        &self,
        canvas: web::HtmlCanvasElement,
        config: &JsValue,
    ) -> anyhow::Result<EffectController> {
        let config: NetworkConfig = parse_config(config).context("network config")?;
        config.validate()?;
        let rect = canvas.get_bounding_client_rect();
        let measured = Vec2::new(rect.width() as f32, rect.height() as f32);
        let size = config.size_or(measured);
        let surface = CanvasSurface::attach(&self.window, canvas, SurfaceFit::Fixed(size))?;
        let effect = NetworkEffect::new(&config, size, Box::new(RngSource::from_entropy()))?;

        let trigger = effect.spawn_trigger();
        let interval = Interval::new(&self.window, config.spawn_interval_ms, move || {
            trigger.fire()
        })?;
        self.attach_pointer()?;
        let handle = self.frames.mount(Box::new(effect), surface);
        handle.on_stop(move || drop(interval));
        Ok(self.track(handle))
    }

    fn track(&self, handle: EffectHandle) -> EffectController {
        let mut handles = self.handles.borrow_mut();
        handles.retain(EffectHandle::is_alive);
        handles.push(handle.clone());
        EffectController { handle }
    }
}

/// Host-side handle for one mounted effect.
#[wasm_bindgen]
pub struct EffectController {
    handle: EffectHandle,
}

#[wasm_bindgen]
impl EffectController {
    /// Stop the effect. Safe to call more than once; returns whether this
    /// call stopped it.
    pub fn stop(&self) -> bool {
        self.handle.stop()
    }

    #[wasm_bindgen(getter)]
    pub fn alive(&self) -> bool {
        self.handle.is_alive()
    }
}

fn parse_config<T: DeserializeOwned + Default>(value: &JsValue) -> anyhow::Result<T> {
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    let json: String = js_sys::JSON::stringify(value)
        .map_err(|e| anyhow::anyhow!(format!("config is not serializable: {:?}", e)))?
        .into();
    Ok(serde_json::from_str(&json)?)
}

fn to_js(err: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{:#}", err))
}
