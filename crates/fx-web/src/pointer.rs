use fx_core::{GlowSpot, PointerTracker};
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::dom::{self, EventListener};
use crate::input;

/// Window-level pointer listeners feeding one [`PointerTracker`].
/// Dropping it removes the listeners.
pub struct PointerWiring {
    _listeners: [EventListener; 2],
}

impl PointerWiring {
    pub fn install(window: &web::Window, tracker: &PointerTracker) -> anyhow::Result<Self> {
        // glow variables are optional decoration; effects still work without them
        let style = match dom::root_style(window) {
            Ok(style) => {
                publish_glow(&style, &GlowSpot::centered(dom::viewport_size(window)));
                Some(style)
            }
            Err(e) => {
                log::warn!("[pointer] glow variables disabled: {:#}", e);
                None
            }
        };

        let moved = {
            let tracker = tracker.clone();
            let viewport_src = window.clone();
            EventListener::passive(window, "pointermove", move |ev| {
                let Some(ev) = ev.dyn_ref::<web::MouseEvent>() else {
                    return;
                };
                tracker.move_to(ev.client_x() as f32, ev.client_y() as f32);
                if let Some(style) = &style {
                    let viewport = dom::viewport_size(&viewport_src);
                    if let Some(spot) = GlowSpot::from_pointer(tracker.get(), viewport) {
                        publish_glow(style, &spot);
                    }
                }
            })?
        };

        let left = {
            let tracker = tracker.clone();
            EventListener::passive(window, "mouseout", move |ev| {
                // only leaving the document counts, not moving between elements
                let leaving = ev
                    .dyn_ref::<web::MouseEvent>()
                    .map_or(true, |ev| ev.related_target().is_none());
                if leaving {
                    tracker.leave();
                    log::debug!("[pointer] left window");
                }
            })?
        };

        log::info!("[pointer] tracking window pointer");
        Ok(Self {
            _listeners: [moved, left],
        })
    }
}

fn publish_glow(style: &web::CssStyleDeclaration, spot: &GlowSpot) {
    for (name, value) in input::glow_css_values(spot) {
        if let Err(e) = style.set_property(name, &value) {
            log::debug!("[pointer] set {} failed: {:?}", name, e);
        }
    }
}

