use std::cell::Cell;
use std::f64::consts::TAU;
use std::rc::Rc;

use anyhow::anyhow;
use fx_core::{Circle, RenderError, Stroke, Surface};
use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::constants::MIN_BACKING_PX;
use crate::dom::{self, EventListener};
use crate::fit::{backing_size, SurfaceFit};

/// [`Surface`] over a `<canvas>` 2D context. One surface unit is one CSS pixel.
pub struct CanvasSurface {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    pending_resize: Rc<Cell<Option<Vec2>>>,
    detached: bool,
    _resize: Option<EventListener>,
}

impl CanvasSurface {
    /// Acquire the 2D context and size the backing store per `fit`.
    pub fn attach(
        window: &web::Window,
        canvas: web::HtmlCanvasElement,
        fit: SurfaceFit,
    ) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow!(format!("getContext failed: {:?}", e)))?
            .ok_or_else(|| anyhow!("2d context unavailable"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|_| anyhow!("context is not a CanvasRenderingContext2d"))?;

        let size = apply_fit(window, &canvas, fit);
        log::info!(
            "[surface] canvas {:.0}x{:.0} ({:?})",
            size.x,
            size.y,
            fit
        );

        let pending_resize = Rc::new(Cell::new(None));
        let resize = if fit.follows_resize() {
            let canvas = canvas.clone();
            let pending = pending_resize.clone();
            let win = window.clone();
            Some(EventListener::passive(window, "resize", move |_| {
                pending.set(Some(apply_fit(&win, &canvas, fit)));
            })?)
        } else {
            None
        };

        Ok(Self {
            canvas,
            ctx,
            pending_resize,
            detached: false,
            _resize: resize,
        })
    }

    fn check_attached(&self) -> Result<(), RenderError> {
        if self.detached {
            Err(RenderError::Detached)
        } else {
            Ok(())
        }
    }
}

/// Resize the backing store to the fit target; returns the new size.
fn apply_fit(window: &web::Window, canvas: &web::HtmlCanvasElement, fit: SurfaceFit) -> Vec2 {
    let (w, h) = backing_size(fit.resolve(dom::viewport_size(window)), MIN_BACKING_PX);
    // assigning width/height clears the canvas, so only touch it on change
    if canvas.width() != w {
        canvas.set_width(w);
    }
    if canvas.height() != h {
        canvas.set_height(h);
    }
    Vec2::new(w as f32, h as f32)
}

impl Surface for CanvasSurface {
    fn size(&self) -> Vec2 {
        Vec2::new(self.canvas.width() as f32, self.canvas.height() as f32)
    }

    fn origin(&self) -> Vec2 {
        let rect = self.canvas.get_bounding_client_rect();
        Vec2::new(rect.left() as f32, rect.top() as f32)
    }

    fn take_resize(&mut self) -> Option<Vec2> {
        self.pending_resize.take()
    }

    fn clear(&mut self) {
        self.detached = !self.canvas.is_connected();
        let size = self.size();
        self.ctx
            .clear_rect(0.0, 0.0, f64::from(size.x), f64::from(size.y));
    }

    fn circle(&mut self, circle: &Circle) -> Result<(), RenderError> {
        self.check_attached()?;
        let ctx = &self.ctx;
        ctx.begin_path();
        ctx.arc(
            f64::from(circle.center.x),
            f64::from(circle.center.y),
            f64::from(circle.radius),
            0.0,
            TAU,
        )
        .map_err(|e| RenderError::surface("arc", format!("{:?}", e)))?;
        match circle.glow {
            Some(glow) => {
                ctx.set_shadow_blur(f64::from(glow.blur));
                ctx.set_shadow_color(&glow.color.to_string());
            }
            None => ctx.set_shadow_blur(0.0),
        }
        if let Some(fill) = circle.fill {
            ctx.set_fill_style_str(&fill.to_string());
            ctx.fill();
        }
        if let Some(stroke) = circle.stroke {
            ctx.set_stroke_style_str(&stroke.color.to_string());
            ctx.set_line_width(f64::from(stroke.width));
            ctx.stroke();
        }
        Ok(())
    }

    fn line(&mut self, from: Vec2, to: Vec2, stroke: Stroke) -> Result<(), RenderError> {
        self.check_attached()?;
        let ctx = &self.ctx;
        ctx.begin_path();
        ctx.move_to(f64::from(from.x), f64::from(from.y));
        ctx.line_to(f64::from(to.x), f64::from(to.y));
        ctx.set_shadow_blur(0.0);
        ctx.set_stroke_style_str(&stroke.color.to_string());
        ctx.set_line_width(f64::from(stroke.width));
        ctx.stroke();
        Ok(())
    }
}
