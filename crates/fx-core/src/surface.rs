//! Host drawing surface abstraction.
//!
//! The browser front-end implements this over a 2D canvas context. The
//! recording implementation here backs tests.

use glam::Vec2;

use crate::color::Rgba;
use crate::error::RenderError;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: Rgba,
    pub width: f32,
}

/// Soft shadow drawn around a shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glow {
    pub color: Rgba,
    pub blur: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
    pub fill: Option<Rgba>,
    pub stroke: Option<Stroke>,
    pub glow: Option<Glow>,
}

impl Circle {
    pub fn filled(center: Vec2, radius: f32, fill: Rgba) -> Self {
        Self {
            center,
            radius,
            fill: Some(fill),
            stroke: None,
            glow: None,
        }
    }

    pub fn with_stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = Some(stroke);
        self
    }

    pub fn with_glow(mut self, glow: Glow) -> Self {
        self.glow = Some(glow);
        self
    }
}

pub trait Surface {
    /// Current drawable size in surface units.
    fn size(&self) -> Vec2;

    /// Top-left of the surface in pointer coordinate space.
    fn origin(&self) -> Vec2 {
        Vec2::ZERO
    }

    /// Size change observed since the last call, if any.
    fn take_resize(&mut self) -> Option<Vec2> {
        None
    }

    /// Wipe the whole surface.
    fn clear(&mut self);

    fn circle(&mut self, circle: &Circle) -> Result<(), RenderError>;

    fn line(&mut self, from: Vec2, to: Vec2, stroke: Stroke) -> Result<(), RenderError>;
}

/// One recorded drawing call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Clear,
    Circle(Circle),
    Line { from: Vec2, to: Vec2, stroke: Stroke },
}

/// Surface that keeps every call in memory.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    size: Vec2,
    origin: Vec2,
    pending_resize: Option<Vec2>,
    ops: Vec<DrawOp>,
    fail_circles: bool,
}

/// Per-kind tally of recorded calls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OpCounts {
    pub clears: usize,
    pub circles: usize,
    pub lines: usize,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            ..Self::default()
        }
    }

    pub fn with_origin(mut self, origin: Vec2) -> Self {
        self.origin = origin;
        self
    }

    /// Make every subsequent `circle` call fail, to exercise skipped frames.
    pub fn fail_circles(&mut self, fail: bool) {
        self.fail_circles = fail;
    }

    /// Simulate the host resizing this surface.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width, height);
        self.pending_resize = Some(self.size);
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn counts(&self) -> OpCounts {
        self.ops.iter().fold(OpCounts::default(), |mut c, op| {
            match op {
                DrawOp::Clear => c.clears += 1,
                DrawOp::Circle(_) => c.circles += 1,
                DrawOp::Line { .. } => c.lines += 1,
            }
            c
        })
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn origin(&self) -> Vec2 {
        self.origin
    }

    fn take_resize(&mut self) -> Option<Vec2> {
        self.pending_resize.take()
    }

    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear);
    }

    fn circle(&mut self, circle: &Circle) -> Result<(), RenderError> {
        if self.fail_circles {
            return Err(RenderError::surface("circle", "scripted failure"));
        }
        self.ops.push(DrawOp::Circle(*circle));
        Ok(())
    }

    fn line(&mut self, from: Vec2, to: Vec2, stroke: Stroke) -> Result<(), RenderError> {
        self.ops.push(DrawOp::Line { from, to, stroke });
        Ok(())
    }
}
