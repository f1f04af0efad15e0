//! Pieces of the headless driver that are worth testing on their own.

use std::time::Duration;

use fx_core::{Circle, PointerTracker, RenderError, Stroke, Surface};
use glam::Vec2;

/// Surface that only tallies calls, so long runs keep flat memory.
#[derive(Clone, Debug, Default)]
pub struct CountingSurface {
    size: Vec2,
    pending_resize: Option<Vec2>,
    pub clears: u64,
    pub circles: u64,
    pub lines: u64,
}

impl CountingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            ..Self::default()
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width, height);
        self.pending_resize = Some(self.size);
    }

    /// Draw calls since the last reset, then zero the tallies.
    pub fn reset(&mut self) -> u64 {
        let total = self.clears + self.circles + self.lines;
        self.clears = 0;
        self.circles = 0;
        self.lines = 0;
        total
    }
}

impl Surface for CountingSurface {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn take_resize(&mut self) -> Option<Vec2> {
        self.pending_resize.take()
    }

    fn clear(&mut self) {
        self.clears += 1;
    }

    fn circle(&mut self, _circle: &Circle) -> Result<(), RenderError> {
        self.circles += 1;
        Ok(())
    }

    fn line(&mut self, _from: Vec2, _to: Vec2, _stroke: Stroke) -> Result<(), RenderError> {
        self.lines += 1;
        Ok(())
    }
}

/// Synthetic pointer: orbits the surface centre and leaves the window for
/// part of every lap, so both repel and no-pointer paths get exercised.
#[derive(Clone, Debug)]
pub struct PointerPath {
    center: Vec2,
    radius: f32,
    lap: Duration,
    /// Fraction of each lap spent outside the window.
    away: f32,
}

impl PointerPath {
    pub fn new(bounds: Vec2, lap: Duration) -> Self {
        Self {
            center: bounds * 0.5,
            radius: bounds.min_element() * 0.35,
            lap,
            away: 0.25,
        }
    }

    /// Pointer position at `t`, or `None` while it is away.
    pub fn at(&self, t: Duration) -> Option<Vec2> {
        let lap = self.lap.as_secs_f32();
        if lap <= 0.0 {
            return None;
        }
        let phase = (t.as_secs_f32() / lap).fract();
        if phase >= 1.0 - self.away {
            return None;
        }
        let angle = phase * std::f32::consts::TAU;
        Some(self.center + Vec2::new(angle.cos(), angle.sin()) * self.radius)
    }

    pub fn apply(&self, tracker: &PointerTracker, t: Duration) {
        match self.at(t) {
            Some(p) => tracker.move_to(p.x, p.y),
            None => tracker.leave(),
        }
    }
}
