//! Frame scheduler: once per display refresh, update every live effect and
//! then render every live effect.
//!
//! The platform loop (requestAnimationFrame, a native timer) only calls
//! [`Scheduler::frame`]. Stopping an effect flips its liveness flag and runs
//! its disposers right away; the slot is dropped at the start of the next
//! frame and is never updated or drawn again.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use crate::effect::{Effect, EffectStats, FrameInfo};
use crate::surface::Surface;

pub type EffectId = u64;

struct HandleInner {
    id: EffectId,
    name: &'static str,
    alive: Cell<bool>,
    disposers: RefCell<Vec<Box<dyn FnOnce()>>>,
}

/// Disposal handle for one mounted effect. Clones share the same effect.
#[derive(Clone)]
pub struct EffectHandle {
    inner: Rc<HandleInner>,
}

impl EffectHandle {
    fn new(id: EffectId, name: &'static str) -> Self {
        Self {
            inner: Rc::new(HandleInner {
                id,
                name,
                alive: Cell::new(true),
                disposers: RefCell::new(Vec::new()),
            }),
        }
    }

    #[inline]
    pub fn id(&self) -> EffectId {
        self.inner.id
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.inner.name
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.inner.alive.get()
    }

    /// Register cleanup (listener removal, timer cancel) to run on stop.
    /// Runs immediately when the effect is already stopped.
    pub fn on_stop(&self, dispose: impl FnOnce() + 'static) {
        if self.is_alive() {
            self.inner.disposers.borrow_mut().push(Box::new(dispose));
        } else {
            dispose();
        }
    }

    /// Stop the effect. Idempotent; returns `true` only for the call that
    /// actually stopped it.
    pub fn stop(&self) -> bool {
        if !self.inner.alive.replace(false) {
            return false;
        }
        let disposers = std::mem::take(&mut *self.inner.disposers.borrow_mut());
        // undo registrations in reverse order
        for dispose in disposers.into_iter().rev() {
            dispose();
        }
        log::info!("[scheduler] stopped #{} ({})", self.inner.id, self.inner.name);
        true
    }
}

impl fmt::Debug for EffectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EffectHandle")
            .field("id", &self.inner.id)
            .field("name", &self.inner.name)
            .field("alive", &self.inner.alive.get())
            .finish()
    }
}

struct Slot<S> {
    handle: EffectHandle,
    effect: Box<dyn Effect>,
    surface: S,
}

/// What one call to [`Scheduler::frame`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub index: u64,
    pub updated: usize,
    pub rendered: usize,
    /// Effects whose render failed this frame.
    pub skipped: usize,
    /// Stopped effects dropped before this frame ran.
    pub retired: usize,
}

pub struct Scheduler<S: Surface> {
    slots: Vec<Slot<S>>,
    next_id: EffectId,
    frames: u64,
    elapsed: Duration,
}

impl<S: Surface> Default for Scheduler<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Surface> Scheduler<S> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            next_id: 1,
            frames: 0,
            elapsed: Duration::ZERO,
        }
    }

    /// Start driving `effect` on `surface` from the next frame on.
    pub fn mount(&mut self, effect: Box<dyn Effect>, surface: S) -> EffectHandle {
        let handle = EffectHandle::new(self.next_id, effect.name());
        self.next_id += 1;
        log::info!("[scheduler] mounted #{} ({})", handle.id(), handle.name());
        self.slots.push(Slot {
            handle: handle.clone(),
            effect,
            surface,
        });
        handle
    }

    /// Run one frame: retire stopped effects, apply pending resizes, update
    /// all, then render all.
    pub fn frame(&mut self, dt: Duration) -> FrameReport {
        let before = self.slots.len();
        self.slots.retain(|s| s.handle.is_alive());
        let mut report = FrameReport {
            retired: before - self.slots.len(),
            ..FrameReport::default()
        };
        if self.slots.is_empty() {
            return report;
        }

        self.frames += 1;
        self.elapsed += dt;
        report.index = self.frames;
        let base = FrameInfo {
            index: self.frames,
            dt,
            elapsed: self.elapsed,
            ..FrameInfo::default()
        };

        for slot in &mut self.slots {
            if let Some(size) = slot.surface.take_resize() {
                log::debug!(
                    "[scheduler] #{} resized to {:.0}x{:.0}",
                    slot.handle.id(),
                    size.x,
                    size.y
                );
                slot.effect.resize(size);
            }
        }

        for slot in self.slots.iter_mut().filter(|s| s.handle.is_alive()) {
            let info = FrameInfo {
                origin: slot.surface.origin(),
                ..base
            };
            slot.effect.update(&info);
            report.updated += 1;
        }

        for slot in &mut self.slots {
            // a stop issued during this frame must not reach the surface
            if !slot.handle.is_alive() {
                continue;
            }
            let info = FrameInfo {
                origin: slot.surface.origin(),
                ..base
            };
            match slot.effect.render(&mut slot.surface, &info) {
                Ok(()) => report.rendered += 1,
                Err(e) => {
                    report.skipped += 1;
                    log::warn!(
                        "[frame] #{} ({}) skipped frame {}: {}",
                        slot.handle.id(),
                        slot.handle.name(),
                        self.frames,
                        e
                    );
                }
            }
        }
        report
    }

    /// Stop every mounted effect; the next frame retires them all.
    pub fn stop_all(&mut self) {
        for slot in &self.slots {
            slot.handle.stop();
        }
    }

    /// Number of effects still alive.
    pub fn live(&self) -> usize {
        self.slots.iter().filter(|s| s.handle.is_alive()).count()
    }

    pub fn is_idle(&self) -> bool {
        self.live() == 0
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn surface(&self, id: EffectId) -> Option<&S> {
        self.slots
            .iter()
            .find(|s| s.handle.id() == id)
            .map(|s| &s.surface)
    }

    pub fn surface_mut(&mut self, id: EffectId) -> Option<&mut S> {
        self.slots
            .iter_mut()
            .find(|s| s.handle.id() == id)
            .map(|s| &mut s.surface)
    }

    /// Per-effect statistics for live effects.
    pub fn stats(&self) -> Vec<(EffectId, &'static str, EffectStats)> {
        self.slots
            .iter()
            .filter(|s| s.handle.is_alive())
            .map(|s| (s.handle.id(), s.handle.name(), s.effect.stats()))
            .collect()
    }
}
