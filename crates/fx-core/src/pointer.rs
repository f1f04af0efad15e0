//! Latest pointer position, shared read-only with every mounted effect.
//!
//! The tracker is the only writer. Effects receive a [`PointerReader`] at
//! construction. Everything runs on one thread, so a `Cell` is enough.

use std::cell::Cell;
use std::rc::Rc;

use glam::Vec2;

/// Either no pointer over the tracked surface, or its latest position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum PointerState {
    #[default]
    Absent,
    At(Vec2),
}

impl PointerState {
    #[inline]
    pub fn position(self) -> Option<Vec2> {
        match self {
            PointerState::Absent => None,
            PointerState::At(p) => Some(p),
        }
    }

    /// Shift into the space of a surface whose top-left sits at `origin`.
    #[inline]
    pub fn relative_to(self, origin: Vec2) -> Self {
        match self {
            PointerState::Absent => PointerState::Absent,
            PointerState::At(p) => PointerState::At(p - origin),
        }
    }
}

/// Writer side. Clone it into event handlers; all clones share one state.
#[derive(Clone, Debug, Default)]
pub struct PointerTracker {
    state: Rc<Cell<PointerState>>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite with the newest position. No queueing.
    pub fn move_to(&self, x: f32, y: f32) {
        self.state.set(PointerState::At(Vec2::new(x, y)));
    }

    pub fn leave(&self) {
        self.state.set(PointerState::Absent);
    }

    pub fn get(&self) -> PointerState {
        self.state.get()
    }

    pub fn reader(&self) -> PointerReader {
        PointerReader {
            state: self.state.clone(),
        }
    }
}

/// Read-only view handed to simulators.
#[derive(Clone, Debug)]
pub struct PointerReader {
    state: Rc<Cell<PointerState>>,
}

impl PointerReader {
    #[inline]
    pub fn get(&self) -> PointerState {
        self.state.get()
    }

    /// A reader that never sees a pointer.
    pub fn detached() -> Self {
        Self {
            state: Rc::new(Cell::new(PointerState::Absent)),
        }
    }
}

/// Where a viewport-wide glow spotlight should be centred.
///
/// `percent` is the position in viewport percent (0..=100 on each axis),
/// `px` the raw pixel position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlowSpot {
    pub percent: Vec2,
    pub px: Vec2,
}

impl GlowSpot {
    /// Spotlight centre before the pointer has ever moved.
    pub fn centered(viewport: Vec2) -> Self {
        Self {
            percent: Vec2::splat(50.0),
            px: viewport * 0.5,
        }
    }

    /// `None` while the pointer is absent or the viewport is degenerate.
    pub fn from_pointer(state: PointerState, viewport: Vec2) -> Option<Self> {
        let p = state.position()?;
        if viewport.x <= 0.0 || viewport.y <= 0.0 {
            return None;
        }
        Some(Self {
            percent: p / viewport * 100.0,
            px: p,
        })
    }
}
