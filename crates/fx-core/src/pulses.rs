//! Short-lived markers that travel along network edges.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use glam::Vec2;

use crate::constants::*;
use crate::network::Topology;
use crate::random::RandomSource;

/// A marker moving from `from` to `to`. Endpoints are copied at spawn, so a
/// later topology change does not disturb pulses already in flight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pulse {
    pub id: u64,
    pub from: Vec2,
    pub to: Vec2,
    pub progress: f32,
    /// Progress gained per frame.
    pub speed: f32,
    /// Frames advanced since launch.
    pub age: u32,
}

impl Pulse {
    /// Frames needed to reach the destination: `ceil(1 / speed)`.
    ///
    /// Computed in f64 with a small tolerance so speeds like 0.01, which are
    /// not exact in f32, still arrive after exactly 100 frames.
    #[inline]
    pub fn lifetime_frames(speed: f32) -> u32 {
        if speed.is_nan() || speed <= 0.0 {
            return u32::MAX;
        }
        let frames = (1.0 / f64::from(speed) - PULSE_ARRIVAL_EPSILON).ceil();
        // float-to-int `as` saturates
        (frames as u32).max(1)
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.from.lerp(self.to, self.progress)
    }

    /// Fades from 1 at the source to `1 - PULSE_FADE` at the destination.
    #[inline]
    pub fn opacity(&self) -> f32 {
        1.0 - self.progress.clamp(0.0, 1.0) * PULSE_FADE
    }
}

#[derive(Clone, Debug)]
pub struct PulseEmitter {
    active: Vec<Pulse>,
    next_id: u64,
    speed_min: f32,
    speed_max: f32,
}

impl Default for PulseEmitter {
    fn default() -> Self {
        Self::new(DEFAULT_PULSE_SPEED_MIN, DEFAULT_PULSE_SPEED_MAX)
    }
}

impl PulseEmitter {
    pub fn new(speed_min: f32, speed_max: f32) -> Self {
        Self {
            active: Vec::new(),
            next_id: 0,
            speed_min,
            speed_max,
        }
    }

    /// Launch a pulse on a uniformly chosen edge. `None` if there are no edges.
    pub fn spawn(&mut self, topology: &Topology, rng: &mut dyn RandomSource) -> Option<u64> {
        let edges = topology.edges();
        if edges.is_empty() {
            return None;
        }
        let edge = edges[rng.index(edges.len())];
        let (from, to) = topology.endpoints(edge)?;
        let speed = rng.range(self.speed_min, self.speed_max);
        Some(self.launch(from, to, speed))
    }

    /// Launch a pulse between explicit points at a fixed speed.
    pub fn launch(&mut self, from: Vec2, to: Vec2, speed: f32) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.active.push(Pulse {
            id,
            from,
            to,
            progress: 0.0,
            speed,
            age: 0,
        });
        id
    }

    /// Move every pulse forward one frame and drop those past the end.
    ///
    /// Progress is derived from the frame count rather than accumulated, so a
    /// pulse sits at exactly 1.0 on its last frame and is gone on the next.
    pub fn advance(&mut self) {
        self.active.retain_mut(|p| {
            p.age = p.age.saturating_add(1);
            let lifetime = Pulse::lifetime_frames(p.speed);
            if p.age > lifetime {
                return false;
            }
            p.progress = if p.age == lifetime {
                1.0
            } else {
                (p.age as f32 * p.speed).min(1.0)
            };
            true
        });
    }

    #[inline]
    pub fn active(&self) -> &[Pulse] {
        &self.active
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

/// Count of spawns requested since the owning effect last drained it.
///
/// Interval timers and cadences hold clones and [`fire`](Self::fire) it; the
/// effect [`take`](Self::take)s the count during its frame update.
#[derive(Clone, Debug, Default)]
pub struct SpawnTrigger {
    pending: Rc<Cell<u32>>,
}

impl SpawnTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fire(&self) {
        self.fire_n(1);
    }

    pub fn fire_n(&self, n: u32) {
        self.pending.set(self.pending.get().saturating_add(n));
    }

    pub fn take(&self) -> u32 {
        self.pending.replace(0)
    }

    pub fn pending(&self) -> u32 {
        self.pending.get()
    }
}

/// Turns elapsed frame time into due spawns on a fixed interval.
#[derive(Clone, Debug)]
pub struct SpawnCadence {
    interval: Duration,
    accum: Duration,
}

impl SpawnCadence {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            accum: Duration::ZERO,
        }
    }

    /// Number of intervals that completed during `dt`.
    pub fn due(&mut self, dt: Duration) -> u32 {
        if self.interval.is_zero() {
            return 0;
        }
        self.accum += dt;
        let mut n = 0;
        while self.accum >= self.interval {
            self.accum -= self.interval;
            n += 1;
        }
        n
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }
}
