//! Transient links between particles that are currently close together.

use fnv::FnvHashMap;
use smallvec::SmallVec;

use crate::constants::DEFAULT_GRID_CUTOFF;
use crate::particles::Particle;

/// Unordered particle pair `a < b` with a render weight in `(0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connection {
    pub a: usize,
    pub b: usize,
    pub weight: f32,
}

/// Linear falloff: 1 at distance zero, 0 at the threshold and beyond.
#[inline]
pub fn link_weight(distance: f32, threshold: f32) -> f32 {
    if threshold <= 0.0 {
        return 0.0;
    }
    (1.0 - distance / threshold).clamp(0.0, 1.0)
}

/// All pairs closer than `threshold`, by scanning every `i < j` once.
pub fn link_pairs(particles: &[Particle], threshold: f32, out: &mut Vec<Connection>) {
    out.clear();
    for (i, p) in particles.iter().enumerate() {
        for (j, q) in particles.iter().enumerate().skip(i + 1) {
            if let Some(c) = try_link(i, p, j, q, threshold) {
                out.push(c);
            }
        }
    }
}

/// Grid bucket coordinate for [`link_pairs_grid`].
pub type GridCell = (i32, i32);

/// Same result set as [`link_pairs`], bucketing particles into a grid whose
/// cell edge equals `threshold` so only neighbouring cells are compared.
pub fn link_pairs_grid(
    particles: &[Particle],
    threshold: f32,
    grid: &mut FnvHashMap<GridCell, SmallVec<[usize; 8]>>,
    out: &mut Vec<Connection>,
) {
    out.clear();
    grid.clear();
    if threshold <= 0.0 {
        return;
    }
    let cell_of = |p: &Particle| {
        (
            (p.pos.x / threshold).floor() as i32,
            (p.pos.y / threshold).floor() as i32,
        )
    };
    for (i, p) in particles.iter().enumerate() {
        grid.entry(cell_of(p)).or_default().push(i);
    }
    for (i, p) in particles.iter().enumerate() {
        let (cx, cy) = cell_of(p);
        for dx in -1..=1 {
            for dy in -1..=1 {
                let Some(bucket) = grid.get(&(cx + dx, cy + dy)) else {
                    continue;
                };
                for &j in bucket.iter().filter(|&&j| j > i) {
                    if let Some(c) = try_link(i, p, j, &particles[j], threshold) {
                        out.push(c);
                    }
                }
            }
        }
    }
}

#[inline]
fn try_link(i: usize, p: &Particle, j: usize, q: &Particle, threshold: f32) -> Option<Connection> {
    let dist = p.pos.distance(q.pos);
    (dist < threshold).then(|| Connection {
        a: i,
        b: j,
        weight: link_weight(dist, threshold),
    })
}

/// Recomputes the connection set from scratch each frame, reusing its buffers.
#[derive(Debug, Clone)]
pub struct ProximityLinker {
    threshold: f32,
    grid_cutoff: usize,
    connections: Vec<Connection>,
    grid: FnvHashMap<GridCell, SmallVec<[usize; 8]>>,
}

impl ProximityLinker {
    pub fn new(threshold: f32) -> Self {
        Self::with_grid_cutoff(threshold, DEFAULT_GRID_CUTOFF)
    }

    /// `grid_cutoff` is the particle count from which the grid path is used.
    pub fn with_grid_cutoff(threshold: f32, grid_cutoff: usize) -> Self {
        Self {
            threshold,
            grid_cutoff,
            connections: Vec::new(),
            grid: FnvHashMap::default(),
        }
    }

    pub fn relink(&mut self, particles: &[Particle]) -> &[Connection] {
        if particles.len() >= self.grid_cutoff {
            link_pairs_grid(
                particles,
                self.threshold,
                &mut self.grid,
                &mut self.connections,
            );
        } else {
            link_pairs(particles, self.threshold, &mut self.connections);
        }
        &self.connections
    }

    #[inline]
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    #[inline]
    pub fn threshold(&self) -> f32 {
        self.threshold
    }
}
