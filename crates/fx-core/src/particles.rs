//! Background particle field: drift, pointer repulsion, toroidal wrap.

use glam::Vec2;

use crate::constants::*;
use crate::pointer::PointerState;
use crate::random::RandomSource;

/// One drifting point of the background field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub base_radius: f32,
    /// Drawn radius; inflated while the pointer is near.
    pub radius: f32,
    pub opacity: f32,
}

/// Motion and spawn parameters for a [`ParticleField`].
#[derive(Clone, Debug, PartialEq)]
pub struct FieldParams {
    pub max_speed: f32,
    pub radius_min: f32,
    pub radius_max: f32,
    pub opacity_min: f32,
    pub opacity_max: f32,
    pub repel_radius: f32,
    pub repel_strength: f32,
    pub radius_boost: f32,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            max_speed: DEFAULT_MAX_SPEED,
            radius_min: DEFAULT_PARTICLE_RADIUS_MIN,
            radius_max: DEFAULT_PARTICLE_RADIUS_MAX,
            opacity_min: DEFAULT_PARTICLE_OPACITY_MIN,
            opacity_max: DEFAULT_PARTICLE_OPACITY_MAX,
            repel_radius: DEFAULT_REPEL_RADIUS,
            repel_strength: DEFAULT_REPEL_STRENGTH,
            radius_boost: DEFAULT_RADIUS_BOOST,
        }
    }
}

/// Fixed-size population of particles living on a `bounds.x` by `bounds.y` torus.
#[derive(Clone, Debug)]
pub struct ParticleField {
    particles: Vec<Particle>,
    bounds: Vec2,
    params: FieldParams,
}

impl ParticleField {
    /// Scatter `count` particles uniformly over `[0, w) x [0, h)`.
    pub fn new(
        count: usize,
        bounds: Vec2,
        params: FieldParams,
        rng: &mut dyn RandomSource,
    ) -> Self {
        let particles = (0..count)
            .map(|_| {
                let pos = Vec2::new(
                    wrap_axis(rng.range(0.0, bounds.x), bounds.x),
                    wrap_axis(rng.range(0.0, bounds.y), bounds.y),
                );
                let vel = Vec2::new(
                    rng.range(-params.max_speed, params.max_speed),
                    rng.range(-params.max_speed, params.max_speed),
                );
                let radius = rng.range(params.radius_min, params.radius_max);
                Particle {
                    pos,
                    vel,
                    base_radius: radius,
                    radius,
                    opacity: rng.range(params.opacity_min, params.opacity_max),
                }
            })
            .collect();
        Self {
            particles,
            bounds,
            params,
        }
    }

    /// Build a field from explicit particles instead of a random spawn.
    pub fn from_particles(particles: Vec<Particle>, bounds: Vec2, params: FieldParams) -> Self {
        Self {
            particles,
            bounds,
            params,
        }
    }

    /// Advance one frame: repel, drift, wrap.
    pub fn step(&mut self, pointer: PointerState) {
        let pointer = pointer.position();
        for p in &mut self.particles {
            match pointer.and_then(|at| repel_offset(p.pos, at, &self.params)) {
                Some((offset, force)) => {
                    p.pos += offset;
                    p.radius = p.base_radius + force * self.params.radius_boost;
                }
                None => p.radius = p.base_radius,
            }
            p.pos += p.vel;
            p.pos.x = wrap_axis(p.pos.x, self.bounds.x);
            p.pos.y = wrap_axis(p.pos.y, self.bounds.y);
        }
    }

    /// New wrap bounds. Existing particles keep their positions; any outside
    /// the new bounds re-enter on their next wrap.
    pub fn resize(&mut self, bounds: Vec2) {
        self.bounds = bounds;
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    #[inline]
    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    #[inline]
    pub fn params(&self) -> &FieldParams {
        &self.params
    }
}

/// Displacement pushing `pos` away from `pointer`, and the force in `(0, 1]`.
/// `None` when the pointer is at or beyond the repel radius.
pub fn repel_offset(pos: Vec2, pointer: Vec2, params: &FieldParams) -> Option<(Vec2, f32)> {
    let away = pos - pointer;
    let dist = away.length();
    if dist >= params.repel_radius {
        return None;
    }
    let force = (params.repel_radius - dist) / params.repel_radius;
    let dir = if dist > 0.0 { away / dist } else { Vec2::X };
    Some((dir * force * params.repel_strength, force))
}

/// Fold a coordinate back into `[0, extent)`. Degenerate extents leave it alone.
#[inline]
pub fn wrap_axis(v: f32, extent: f32) -> f32 {
    if extent <= 0.0 || !extent.is_finite() {
        return v;
    }
    let w = v.rem_euclid(extent);
    // rem_euclid can round up to `extent` for tiny negative inputs
    if w >= extent {
        0.0
    } else {
        w
    }
}
