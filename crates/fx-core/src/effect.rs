//! Mountable effects: each owns its simulation state exclusively and lends it
//! read-only to the draw routines once per frame.

use std::time::Duration;

use glam::Vec2;

use crate::config::{NetworkConfig, NetworkStyle, ParticleFieldConfig, ParticleStyle};
use crate::error::{ConfigError, RenderError};
use crate::linker::{Connection, ProximityLinker};
use crate::network::{Topology, TopologyParams};
use crate::particles::ParticleField;
use crate::pointer::PointerReader;
use crate::pulses::{Pulse, PulseEmitter, SpawnTrigger};
use crate::random::RandomSource;
use crate::render::{draw_network, draw_particle_field};
use crate::surface::Surface;

/// Timing and placement for one scheduler tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInfo {
    /// Sequence number, starting at 1.
    pub index: u64,
    pub dt: Duration,
    /// Total time since the scheduler started.
    pub elapsed: Duration,
    /// Top-left of this effect's surface in pointer space.
    pub origin: Vec2,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EffectStats {
    /// Particles, or nodes plus live pulses.
    pub entities: usize,
    /// Proximity connections, or static edges.
    pub links: usize,
}

pub trait Effect {
    fn name(&self) -> &'static str;

    /// Advance simulation state by one frame.
    fn update(&mut self, frame: &FrameInfo);

    /// Redraw the whole frame from scratch.
    fn render(&self, surface: &mut dyn Surface, frame: &FrameInfo) -> Result<(), RenderError>;

    /// The host surface changed size.
    fn resize(&mut self, _size: Vec2) {}

    fn stats(&self) -> EffectStats {
        EffectStats::default()
    }
}

/// Drifting particles with proximity links and pointer repulsion.
pub struct ParticleFieldEffect {
    field: ParticleField,
    linker: ProximityLinker,
    pointer: PointerReader,
    style: ParticleStyle,
    fixed_size: (Option<f32>, Option<f32>),
}

impl ParticleFieldEffect {
    pub fn new(
        config: &ParticleFieldConfig,
        measured: Vec2,
        pointer: PointerReader,
        rng: &mut dyn RandomSource,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let bounds = config.size_or(measured);
        let field = ParticleField::new(config.particle_count, bounds, config.field_params(), rng);
        log::info!(
            "[particles] {} particles on {:.0}x{:.0}",
            field.len(),
            bounds.x,
            bounds.y
        );
        Ok(Self {
            field,
            linker: ProximityLinker::with_grid_cutoff(
                config.connection_distance,
                config.grid_cutoff,
            ),
            pointer,
            style: config.style.clone(),
            fixed_size: (config.width, config.height),
        })
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn connections(&self) -> &[Connection] {
        self.linker.connections()
    }
}

impl Effect for ParticleFieldEffect {
    fn name(&self) -> &'static str {
        "particles"
    }

    fn update(&mut self, frame: &FrameInfo) {
        self.field.step(self.pointer.get().relative_to(frame.origin));
        self.linker.relink(self.field.particles());
    }

    fn render(&self, surface: &mut dyn Surface, _frame: &FrameInfo) -> Result<(), RenderError> {
        surface.clear();
        draw_particle_field(
            surface,
            self.field.particles(),
            self.linker.connections(),
            &self.style,
        )
    }

    fn resize(&mut self, size: Vec2) {
        let bounds = Vec2::new(
            self.fixed_size.0.unwrap_or(size.x),
            self.fixed_size.1.unwrap_or(size.y),
        );
        log::debug!("[particles] wrap bounds -> {:.0}x{:.0}", bounds.x, bounds.y);
        self.field.resize(bounds);
    }

    fn stats(&self) -> EffectStats {
        EffectStats {
            entities: self.field.len(),
            links: self.linker.connections().len(),
        }
    }
}

/// Layered node diagram with pulses travelling along its edges.
pub struct NetworkEffect {
    topology: Topology,
    params: TopologyParams,
    emitter: PulseEmitter,
    spawn: SpawnTrigger,
    spawn_interval: Duration,
    rng: Box<dyn RandomSource>,
    style: NetworkStyle,
}

impl NetworkEffect {
    pub fn new(
        config: &NetworkConfig,
        measured: Vec2,
        mut rng: Box<dyn RandomSource>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let params = config.topology_params();
        let topology = Topology::generate(
            &config.layer_sizes,
            config.size_or(measured),
            &params,
            rng.as_mut(),
        )?;
        log::info!(
            "[network] layers={:?} nodes={} edges={}",
            topology.layer_sizes(),
            topology.nodes().len(),
            topology.edges().len()
        );
        Ok(Self {
            topology,
            params,
            emitter: PulseEmitter::new(config.pulse_speed_min, config.pulse_speed_max),
            spawn: SpawnTrigger::new(),
            spawn_interval: Duration::from_millis(u64::from(config.spawn_interval_ms)),
            rng,
            style: config.style.clone(),
        })
    }

    /// Handle for whatever drives the spawn cadence (interval timer, clock).
    pub fn spawn_trigger(&self) -> SpawnTrigger {
        self.spawn.clone()
    }

    pub fn spawn_interval(&self) -> Duration {
        self.spawn_interval
    }

    /// Regenerate the topology for a new layer sequence. Pulses in flight
    /// keep their captured endpoints.
    pub fn set_layers(&mut self, layer_sizes: &[usize]) -> Result<(), ConfigError> {
        if layer_sizes == self.topology.layer_sizes() {
            return Ok(());
        }
        self.topology = Topology::generate(
            layer_sizes,
            self.topology.size(),
            &self.params,
            self.rng.as_mut(),
        )?;
        log::info!(
            "[network] regenerated layers={:?} edges={}",
            layer_sizes,
            self.topology.edges().len()
        );
        Ok(())
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn pulses(&self) -> &[Pulse] {
        self.emitter.active()
    }
}

impl Effect for NetworkEffect {
    fn name(&self) -> &'static str {
        "network"
    }

    fn update(&mut self, _frame: &FrameInfo) {
        for _ in 0..self.spawn.take() {
            self.emitter.spawn(&self.topology, self.rng.as_mut());
        }
        self.emitter.advance();
    }

    fn render(&self, surface: &mut dyn Surface, frame: &FrameInfo) -> Result<(), RenderError> {
        surface.clear();
        draw_network(
            surface,
            &self.topology,
            self.emitter.active(),
            &self.style,
            frame.elapsed.as_secs_f32(),
        )
    }

    fn stats(&self) -> EffectStats {
        EffectStats {
            entities: self.topology.nodes().len() + self.emitter.len(),
            links: self.topology.edges().len(),
        }
    }
}
