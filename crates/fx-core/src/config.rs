//! Construction-time configuration supplied by the dashboard host.
//!
//! Field names are camelCase on the wire so the host can pass plain JS
//! objects; every field is optional and falls back to [`crate::constants`].

use glam::Vec2;
use serde::Deserialize;

use crate::color::{Rgb, ACCENT, NODE_FILL};
use crate::constants::*;
use crate::error::ConfigError;
use crate::network::{validate_layers, TopologyParams};
use crate::particles::FieldParams;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParticleStyle {
    pub color: Rgb,
    pub glow_blur: f32,
    pub glow_alpha: f32,
    pub link_width: f32,
    /// Link opacity at distance zero; scaled by the link weight.
    pub link_opacity: f32,
}

impl Default for ParticleStyle {
    fn default() -> Self {
        Self {
            color: ACCENT,
            glow_blur: DEFAULT_PARTICLE_GLOW_BLUR,
            glow_alpha: DEFAULT_PARTICLE_GLOW_ALPHA,
            link_width: DEFAULT_LINK_WIDTH,
            link_opacity: DEFAULT_LINK_OPACITY,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParticleFieldConfig {
    pub particle_count: usize,
    pub connection_distance: f32,
    pub repel_radius: f32,
    pub repel_strength: f32,
    pub radius_boost: f32,
    pub max_speed: f32,
    pub radius_min: f32,
    pub radius_max: f32,
    pub opacity_min: f32,
    pub opacity_max: f32,
    /// Fixed surface size; `None` means measure the host surface.
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub grid_cutoff: usize,
    pub style: ParticleStyle,
}

impl Default for ParticleFieldConfig {
    fn default() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT,
            connection_distance: DEFAULT_CONNECTION_DISTANCE,
            repel_radius: DEFAULT_REPEL_RADIUS,
            repel_strength: DEFAULT_REPEL_STRENGTH,
            radius_boost: DEFAULT_RADIUS_BOOST,
            max_speed: DEFAULT_MAX_SPEED,
            radius_min: DEFAULT_PARTICLE_RADIUS_MIN,
            radius_max: DEFAULT_PARTICLE_RADIUS_MAX,
            opacity_min: DEFAULT_PARTICLE_OPACITY_MIN,
            opacity_max: DEFAULT_PARTICLE_OPACITY_MAX,
            width: None,
            height: None,
            grid_cutoff: DEFAULT_GRID_CUTOFF,
            style: ParticleStyle::default(),
        }
    }
}

impl ParticleFieldConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particle_count == 0 {
            return Err(ConfigError::NoParticles);
        }
        positive("connectionDistance", self.connection_distance)?;
        positive("repelRadius", self.repel_radius)?;
        non_negative("repelStrength", self.repel_strength)?;
        non_negative("radiusBoost", self.radius_boost)?;
        non_negative("maxSpeed", self.max_speed)?;
        range("radius", self.radius_min, self.radius_max)?;
        range("opacity", self.opacity_min, self.opacity_max)?;
        optional_positive("width", self.width)?;
        optional_positive("height", self.height)?;
        non_negative("style.glowBlur", self.style.glow_blur)?;
        non_negative("style.linkWidth", self.style.link_width)?;
        Ok(())
    }

    pub fn field_params(&self) -> FieldParams {
        FieldParams {
            max_speed: self.max_speed,
            radius_min: self.radius_min,
            radius_max: self.radius_max,
            opacity_min: self.opacity_min,
            opacity_max: self.opacity_max,
            repel_radius: self.repel_radius,
            repel_strength: self.repel_strength,
            radius_boost: self.radius_boost,
        }
    }

    /// Configured size, falling back to the measured host size per axis.
    pub fn size_or(&self, measured: Vec2) -> Vec2 {
        Vec2::new(
            self.width.unwrap_or(measured.x),
            self.height.unwrap_or(measured.y),
        )
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NetworkStyle {
    pub accent: Rgb,
    pub node_fill: Rgb,
    pub edge_opacity: f32,
    pub edge_width: f32,
    pub pulse_radius: f32,
    pub glow_blur: f32,
    /// Applied on top of every other alpha in the diagram.
    pub opacity: f32,
}

impl Default for NetworkStyle {
    fn default() -> Self {
        Self {
            accent: ACCENT,
            node_fill: NODE_FILL,
            edge_opacity: DEFAULT_EDGE_OPACITY,
            edge_width: DEFAULT_EDGE_WIDTH,
            pulse_radius: DEFAULT_PULSE_RADIUS,
            glow_blur: DEFAULT_NETWORK_GLOW_BLUR,
            opacity: DEFAULT_NETWORK_OPACITY,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NetworkConfig {
    pub layer_sizes: Vec<usize>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub spawn_interval_ms: u32,
    pub pulse_speed_min: f32,
    pub pulse_speed_max: f32,
    pub node_radius_min: f32,
    pub node_radius_max: f32,
    pub max_edges_per_node: usize,
    pub style: NetworkStyle,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            layer_sizes: DEFAULT_LAYER_SIZES.to_vec(),
            width: None,
            height: None,
            spawn_interval_ms: DEFAULT_SPAWN_INTERVAL_MS,
            pulse_speed_min: DEFAULT_PULSE_SPEED_MIN,
            pulse_speed_max: DEFAULT_PULSE_SPEED_MAX,
            node_radius_min: DEFAULT_NODE_RADIUS_MIN,
            node_radius_max: DEFAULT_NODE_RADIUS_MAX,
            max_edges_per_node: DEFAULT_MAX_EDGES_PER_NODE,
            style: NetworkStyle::default(),
        }
    }
}

impl NetworkConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_layers(&self.layer_sizes)?;
        if self.spawn_interval_ms == 0 {
            return Err(ConfigError::ZeroSpawnInterval);
        }
        if self.max_edges_per_node == 0 {
            return Err(ConfigError::NoEdgesPerNode);
        }
        positive("pulseSpeedMin", self.pulse_speed_min)?;
        range("pulseSpeed", self.pulse_speed_min, self.pulse_speed_max)?;
        non_negative("nodeRadiusMin", self.node_radius_min)?;
        range("nodeRadius", self.node_radius_min, self.node_radius_max)?;
        optional_positive("width", self.width)?;
        optional_positive("height", self.height)?;
        non_negative("style.pulseRadius", self.style.pulse_radius)?;
        non_negative("style.opacity", self.style.opacity)?;
        Ok(())
    }

    pub fn topology_params(&self) -> TopologyParams {
        TopologyParams {
            node_radius_min: self.node_radius_min,
            node_radius_max: self.node_radius_max,
            max_edges_per_node: self.max_edges_per_node,
        }
    }

    /// Configured size, else the measured host size, else the built-in default.
    pub fn size_or(&self, measured: Vec2) -> Vec2 {
        let pick = |fixed: Option<f32>, measured: f32, fallback: f32| {
            fixed.unwrap_or(if measured > 0.0 { measured } else { fallback })
        };
        Vec2::new(
            pick(self.width, measured.x, DEFAULT_NETWORK_WIDTH),
            pick(self.height, measured.y, DEFAULT_NETWORK_HEIGHT),
        )
    }
}

/// Both effects of a dashboard view; either may be left out.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DashboardConfig {
    pub particles: Option<ParticleFieldConfig>,
    pub network: Option<NetworkConfig>,
}

impl DashboardConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(p) = &self.particles {
            p.validate()?;
        }
        if let Some(n) = &self.network {
            n.validate()?;
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn optional_positive(field: &'static str, value: Option<f32>) -> Result<(), ConfigError> {
    value.map_or(Ok(()), |v| positive(field, v))
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

fn range(field: &'static str, min: f32, max: f32) -> Result<(), ConfigError> {
    non_negative(field, min)?;
    if max.is_finite() && min <= max {
        Ok(())
    } else {
        Err(ConfigError::InvertedRange { field, min, max })
    }
}
