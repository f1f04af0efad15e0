//! Draw routines that turn simulation state into surface calls.
//!
//! They only read state. Clearing is left to the caller so several layers can
//! share one surface.

use std::f32::consts::TAU;

use crate::config::{NetworkStyle, ParticleStyle};
use crate::constants::*;
use crate::error::RenderError;
use crate::linker::Connection;
use crate::network::{GraphNode, Topology};
use crate::particles::Particle;
use crate::pulses::Pulse;
use crate::surface::{Circle, Glow, Stroke, Surface};

/// Particles as glowing discs, then a fading line for every connection.
pub fn draw_particle_field<S: Surface + ?Sized>(
    surface: &mut S,
    particles: &[Particle],
    connections: &[Connection],
    style: &ParticleStyle,
) -> Result<(), RenderError> {
    let glow = Glow {
        color: style.color.alpha(style.glow_alpha),
        blur: style.glow_blur,
    };
    for p in particles {
        let disc = Circle::filled(p.pos, p.radius, style.color.alpha(p.opacity)).with_glow(glow);
        surface.circle(&disc)?;
    }
    for c in connections {
        let (Some(a), Some(b)) = (particles.get(c.a), particles.get(c.b)) else {
            continue;
        };
        let stroke = Stroke {
            color: style.color.alpha(c.weight * style.link_opacity),
            width: style.link_width,
        };
        surface.line(a.pos, b.pos, stroke)?;
    }
    Ok(())
}

/// Drawn radius of a node `t_sec` seconds into the animation: swings between
/// `radius` and `radius + NODE_BREATH_AMPLITUDE` once per breath period.
#[inline]
pub fn breathing_radius(node: &GraphNode, t_sec: f32) -> f32 {
    if node.breath_period <= 0.0 {
        return node.radius;
    }
    let phase = t_sec / node.breath_period * TAU;
    node.radius + NODE_BREATH_AMPLITUDE * 0.5 * (1.0 - phase.cos())
}

/// Static edges, then nodes over them, then pulses on top.
pub fn draw_network<S: Surface + ?Sized>(
    surface: &mut S,
    topology: &Topology,
    pulses: &[Pulse],
    style: &NetworkStyle,
    t_sec: f32,
) -> Result<(), RenderError> {
    let edge_stroke = Stroke {
        color: style.accent.alpha(style.edge_opacity).fade(style.opacity),
        width: style.edge_width,
    };
    for &edge in topology.edges() {
        if let Some((from, to)) = topology.endpoints(edge) {
            surface.line(from, to, edge_stroke)?;
        }
    }

    let glow = Glow {
        color: style.accent.alpha(style.opacity),
        blur: style.glow_blur,
    };
    for node in topology.nodes() {
        let r = breathing_radius(node, t_sec);
        let halo = Circle::filled(
            node.pos,
            r + NODE_HALO_PADDING,
            style.accent.alpha(NODE_HALO_ALPHA).fade(style.opacity),
        );
        surface.circle(&halo)?;
        let core = Circle::filled(node.pos, r, style.node_fill.alpha(style.opacity))
            .with_stroke(Stroke {
                color: style.accent.alpha(style.opacity),
                width: NODE_STROKE_WIDTH,
            })
            .with_glow(glow);
        surface.circle(&core)?;
    }

    for pulse in pulses {
        let dot = Circle::filled(
            pulse.position(),
            style.pulse_radius,
            style.accent.alpha(pulse.opacity()).fade(style.opacity),
        )
        .with_glow(glow);
        surface.circle(&dot)?;
    }
    Ok(())
}
