//! Static topology of the layered network diagram.
//!
//! Generated once per effect (or when the layer sizes change) and read-only
//! afterwards. Layers run left to right along x; nodes inside a layer are
//! spaced evenly along y, never flush against the top or bottom edge.

use glam::Vec2;
use smallvec::SmallVec;

use crate::constants::*;
use crate::error::ConfigError;
use crate::random::RandomSource;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GraphNode {
    pub id: usize,
    pub layer: usize,
    pub pos: Vec2,
    pub radius: f32,
    /// Seconds per breath of the drawn radius. Visual only.
    pub breath_period: f32,
}

/// Directed edge from a node in layer k to a node in layer k + 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GraphEdge {
    pub from: usize,
    pub to: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TopologyParams {
    pub node_radius_min: f32,
    pub node_radius_max: f32,
    pub max_edges_per_node: usize,
}

impl Default for TopologyParams {
    fn default() -> Self {
        Self {
            node_radius_min: DEFAULT_NODE_RADIUS_MIN,
            node_radius_max: DEFAULT_NODE_RADIUS_MAX,
            max_edges_per_node: DEFAULT_MAX_EDGES_PER_NODE,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Topology {
    layer_sizes: Vec<usize>,
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
    size: Vec2,
}

/// A layer sequence is usable when it has two or more non-empty layers.
pub fn validate_layers(layer_sizes: &[usize]) -> Result<(), ConfigError> {
    match layer_sizes.len() {
        0 => return Err(ConfigError::NoLayers),
        1 => return Err(ConfigError::SingleLayer(1)),
        _ => {}
    }
    if let Some(index) = layer_sizes.iter().position(|&n| n == 0) {
        return Err(ConfigError::EmptyLayer { index });
    }
    Ok(())
}

/// Position of node `index` of `count` in layer `layer` of `layer_count`.
/// Requires `layer_count >= 2`.
#[inline]
pub fn layer_position(
    layer: usize,
    layer_count: usize,
    index: usize,
    count: usize,
    size: Vec2,
) -> Vec2 {
    let x = layer as f32 / (layer_count - 1) as f32 * size.x;
    let y = (index + 1) as f32 / (count + 1) as f32 * size.y;
    Vec2::new(x, y)
}

impl Topology {
    pub fn generate(
        layer_sizes: &[usize],
        size: Vec2,
        params: &TopologyParams,
        rng: &mut dyn RandomSource,
    ) -> Result<Self, ConfigError> {
        validate_layers(layer_sizes)?;
        if params.max_edges_per_node == 0 {
            return Err(ConfigError::NoEdgesPerNode);
        }

        let layer_count = layer_sizes.len();
        let mut nodes = Vec::with_capacity(layer_sizes.iter().sum());
        for (layer, &count) in layer_sizes.iter().enumerate() {
            for index in 0..count {
                let id = nodes.len();
                nodes.push(GraphNode {
                    id,
                    layer,
                    pos: layer_position(layer, layer_count, index, count, size),
                    radius: rng.range(params.node_radius_min, params.node_radius_max),
                    breath_period: rng
                        .range(NODE_BREATH_PERIOD_MIN_SEC, NODE_BREATH_PERIOD_MAX_SEC),
                });
            }
        }

        let mut edges = Vec::new();
        let mut start = 0;
        for pair in layer_sizes.windows(2) {
            let (count, next_count) = (pair[0], pair[1]);
            let next_start = start + count;
            for from in start..next_start {
                let wanted = 1 + rng.index(params.max_edges_per_node);
                for to in pick_distinct(next_count, wanted, rng) {
                    edges.push(GraphEdge {
                        from,
                        to: next_start + to,
                    });
                }
            }
            start = next_start;
        }

        log::debug!(
            "[network] generated layers={:?} nodes={} edges={}",
            layer_sizes,
            nodes.len(),
            edges.len()
        );
        Ok(Self {
            layer_sizes: layer_sizes.to_vec(),
            nodes,
            edges,
            size,
        })
    }

    #[inline]
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    #[inline]
    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    #[inline]
    pub fn layer_sizes(&self) -> &[usize] {
        &self.layer_sizes
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Current endpoint positions of `edge`.
    pub fn endpoints(&self, edge: GraphEdge) -> Option<(Vec2, Vec2)> {
        let from = self.nodes.get(edge.from)?;
        let to = self.nodes.get(edge.to)?;
        Some((from.pos, to.pos))
    }
}

/// Up to `wanted` distinct indices from `0..len` (partial Fisher-Yates).
fn pick_distinct(len: usize, wanted: usize, rng: &mut dyn RandomSource) -> SmallVec<[usize; 8]> {
    let mut pool: SmallVec<[usize; 8]> = (0..len).collect();
    let take = wanted.min(len);
    for k in 0..take {
        let pick = k + rng.index(len - k);
        pool.swap(k, pick);
    }
    pool.truncate(take);
    pool
}
