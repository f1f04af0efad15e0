use thiserror::Error;

/// Rejected effect configuration. Raised at construction, never mid-frame.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("particle count must be at least 1")]
    NoParticles,
    #[error("`{field}` must be a positive number, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("`{field}` must be finite and non-negative, got {value}")]
    Negative { field: &'static str, value: f32 },
    #[error("range `{field}` is inverted: min {min} > max {max}")]
    InvertedRange {
        field: &'static str,
        min: f32,
        max: f32,
    },
    #[error("layer sequence is empty")]
    NoLayers,
    #[error("network needs at least two layers, got {0}")]
    SingleLayer(usize),
    #[error("layer {index} has no nodes")]
    EmptyLayer { index: usize },
    #[error("`maxEdgesPerNode` must be at least 1")]
    NoEdgesPerNode,
    #[error("spawn interval must be at least 1 ms")]
    ZeroSpawnInterval,
    #[error("`{0}` is not a #RRGGBB colour")]
    BadColor(String),
}

/// A drawing call the host surface refused. The frame for that effect is skipped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error("surface rejected {op}: {reason}")]
    Surface { op: &'static str, reason: String },
    #[error("surface is detached")]
    Detached,
}

impl RenderError {
    pub fn surface(op: &'static str, reason: impl Into<String>) -> Self {
        Self::Surface {
            op,
            reason: reason.into(),
        }
    }
}
