// Default tuning constants shared by the web and native frontends.
// All of these are defaults for the config structs, not hard limits.

// Particle field
pub const DEFAULT_PARTICLE_COUNT: usize = 80;
pub const DEFAULT_CONNECTION_DISTANCE: f32 = 120.0; // surface units
pub const DEFAULT_REPEL_RADIUS: f32 = 150.0; // surface units
pub const DEFAULT_REPEL_STRENGTH: f32 = 2.0; // displacement per frame at full force
pub const DEFAULT_RADIUS_BOOST: f32 = 2.0; // radius gained at full force
pub const DEFAULT_MAX_SPEED: f32 = 0.25; // |vx|, |vy| upper bound per frame
pub const DEFAULT_PARTICLE_RADIUS_MIN: f32 = 0.5;
pub const DEFAULT_PARTICLE_RADIUS_MAX: f32 = 2.0;
pub const DEFAULT_PARTICLE_OPACITY_MIN: f32 = 0.2;
pub const DEFAULT_PARTICLE_OPACITY_MAX: f32 = 0.7;
pub const DEFAULT_PARTICLE_GLOW_BLUR: f32 = 10.0;
pub const DEFAULT_PARTICLE_GLOW_ALPHA: f32 = 0.5;
pub const DEFAULT_LINK_WIDTH: f32 = 0.5;
pub const DEFAULT_LINK_OPACITY: f32 = 0.2; // opacity of a link at distance zero

// Above this many particles the linker buckets into a grid instead of scanning all pairs
pub const DEFAULT_GRID_CUTOFF: usize = 256;

// Network diagram
pub const DEFAULT_LAYER_SIZES: [usize; 4] = [3, 6, 6, 3];
pub const DEFAULT_NETWORK_WIDTH: f32 = 300.0;
pub const DEFAULT_NETWORK_HEIGHT: f32 = 200.0;
pub const DEFAULT_SPAWN_INTERVAL_MS: u32 = 200;
pub const DEFAULT_PULSE_SPEED_MIN: f32 = 0.01; // progress per frame
pub const DEFAULT_PULSE_SPEED_MAX: f32 = 0.03;
pub const DEFAULT_NODE_RADIUS_MIN: f32 = 4.0;
pub const DEFAULT_NODE_RADIUS_MAX: f32 = 7.0;
pub const DEFAULT_MAX_EDGES_PER_NODE: usize = 3;
pub const NODE_BREATH_PERIOD_MIN_SEC: f32 = 2.0;
pub const NODE_BREATH_PERIOD_MAX_SEC: f32 = 4.0;
pub const NODE_BREATH_AMPLITUDE: f32 = 1.0; // radius swing at the peak of a breath
pub const NODE_HALO_PADDING: f32 = 2.0;
pub const NODE_HALO_ALPHA: f32 = 0.05;
pub const NODE_STROKE_WIDTH: f32 = 1.5;
pub const DEFAULT_EDGE_OPACITY: f32 = 0.4;
pub const DEFAULT_EDGE_WIDTH: f32 = 1.0;
pub const DEFAULT_PULSE_RADIUS: f32 = 3.0;
pub const DEFAULT_NETWORK_GLOW_BLUR: f32 = 6.0;
pub const DEFAULT_NETWORK_OPACITY: f32 = 0.6;
pub const PULSE_FADE: f32 = 0.5; // opacity lost between source and destination
pub const PULSE_ARRIVAL_EPSILON: f64 = 1e-4; // slack when rounding 1/speed up to whole frames

// Palette
pub const ACCENT_HEX: &str = "#00F0FF";
pub const NODE_FILL_HEX: &str = "#0B1026";
