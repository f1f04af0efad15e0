// Browser front-end tuning constants

// Ambient glow custom properties written on the document element
pub const CSS_MOUSE_X: &str = "--mouse-x"; // viewport percent
pub const CSS_MOUSE_Y: &str = "--mouse-y"; // viewport percent
pub const CSS_MOUSE_PX: &str = "--mouse-px"; // client pixels
pub const CSS_MOUSE_PY: &str = "--mouse-py"; // client pixels

// Longest frame delta handed to the scheduler (hidden tabs stall rAF)
pub const MAX_FRAME_DT_MS: u64 = 250;

// Smallest backing store we ever give a canvas, per axis
pub const MIN_BACKING_PX: u32 = 1;
