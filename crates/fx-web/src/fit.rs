use glam::Vec2;

/// How a canvas backing store is sized.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SurfaceFit {
    /// Fill the browser viewport (full-page background).
    Viewport,
    /// Fixed size in CSS pixels; host resizes are ignored.
    Fixed(Vec2),
}

impl SurfaceFit {
    /// Choose a fit from optional configured width/height: both set means
    /// fixed, otherwise `fallback`.
    pub fn from_config(width: Option<f32>, height: Option<f32>, fallback: SurfaceFit) -> Self {
        match (width, height) {
            (Some(w), Some(h)) => SurfaceFit::Fixed(Vec2::new(w, h)),
            _ => fallback,
        }
    }

    /// Target size in CSS pixels given the current viewport.
    pub fn resolve(self, viewport: Vec2) -> Vec2 {
        match self {
            SurfaceFit::Viewport => viewport,
            SurfaceFit::Fixed(size) => size,
        }
    }

    /// Whether window resizes can change the target size.
    pub fn follows_resize(self) -> bool {
        !matches!(self, SurfaceFit::Fixed(_))
    }
}

/// Integer backing-store size for a CSS size, never below `min_px`.
#[inline]
pub fn backing_size(css: Vec2, min_px: u32) -> (u32, u32) {
    let px = |v: f32| {
        if v.is_finite() && v > 0.0 {
            (v.round() as u32).max(min_px)
        } else {
            min_px
        }
    };
    (px(css.x), px(css.y))
}
