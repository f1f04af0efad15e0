use fx_core::GlowSpot;

use crate::constants::*;

/// Custom property values for the ambient glow at `spot`.
pub fn glow_css_values(spot: &GlowSpot) -> [(&'static str, String); 4] {
    [
        (CSS_MOUSE_X, format!("{:.2}%", spot.percent.x)),
        (CSS_MOUSE_Y, format!("{:.2}%", spot.percent.y)),
        (CSS_MOUSE_PX, format!("{:.1}px", spot.px.x)),
        (CSS_MOUSE_PY, format!("{:.1}px", spot.px.y)),
    ]
}
