//! Colour values passed through config into the renderer.

use std::fmt;

use serde::Deserialize;

use crate::error::ConfigError;

/// Opaque 8-bit RGB colour. Deserializes from a `#RRGGBB` string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` (leading `#` optional, case-insensitive).
    pub fn parse_hex(s: &str) -> Result<Self, ConfigError> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(ConfigError::BadColor(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| ConfigError::BadColor(s.to_string()))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn alpha(self, a: f32) -> Rgba {
        Rgba {
            rgb: self,
            a: a.clamp(0.0, 1.0),
        }
    }

    pub fn opaque(self) -> Rgba {
        self.alpha(1.0)
    }
}

impl TryFrom<String> for Rgb {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_hex(&value)
    }
}

/// Colour plus straight alpha in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub rgb: Rgb,
    pub a: f32,
}

impl Rgba {
    /// Scale alpha, e.g. to apply an effect-wide opacity.
    pub fn fade(self, factor: f32) -> Self {
        self.rgb.alpha(self.a * factor)
    }
}

/// CSS `rgba(...)` form, as accepted by canvas fill/stroke styles.
impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rgba({}, {}, {}, {:.3})",
            self.rgb.r, self.rgb.g, self.rgb.b, self.a
        )
    }
}

/// Cyan accent used across the dashboard effects.
pub const ACCENT: Rgb = Rgb::new(0x00, 0xF0, 0xFF);
/// Deep navy fill behind network nodes.
pub const NODE_FILL: Rgb = Rgb::new(0x0B, 0x10, 0x26);
