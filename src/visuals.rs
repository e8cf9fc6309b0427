//! Colors and palettes for particle rendering.
//!
//! Particles pick one color from a [`Palette`] when they are created and keep
//! it for their whole life. Colors are written as hex strings in config files:
//!
//! ```toml
//! [appearance]
//! palette = ["#4285F4", "#EA4335", "#FBBC05"]
//! background = "#FAFAFAFF"
//! ```

use crate::error::ConfigError;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Linear RGBA color, each channel in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA`. The leading `#` is optional.
    pub fn from_hex(hex: &str) -> Result<Self, ConfigError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !(digits.len() == 6 || digits.len() == 8) || !digits.is_ascii() {
            return Err(ConfigError::InvalidColor(hex.to_string()));
        }

        let channel = |i: usize| -> Result<f32, ConfigError> {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map(|v| v as f32 / 255.0)
                .map_err(|_| ConfigError::InvalidColor(hex.to_string()))
        };

        let a = if digits.len() == 8 { channel(6)? } else { 1.0 };
        Ok(Self::rgba(channel(0)?, channel(2)?, channel(4)?, a))
    }

    /// Format as `#RRGGBBAA`.
    pub fn to_hex(&self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        format!("#{:02X}{:02X}{:02X}{:02X}", r, g, b, a)
    }

    pub fn to_rgba8(&self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Same color with alpha multiplied by `opacity`.
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.a *= opacity.clamp(0.0, 1.0);
        self
    }
}

impl TryFrom<String> for Color {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_hex()
    }
}

/// A discrete set of colors particles are drawn from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette(Vec<Color>);

impl Palette {
    pub fn new(colors: Vec<Color>) -> Self {
        Self(colors)
    }

    pub fn colors(&self) -> &[Color] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Pick a color uniformly at random. An empty palette yields white.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Color {
        if self.0.is_empty() {
            return Color::WHITE;
        }
        self.0[rng.gen_range(0..self.0.len())]
    }
}

impl Default for Palette {
    /// Blue, red, yellow, green and two pastel accents.
    fn default() -> Self {
        Self(vec![
            Color::rgb(0x42 as f32 / 255.0, 0x85 as f32 / 255.0, 0xF4 as f32 / 255.0),
            Color::rgb(0xEA as f32 / 255.0, 0x43 as f32 / 255.0, 0x35 as f32 / 255.0),
            Color::rgb(0xFB as f32 / 255.0, 0xBC as f32 / 255.0, 0x05 as f32 / 255.0),
            Color::rgb(0x34 as f32 / 255.0, 0xA8 as f32 / 255.0, 0x53 as f32 / 255.0),
            Color::rgb(0xA0 as f32 / 255.0, 0xC3 as f32 / 255.0, 0xFF as f32 / 255.0),
            Color::rgb(0xFF as f32 / 255.0, 0x9E as f32 / 255.0, 0x9E as f32 / 255.0),
        ])
    }
}
