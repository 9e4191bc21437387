//! Display colors for remote participants

use serde::{Deserialize, Serialize};
use std::fmt;

/// RGBA color packed as `0xRRGGBBAA`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(pub u32);

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | 0xFF)
    }

    /// `#RRGGBB`, alpha dropped
    pub fn to_css(&self) -> String {
        format!("#{:06X}", self.0 >> 8)
    }

    /// `rgba(r, g, b, alpha)` with an explicit alpha, for selection fills
    pub fn to_css_alpha(&self, alpha: f32) -> String {
        let r = (self.0 >> 24) & 0xFF;
        let g = (self.0 >> 16) & 0xFF;
        let b = (self.0 >> 8) & 0xFF;
        format!("rgba({}, {}, {}, {})", r, g, b, alpha)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

/// Palette used when none is configured
pub const DEFAULT_PALETTE: [Color; 8] = [
    Color::rgb(0xE6, 0x19, 0x4B),
    Color::rgb(0x3C, 0xB4, 0x4B),
    Color::rgb(0x43, 0x63, 0xD8),
    Color::rgb(0xF5, 0x82, 0x31),
    Color::rgb(0x91, 0x1E, 0xB4),
    Color::rgb(0x42, 0xD4, 0xF4),
    Color::rgb(0xF0, 0x32, 0xE6),
    Color::rgb(0x9A, 0x63, 0x24),
];

/// Hands out colors in round-robin order
#[derive(Debug, Clone)]
pub struct ColorPalette {
    colors: Vec<Color>,
    next: usize,
}

impl ColorPalette {
    /// Create a palette; an empty list falls back to [`DEFAULT_PALETTE`]
    pub fn new(colors: Vec<Color>) -> Self {
        let colors = if colors.is_empty() {
            DEFAULT_PALETTE.to_vec()
        } else {
            colors
        };
        Self { colors, next: 0 }
    }

    pub fn next_color(&mut self) -> Color {
        let color = self.colors[self.next % self.colors.len()];
        self.next = (self.next + 1) % self.colors.len();
        color
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::new(DEFAULT_PALETTE.to_vec())
    }
}
