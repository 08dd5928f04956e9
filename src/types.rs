//! Shared value types used across the layout and compositing stages.
//!
//! These are serialized into the layer list handed to the rasterizer, so
//! they must stay plain data: absolute canvas coordinates, 8-bit colors.

use serde::{Deserialize, Serialize};

/// An opaque 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black for white, white for everything else.
    ///
    /// Used for legibility panels and glows, which always take the
    /// opposite polarity of the text they sit behind.
    pub fn opposite_polarity(self) -> Self {
        if self == Color::WHITE {
            Color::BLACK
        } else {
            Color::WHITE
        }
    }

    /// `#rrggbb`
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Axis-aligned rectangle in canvas pixels (origin top-left).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle of the given size centred horizontally on `center_x`,
    /// with its bottom edge at `bottom`.
    pub fn bottom_centered(center_x: f64, bottom: f64, width: f64, height: f64) -> Self {
        Self::new(center_x - width / 2.0, bottom - height, width, height)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}
