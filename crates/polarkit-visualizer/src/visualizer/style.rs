//! Text and line styles.
//!
//! Styles are owned by the caller and shared with the actor through
//! `Shared<T>`; edits made between frames show up on the next render.

use serde::{Deserialize, Serialize};

/// RGB color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb` notation, components clamped to `[0, 1]`.
    pub fn to_hex(&self) -> String {
        let channel = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_family: String,
    pub color: Color,
    pub opacity: f64,
    pub bold: bool,
    pub italic: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: "sans-serif".to_string(),
            color: Color::WHITE,
            opacity: 1.0,
            bold: false,
            italic: false,
        }
    }
}

impl TextStyle {
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: Color,
    /// Width in pixels
    pub width: f64,
    pub opacity: f64,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            width: 1.0,
            opacity: 1.0,
        }
    }
}

impl LineStyle {
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}
