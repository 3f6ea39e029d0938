//! Text styles and the document theme.
//!
//! Every value here is a fixed design decision, not a computation: the
//! renderer reads sizes, colors and gaps from one [`Theme`] and never derives
//! them. Themes deserialize from config files with per-field defaults, so an
//! override only needs to name what it changes.

use briefpress_types::Color;
use serde::Deserialize;

/// Size, leading and color for one kind of text.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    pub size: f32,
    pub line_height: f32,
    pub color: Color,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 10.0,
            line_height: 15.0,
            color: Color::BLACK,
        }
    }
}

impl TextStyle {
    pub fn new(size: f32, line_height: f32, color: Color) -> Self {
        Self {
            size,
            line_height,
            color,
        }
    }
}

/// The fixed visual design of a rendered briefing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Body paragraphs and bullets.
    pub body: TextStyle,
    /// Boxed headlines (bold lines).
    pub headline: TextStyle,
    /// Background fill of the headline box.
    pub headline_fill: Color,
    /// Padding between the headline text and its box edge.
    pub headline_padding: f32,
    /// Corner radius of the headline box.
    pub headline_corner_radius: f32,
    /// Vertical gap after each headline box segment.
    pub headline_gap: f32,
    /// Section headers (the sources marker line).
    pub section: TextStyle,
    /// Extra vertical gap after a section header.
    pub section_gap: f32,
    /// Height of a blank-line spacer.
    pub blank_gap: f32,
    /// Edge length of the square a link thumbnail is fitted into.
    pub thumbnail_size: f32,
    /// Vertical gap after a thumbnail.
    pub thumbnail_gap: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            body: TextStyle::new(10.0, 15.0, Color::BLACK),
            headline: TextStyle::new(12.0, 16.0, Color::NAVY),
            headline_fill: Color::ALICE_BLUE,
            headline_padding: 4.0,
            headline_corner_radius: 3.0,
            headline_gap: 4.0,
            section: TextStyle::new(13.0, 18.0, Color::DARK_BLUE),
            section_gap: 8.0,
            blank_gap: 6.0,
            thumbnail_size: 64.0,
            thumbnail_gap: 6.0,
        }
    }
}
