//! Text metrics for node labels.
//!
//! Layout never hands a measurer more than one line: titles and subtitles are split on `\n`
//! before measuring, and a node's text block is the sum of its line heights.

use serde::{Deserialize, Serialize};

/// Font settings shared by every title (or every subtitle) in one layout pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_family: Option<String>,
    pub font_size: f64,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: None,
            font_size: 16.0,
        }
    }
}

/// Size of one measured line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
}

/// Measures a single line of label text.
///
/// The empty line must still have a finite, non-negative height: blank titles and subtitles keep
/// their row in the node box.
pub trait TextMeasurer {
    fn measure(&self, line: &str, style: &TextStyle) -> TextMetrics;
}

/// Font-independent measurer for headless use and tests: a line is
/// `chars * char_width_factor * font_size` wide and `line_height_factor * font_size` tall.
#[derive(Debug, Clone, PartialEq)]
pub struct DeterministicTextMeasurer {
    pub char_width_factor: f64,
    pub line_height_factor: f64,
}

impl Default for DeterministicTextMeasurer {
    fn default() -> Self {
        Self {
            char_width_factor: 0.6,
            line_height_factor: 1.2,
        }
    }
}

impl TextMeasurer for DeterministicTextMeasurer {
    fn measure(&self, line: &str, style: &TextStyle) -> TextMetrics {
        let font_size = style.font_size.max(1.0);
        TextMetrics {
            width: line.chars().count() as f64 * font_size * self.char_width_factor,
            height: font_size * self.line_height_factor,
        }
    }
}
