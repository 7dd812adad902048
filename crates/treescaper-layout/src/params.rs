use crate::text::TextStyle;
use crate::zoom::ZoomState;
use crate::{Error, Result};
use treescaper_core::ScaperConfig;
use treescaper_core::config::SizingMode;

/// How a node's own box is padded around its text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeSizing {
    /// Fixed padding; the box is at least `min_width` wide.
    Padded {
        padding_x: f64,
        padding_y: f64,
        min_width: f64,
    },
    /// Padding already multiplied by the zoom scale; no minimum width.
    ZoomScaled { margin_x: f64, margin_y: f64 },
}

impl NodeSizing {
    /// `(horizontal, vertical)` padding applied on each side of the text.
    pub fn padding(&self) -> (f64, f64) {
        match *self {
            NodeSizing::Padded {
                padding_x,
                padding_y,
                ..
            } => (padding_x, padding_y),
            NodeSizing::ZoomScaled { margin_x, margin_y } => (margin_x, margin_y),
        }
    }

    pub fn min_width(&self) -> Option<f64> {
        match *self {
            NodeSizing::Padded { min_width, .. } => Some(min_width),
            NodeSizing::ZoomScaled { .. } => None,
        }
    }
}

/// Everything one layout pass reads.
///
/// Derived by the caller from the config and the current zoom, and never changed during a pass;
/// a zoom or config change builds a new value and re-runs the layout.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutParameters {
    pub horizontal_spacing: f64,
    pub vertical_spacing: f64,
    /// Stack leaf-only children vertically.
    pub v_stack_leafs: bool,
    /// Equalize widths across each vertical stack and its parent.
    pub align_stack_widths: bool,
    pub sizing: NodeSizing,
    pub title_style: TextStyle,
    pub subtitle_style: TextStyle,
}

impl Default for LayoutParameters {
    fn default() -> Self {
        Self::from_config(&ScaperConfig::default(), &ZoomState::default())
    }
}

impl LayoutParameters {
    pub fn from_config(cfg: &ScaperConfig, zoom: &ZoomState) -> Self {
        let scale = zoom.scale();

        let size = &cfg.node.size;
        let sizing = match size.mode {
            SizingMode::Padded => NodeSizing::Padded {
                padding_x: size.padding_x,
                padding_y: size.padding_y,
                min_width: size.min_width,
            },
            SizingMode::ZoomScaled => NodeSizing::ZoomScaled {
                margin_x: size.margin_x * scale,
                margin_y: size.margin_y * scale,
            },
        };

        let font = &cfg.node.font;
        let scaled = font.size * scale;
        let font_size = if scaled < font.min_size {
            tracing::debug!(scaled, floor = font.min_size, "font size clamped to floor");
            font.min_size
        } else {
            scaled
        };
        let style = TextStyle {
            font_family: Some(font.name.clone()),
            font_size,
        };

        Self {
            horizontal_spacing: cfg.layout.horizontal_spacing * scale,
            vertical_spacing: cfg.layout.vertical_spacing * scale,
            v_stack_leafs: cfg.runtime.v_stack_leafs,
            align_stack_widths: cfg.runtime.align_v_stack,
            sizing,
            title_style: style.clone(),
            subtitle_style: style,
        }
    }

    /// The stack aligner only runs when stacking is on and alignment was asked for.
    pub fn should_align_stacks(&self) -> bool {
        self.v_stack_leafs && self.align_stack_widths
    }

    pub fn validate(&self) -> Result<()> {
        let (pad_x, pad_y) = self.sizing.padding();
        let mut checks = vec![
            ("horizontal_spacing", self.horizontal_spacing),
            ("vertical_spacing", self.vertical_spacing),
            ("padding_x", pad_x),
            ("padding_y", pad_y),
            ("title font size", self.title_style.font_size),
            ("subtitle font size", self.subtitle_style.font_size),
        ];
        if let Some(min_width) = self.sizing.min_width() {
            checks.push(("min_width", min_width));
        }
        for (name, value) in checks {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidParameters {
                    message: format!("{name} must be a finite, non-negative number (got {value})"),
                });
            }
        }
        Ok(())
    }
}
