//! YAML configuration.
//!
//! Every section is optional and falls back to its default, so a config file only needs to name
//! the values it overrides. Unknown keys are rejected so typos do not silently fall back.

use crate::Result;
use serde::{Deserialize, Serialize};

/// An RGB color as `[r, g, b]`.
pub type Rgb = [u8; 3];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScaperConfig {
    pub runtime: RuntimeConfig,
    pub window: WindowConfig,
    pub node: NodeConfig,
    pub layout: SpacingConfig,
    pub zoom: ZoomConfig,
}

impl ScaperConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        // An empty document deserializes as `null`; treat it like an empty mapping.
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeConfig {
    /// Stack leaf-only children vertically instead of in a row.
    pub v_stack_leafs: bool,
    /// With `v_stack_leafs`, give a stack and its parent one shared width.
    pub align_v_stack: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowConfig {
    pub name: String,
    pub width: f64,
    pub height: f64,
    pub background_color: Rgb,
    pub scroll_speed_horizontal: f64,
    pub scroll_speed_vertical: f64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            name: "Tree Scaper".to_string(),
            width: 1280.0,
            height: 800.0,
            background_color: [255, 255, 255],
            scroll_speed_horizontal: 40.0,
            scroll_speed_vertical: 40.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NodeConfig {
    pub size: NodeSizeConfig,
    pub colors: NodeColorConfig,
    pub font: FontConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizingMode {
    /// Fixed padding plus a minimum node width.
    #[default]
    Padded,
    /// Margins scale with zoom and there is no minimum width.
    ZoomScaled,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NodeSizeConfig {
    pub mode: SizingMode,
    /// Floor on a node's own width (padded mode only).
    pub min_width: f64,
    pub border_thickness: f64,
    pub padding_x: f64,
    pub padding_y: f64,
    /// Unscaled margins (zoom-scaled mode only).
    pub margin_x: f64,
    pub margin_y: f64,
}

impl Default for NodeSizeConfig {
    fn default() -> Self {
        Self {
            mode: SizingMode::Padded,
            min_width: 120.0,
            border_thickness: 2.0,
            padding_x: 12.0,
            padding_y: 6.0,
            margin_x: 12.0,
            margin_y: 6.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NodeColorConfig {
    pub text_color: Rgb,
    /// Fill color per tree depth; deeper levels reuse the last entry.
    pub levels: Vec<Rgb>,
}

impl Default for NodeColorConfig {
    fn default() -> Self {
        Self {
            text_color: [33, 33, 33],
            levels: vec![[38, 70, 83], [42, 157, 143], [233, 196, 106], [244, 162, 97]],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FontConfig {
    pub name: String,
    pub size: f64,
    /// Zoomed font sizes never drop below this.
    pub min_size: f64,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            name: "sans-serif".to_string(),
            size: 16.0,
            min_size: 6.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpacingConfig {
    pub horizontal_spacing: f64,
    pub vertical_spacing: f64,
}

impl Default for SpacingConfig {
    fn default() -> Self {
        Self {
            horizontal_spacing: 30.0,
            vertical_spacing: 40.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ZoomConfig {
    pub start_level: i32,
    pub min_level: i32,
    pub max_level: i32,
    /// Scale multiplier per zoom level; the effective scale is `zoom_factor ^ level`.
    pub zoom_factor: f64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            start_level: 0,
            min_level: -8,
            max_level: 8,
            zoom_factor: 1.1,
        }
    }
}
