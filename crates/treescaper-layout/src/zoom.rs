//! Zoom and pan state for the canvas.
//!
//! Zoom changes the derived [`LayoutParameters`](crate::LayoutParameters) and therefore needs a
//! full re-layout; panning only moves the root center.

use crate::model::{Bounds, Point};
use treescaper_core::config::{WindowConfig, ZoomConfig};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomState {
    level: i32,
    min_level: i32,
    max_level: i32,
    factor: f64,
}

impl ZoomState {
    /// Builds a zoom state, normalizing out-of-range input instead of rejecting it: an inverted
    /// range is swapped, a non-positive or non-finite factor becomes `1.0` and the start level is
    /// clamped into range.
    pub fn new(level: i32, min_level: i32, max_level: i32, factor: f64) -> Self {
        let (min_level, max_level) = if min_level <= max_level {
            (min_level, max_level)
        } else {
            tracing::warn!(min_level, max_level, "inverted zoom range; swapping bounds");
            (max_level, min_level)
        };
        let factor = if factor.is_finite() && factor > 0.0 {
            factor
        } else {
            tracing::warn!(factor, "invalid zoom factor; using 1.0");
            1.0
        };
        let clamped = level.clamp(min_level, max_level);
        if clamped != level {
            tracing::warn!(level, clamped, "zoom start level out of range; clamping");
        }
        Self {
            level: clamped,
            min_level,
            max_level,
            factor,
        }
    }

    pub fn from_config(cfg: &ZoomConfig) -> Self {
        Self::new(
            cfg.start_level,
            cfg.min_level,
            cfg.max_level,
            cfg.zoom_factor,
        )
    }

    pub fn level(&self) -> i32 {
        self.level
    }

    pub fn range(&self) -> (i32, i32) {
        (self.min_level, self.max_level)
    }

    /// Multiplier applied to fonts, spacing and (in zoom-scaled mode) margins.
    pub fn scale(&self) -> f64 {
        self.factor.powi(self.level)
    }

    /// Sets the level, clamped into range. Returns whether the level changed.
    pub fn set_level(&mut self, level: i32) -> bool {
        let next = level.clamp(self.min_level, self.max_level);
        let changed = next != self.level;
        self.level = next;
        changed
    }

    pub fn zoom_in(&mut self) -> bool {
        self.set_level(self.level.saturating_add(1))
    }

    pub fn zoom_out(&mut self) -> bool {
        self.set_level(self.level.saturating_sub(1))
    }
}

impl Default for ZoomState {
    fn default() -> Self {
        Self::from_config(&ZoomConfig::default())
    }
}

/// The visible canvas area plus the current pan offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub pan_x: f64,
    pub pan_y: f64,
    pub scroll_speed_x: f64,
    pub scroll_speed_y: f64,
}

impl Viewport {
    pub fn from_config(cfg: &WindowConfig) -> Self {
        Self {
            width: cfg.width,
            height: cfg.height,
            pan_x: 0.0,
            pan_y: 0.0,
            scroll_speed_x: cfg.scroll_speed_horizontal,
            scroll_speed_y: cfg.scroll_speed_vertical,
        }
    }

    /// Pans by whole scroll steps; positive steps move the tree right/down.
    pub fn scroll(&mut self, steps_x: f64, steps_y: f64) {
        self.pan_x += steps_x * self.scroll_speed_x;
        self.pan_y += steps_y * self.scroll_speed_y;
    }

    /// Where the root node's center goes: horizontally centered, a quarter of the way down.
    pub fn root_center(&self) -> Point {
        Point::new(
            self.width / 2.0 + self.pan_x,
            self.height / 4.0 + self.pan_y,
        )
    }

    /// The visible area in canvas coordinates.
    pub fn bounds(&self) -> Bounds {
        Bounds {
            min_x: 0.0,
            min_y: 0.0,
            max_x: self.width,
            max_y: self.height,
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::from_config(&WindowConfig::default())
    }
}
