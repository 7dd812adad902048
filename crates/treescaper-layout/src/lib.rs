#![forbid(unsafe_code)]

//! Two-pass tree layout.
//!
//! 1. [`measure::measure_tree`] walks the input bottom-up and records each node's own box and
//!    the footprint of its subtree, choosing row or stack placement for its children.
//! 2. [`align::align_stack_widths`] optionally gives each vertical stack a shared width.
//! 3. [`position::assign_positions`] walks top-down and turns footprints into absolute centers.
//!
//! [`layout_tree`] runs the whole pipeline. [`session::Scene`] wraps it with zoom, pan and a
//! cached last-good result for interactive use, and [`svg::render_svg`] draws the result.

pub mod align;
pub mod export;
pub mod measure;
pub mod model;
pub mod params;
pub mod position;
pub mod render;
pub mod session;
pub mod svg;
pub mod text;
pub mod zoom;

pub use model::{Arrangement, Bounds, MeasuredNode, Point, Rect};
pub use params::{LayoutParameters, NodeSizing};
pub use session::Scene;
pub use text::{DeterministicTextMeasurer, TextMeasurer, TextMetrics, TextStyle};
pub use zoom::{Viewport, ZoomState};

use treescaper_core::{MAX_TREE_DEPTH, TreeNode};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid layout parameters: {message}")]
    InvalidParameters { message: String },
    #[error("tree is {depth} levels deep; at most {limit} can be laid out")]
    TooDeep { depth: usize, limit: usize },
    #[error("layout export JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Measures, optionally aligns, and positions `tree` with its root centered on `root_center`.
///
/// Returns a fresh tree on every call; nothing from earlier passes is reused. Trees deeper than
/// [`MAX_TREE_DEPTH`] are rejected before any pass runs.
pub fn layout_tree(
    tree: &TreeNode,
    params: &LayoutParameters,
    measurer: &dyn TextMeasurer,
    root_center: Point,
) -> Result<MeasuredNode> {
    params.validate()?;
    if !(root_center.x.is_finite() && root_center.y.is_finite()) {
        return Err(Error::InvalidParameters {
            message: format!("root center must be finite (got {root_center:?})"),
        });
    }

    let depth = tree.depth();
    if depth > MAX_TREE_DEPTH {
        return Err(Error::TooDeep {
            depth,
            limit: MAX_TREE_DEPTH,
        });
    }

    let mut measured = measure::measure_tree(tree, params, measurer);
    if params.should_align_stacks() {
        align::align_stack_widths(&mut measured, params);
    }
    position::assign_positions(&mut measured, root_center, params);
    Ok(measured)
}
