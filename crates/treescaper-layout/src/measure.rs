//! Measurement pass: node boxes and subtree footprints, computed bottom-up.

use crate::model::{Arrangement, MeasuredNode};
use crate::params::LayoutParameters;
use crate::text::{TextMeasurer, TextStyle};
use treescaper_core::TreeNode;

/// A single node's own box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeSize {
    pub width: f64,
    pub height: f64,
    pub title_height: f64,
    pub subtitle_height: f64,
}

/// Measures one node from its title and subtitle text.
///
/// Each text is split on `\n` and every line is measured on its own, so an empty text still
/// contributes one (empty) line of height.
pub fn measure_node(
    title: &str,
    subtitle: &str,
    params: &LayoutParameters,
    measurer: &dyn TextMeasurer,
) -> NodeSize {
    let (pad_x, pad_y) = params.sizing.padding();

    let (title_w, title_text_h) = measure_lines(title, &params.title_style, measurer);
    let (subtitle_w, subtitle_text_h) = measure_lines(subtitle, &params.subtitle_style, measurer);

    let mut width = title_w.max(subtitle_w) + pad_x * 2.0;
    if let Some(min_width) = params.sizing.min_width() {
        width = width.max(min_width);
    }

    let title_height = title_text_h + pad_y * 2.0;
    let subtitle_height = subtitle_text_h + pad_y * 2.0;

    NodeSize {
        width,
        height: title_height + subtitle_height,
        title_height,
        subtitle_height,
    }
}

// (max line width, summed line height)
fn measure_lines(text: &str, style: &TextStyle, measurer: &dyn TextMeasurer) -> (f64, f64) {
    let mut width = 0.0_f64;
    let mut height = 0.0_f64;
    for line in text.split('\n') {
        let m = measurer.measure(line, style);
        width = width.max(m.width);
        height += m.height;
    }
    (width, height)
}

/// Measures `tree` and every descendant, producing a tree of the same shape with own sizes,
/// subtree footprints and the row/stack decision filled in. Positions are left unset.
pub fn measure_tree(
    tree: &TreeNode,
    params: &LayoutParameters,
    measurer: &dyn TextMeasurer,
) -> MeasuredNode {
    let measured = measure_subtree(tree, params, measurer);
    tracing::debug!(
        nodes = measured.node_count(),
        subtree_width = measured.subtree_width,
        subtree_height = measured.subtree_height,
        "measured tree"
    );
    measured
}

fn measure_subtree(
    node: &TreeNode,
    params: &LayoutParameters,
    measurer: &dyn TextMeasurer,
) -> MeasuredNode {
    let size = measure_node(&node.title, &node.subtitle, params, measurer);
    let children: Vec<MeasuredNode> = node
        .children()
        .iter()
        .map(|child| measure_subtree(child, params, measurer))
        .collect();

    // One level of lookahead: only direct children have to be leaves.
    let arrangement = if children.is_empty() {
        Arrangement::Leaf
    } else if params.v_stack_leafs && children.iter().all(MeasuredNode::is_leaf) {
        Arrangement::Stack
    } else {
        Arrangement::Row
    };

    let (subtree_width, subtree_height) = match arrangement {
        Arrangement::Leaf => (size.width, size.height),
        Arrangement::Row => row_footprint(size.width, size.height, &children, params),
        Arrangement::Stack => stack_footprint(size.width, size.height, &children, params),
    };
    tracing::trace!(
        title = %node.title,
        ?arrangement,
        subtree_width,
        subtree_height,
        "measured node"
    );

    MeasuredNode {
        title: node.title.clone(),
        subtitle: node.subtitle.clone(),
        width: size.width,
        height: size.height,
        title_height: size.title_height,
        subtitle_height: size.subtitle_height,
        subtree_width,
        subtree_height,
        arrangement,
        position: None,
        children,
    }
}

/// Gaps between `count` items; zero for zero or one item.
pub(crate) fn gaps(count: usize, spacing: f64) -> f64 {
    count.saturating_sub(1) as f64 * spacing
}

/// Total width of the band reserved for row-mode children.
pub(crate) fn row_band_width(children: &[MeasuredNode], params: &LayoutParameters) -> f64 {
    children.iter().map(|c| c.subtree_width).sum::<f64>()
        + gaps(children.len(), params.horizontal_spacing)
}

/// Footprint of a node whose children sit side by side below it.
pub(crate) fn row_footprint(
    width: f64,
    height: f64,
    children: &[MeasuredNode],
    params: &LayoutParameters,
) -> (f64, f64) {
    let tallest = children
        .iter()
        .map(|c| c.subtree_height)
        .fold(0.0_f64, f64::max);
    (
        width.max(row_band_width(children, params)),
        height + params.vertical_spacing + tallest,
    )
}

/// Footprint of a node whose leaf children are stacked below it. Stacked children are leaves, so
/// their own sizes are their footprints.
pub(crate) fn stack_footprint(
    width: f64,
    height: f64,
    children: &[MeasuredNode],
    params: &LayoutParameters,
) -> (f64, f64) {
    let widest = children.iter().map(|c| c.width).fold(0.0_f64, f64::max);
    (
        width.max(widest),
        height + params.vertical_spacing + stack_height(children, params),
    )
}

pub(crate) fn stack_height(children: &[MeasuredNode], params: &LayoutParameters) -> f64 {
    children.iter().map(|c| c.height).sum::<f64>() + gaps(children.len(), params.vertical_spacing)
}
