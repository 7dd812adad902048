use crate::measure::{row_footprint, stack_height};
use crate::model::{Arrangement, MeasuredNode};
use crate::params::LayoutParameters;

/// Gives every vertical stack one shared width and refreshes all subtree footprints.
///
/// For each stack node the target width is the widest of the node and its stacked children; the
/// node and each child take that width. Footprints are then recomputed bottom-up for every node,
/// since a widened stack can widen any ancestor. Running this twice changes nothing the second
/// time.
///
/// Only meaningful when [`LayoutParameters::should_align_stacks`] holds; [`crate::layout_tree`]
/// checks that before calling.
pub fn align_stack_widths(node: &mut MeasuredNode, params: &LayoutParameters) {
    let mut aligned = 0usize;
    align_subtree(node, params, &mut aligned);
    tracing::debug!(
        stacks = aligned,
        subtree_width = node.subtree_width,
        "aligned stack widths"
    );
}

fn align_subtree(node: &mut MeasuredNode, params: &LayoutParameters, aligned: &mut usize) {
    for child in &mut node.children {
        align_subtree(child, params, aligned);
    }

    match node.arrangement {
        Arrangement::Leaf => {
            node.subtree_width = node.width;
            node.subtree_height = node.height;
        }
        Arrangement::Stack => {
            let target = node
                .children
                .iter()
                .map(|c| c.width)
                .fold(node.width, f64::max);

            node.width = target;
            for child in &mut node.children {
                child.width = target;
                child.subtree_width = target;
                child.subtree_height = child.height;
            }

            node.subtree_width = target;
            node.subtree_height =
                node.height + params.vertical_spacing + stack_height(&node.children, params);
            *aligned += 1;
        }
        Arrangement::Row => {
            let (w, h) = row_footprint(node.width, node.height, &node.children, params);
            node.subtree_width = w;
            node.subtree_height = h;
        }
    }
}
