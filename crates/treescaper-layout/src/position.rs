use crate::measure::row_band_width;
use crate::model::{Arrangement, MeasuredNode, Point};
use crate::params::LayoutParameters;

/// Assigns a center to `node` and, top-down, to every descendant.
///
/// Row children are spread left to right over a band centered under the parent, each taking a
/// slot as wide as its subtree footprint. Stack children share the parent's x and are placed one
/// below the other. Gaps are measured edge to edge: `vertical_spacing` between a parent's bottom
/// and a child's top, and between consecutive stacked children.
pub fn assign_positions(node: &mut MeasuredNode, center: Point, params: &LayoutParameters) {
    place(node, center, params);
    tracing::debug!(x = center.x, y = center.y, "assigned positions");
}

fn place(node: &mut MeasuredNode, center: Point, params: &LayoutParameters) {
    node.position = Some(center);
    let parent_bottom = center.y + node.height / 2.0;

    match node.arrangement {
        Arrangement::Leaf => {}
        Arrangement::Stack => {
            let mut y_cursor = parent_bottom + params.vertical_spacing;
            for child in &mut node.children {
                let child_y = y_cursor + child.height / 2.0;
                place(child, Point::new(center.x, child_y), params);
                y_cursor = child_y + child.height / 2.0 + params.vertical_spacing;
            }
        }
        Arrangement::Row => {
            let band = row_band_width(&node.children, params);
            let mut x_cursor = center.x - band / 2.0;
            for child in &mut node.children {
                let child_x = x_cursor + child.subtree_width / 2.0;
                let child_y = parent_bottom + params.vertical_spacing + child.height / 2.0;
                place(child, Point::new(child_x, child_y), params);
                x_cursor += child.subtree_width + params.horizontal_spacing;
            }
        }
    }
}
