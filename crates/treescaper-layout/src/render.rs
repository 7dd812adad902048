//! Drawing a positioned tree onto a [`Surface`].
//!
//! Nothing here computes layout; every coordinate comes from the measured tree.

use crate::model::{MeasuredNode, Point, Rect};
use crate::params::LayoutParameters;
use crate::text::{TextMeasurer, TextStyle};
use treescaper_core::ScaperConfig;
use treescaper_core::config::Rgb;

/// Drawing primitives a renderer needs.
pub trait Surface {
    fn fill_rect(&mut self, rect: Rect, color: Rgb);
    fn stroke_rect(&mut self, rect: Rect, color: Rgb, thickness: f64);
    fn line(&mut self, from: Point, to: Point, color: Rgb, thickness: f64);
    /// Draws one already measured line of text centered on `center`.
    fn text(&mut self, text: &str, center: Point, style: &TextStyle, color: Rgb);
}

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub background: Rgb,
    pub text_color: Rgb,
    /// Node color per depth; deeper nodes reuse the last one.
    pub levels: Vec<Rgb>,
    pub border_thickness: f64,
}

impl Theme {
    pub fn from_config(cfg: &ScaperConfig) -> Self {
        Self {
            background: cfg.window.background_color,
            text_color: cfg.node.colors.text_color,
            levels: cfg.node.colors.levels.clone(),
            border_thickness: cfg.node.size.border_thickness,
        }
    }

    pub fn level_color(&self, level: usize) -> Rgb {
        match self.levels.len() {
            0 => self.text_color,
            n => self.levels[level.min(n - 1)],
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ScaperConfig::default())
    }
}

/// Draws every positioned node and the connectors between row-mode parents and their children.
/// Nodes without a position are skipped along with their subtrees.
pub fn draw_tree(
    tree: &MeasuredNode,
    params: &LayoutParameters,
    theme: &Theme,
    measurer: &dyn TextMeasurer,
    surface: &mut dyn Surface,
) {
    draw_subtree(tree, 0, params, theme, measurer, surface);
}

fn draw_subtree(
    node: &MeasuredNode,
    level: usize,
    params: &LayoutParameters,
    theme: &Theme,
    measurer: &dyn TextMeasurer,
    surface: &mut dyn Surface,
) {
    if node.position.is_none() {
        return;
    }
    draw_node(node, level, params, theme, measurer, surface);
    draw_connectors(node, level, params, theme, surface);
    for child in &node.children {
        draw_subtree(child, level + 1, params, theme, measurer, surface);
    }
}

fn draw_node(
    node: &MeasuredNode,
    level: usize,
    params: &LayoutParameters,
    theme: &Theme,
    measurer: &dyn TextMeasurer,
    surface: &mut dyn Surface,
) {
    let Some(rect) = node.rect() else {
        return;
    };
    let color = theme.level_color(level);
    let (_, pad_y) = params.sizing.padding();

    let top = Rect {
        height: node.title_height,
        ..rect
    };
    let bottom = Rect {
        y: rect.y + node.title_height,
        height: node.subtitle_height,
        ..rect
    };

    surface.fill_rect(top, color);
    surface.fill_rect(bottom, theme.background);
    surface.stroke_rect(rect, color, theme.border_thickness);

    let center_x = rect.x + rect.width / 2.0;
    draw_lines(
        &node.title,
        center_x,
        top.y + pad_y,
        &params.title_style,
        theme.background,
        measurer,
        surface,
    );
    draw_lines(
        &node.subtitle,
        center_x,
        bottom.y + pad_y,
        &params.subtitle_style,
        theme.text_color,
        measurer,
        surface,
    );
}

fn draw_lines(
    text: &str,
    center_x: f64,
    top: f64,
    style: &TextStyle,
    color: Rgb,
    measurer: &dyn TextMeasurer,
    surface: &mut dyn Surface,
) {
    let mut y = top;
    for line in text.split('\n') {
        let h = measurer.measure(line, style).height;
        surface.text(line, Point::new(center_x, y + h / 2.0), style, color);
        y += h;
    }
}

// Orthogonal connectors: a stem down from the parent, a horizontal junction halfway through the
// vertical gap, and a drop to each child's top edge. Stacks get none.
fn draw_connectors(
    node: &MeasuredNode,
    level: usize,
    params: &LayoutParameters,
    theme: &Theme,
    surface: &mut dyn Surface,
) {
    if node.is_leaf() || node.is_leaf_stack() {
        return;
    }
    let Some(pos) = node.position else {
        return;
    };
    let color = theme.level_color(level);
    let thickness = theme.border_thickness;

    let parent_bottom = Point::new(pos.x, pos.y + node.height / 2.0);
    let junction_y = parent_bottom.y + params.vertical_spacing / 2.0;

    let child_tops: Vec<Point> = node
        .children
        .iter()
        .filter_map(|c| c.position.map(|p| Point::new(p.x, p.y - c.height / 2.0)))
        .collect();
    if child_tops.is_empty() {
        return;
    }

    surface.line(
        parent_bottom,
        Point::new(parent_bottom.x, junction_y),
        color,
        thickness,
    );

    let min_x = child_tops.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let max_x = child_tops
        .iter()
        .map(|p| p.x)
        .fold(f64::NEG_INFINITY, f64::max);
    surface.line(
        Point::new(min_x, junction_y),
        Point::new(max_x, junction_y),
        color,
        thickness,
    );

    for top in child_tops {
        surface.line(Point::new(top.x, junction_y), top, color, thickness);
    }
}
