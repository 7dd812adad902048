use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle given by its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn from_center(center: Point, width: f64, height: f64) -> Self {
        Self {
            x: center.x - width / 2.0,
            y: center.y - height / 2.0,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Option<Self> {
        let mut it = points.into_iter();
        let (x0, y0) = it.next()?;
        let mut b = Self {
            min_x: x0,
            min_y: y0,
            max_x: x0,
            max_y: y0,
        };
        for (x, y) in it {
            b.min_x = b.min_x.min(x);
            b.min_y = b.min_y.min(y);
            b.max_x = b.max_x.max(x);
            b.max_y = b.max_y.max(y);
        }
        Some(b)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn padded(&self, padding: f64) -> Self {
        Self {
            min_x: self.min_x - padding,
            min_y: self.min_y - padding,
            max_x: self.max_x + padding,
            max_y: self.max_y + padding,
        }
    }
}

/// How a node's direct children are placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Arrangement {
    /// No children.
    Leaf,
    /// Children side by side, centered under the parent.
    Row,
    /// Leaf children stacked top to bottom on the parent's x.
    Stack,
}

/// A tree node annotated with its measured sizes and, once positioned, its center.
///
/// `width`/`height` describe the node's own box; `subtree_width`/`subtree_height` the footprint
/// of the node together with all of its descendants.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasuredNode {
    pub title: String,
    pub subtitle: String,
    pub width: f64,
    pub height: f64,
    pub title_height: f64,
    pub subtitle_height: f64,
    pub subtree_width: f64,
    pub subtree_height: f64,
    pub arrangement: Arrangement,
    pub position: Option<Point>,
    pub children: Vec<MeasuredNode>,
}

impl MeasuredNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_leaf_stack(&self) -> bool {
        self.arrangement == Arrangement::Stack
    }

    /// The node's own box, if it has been positioned.
    pub fn rect(&self) -> Option<Rect> {
        self.position
            .map(|p| Rect::from_center(p, self.width, self.height))
    }

    /// Pre-order traversal (parent before children, children left to right).
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder { stack: vec![self] }
    }

    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    /// Bounding box of every positioned node box. `None` if nothing is positioned.
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(self.iter().filter_map(|n| n.rect()).flat_map(|r| {
            [(r.x, r.y), (r.x + r.width, r.bottom())]
        }))
    }
}

pub struct PreOrder<'a> {
    stack: Vec<&'a MeasuredNode>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a MeasuredNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
