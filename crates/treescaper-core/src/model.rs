use serde::Serialize;

/// Deepest tree (in nodes, root included) the parser and the layout passes accept. The passes
/// recurse once per level, so this bounds their stack use.
pub const MAX_TREE_DEPTH: usize = 1024;

/// Whether a node has children.
///
/// `Branch` always holds at least one child; an empty child list normalizes to `Leaf` when the
/// node is constructed, so "empty" and "absent" branches mean the same thing everywhere.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Leaf,
    Branch(Vec<TreeNode>),
}

/// A single input node: title and subtitle text plus ordered children.
///
/// Title and subtitle may contain `\n` for explicit line breaks.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub title: String,
    pub subtitle: String,
    kind: NodeKind,
}

impl TreeNode {
    pub fn new(
        title: impl Into<String>,
        subtitle: impl Into<String>,
        children: Vec<TreeNode>,
    ) -> Self {
        let kind = if children.is_empty() {
            NodeKind::Leaf
        } else {
            NodeKind::Branch(children)
        };
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            kind,
        }
    }

    pub fn leaf(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self::new(title, subtitle, Vec::new())
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf)
    }

    pub fn children(&self) -> &[TreeNode] {
        match &self.kind {
            NodeKind::Leaf => &[],
            NodeKind::Branch(children) => children,
        }
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(TreeNode::node_count)
            .sum::<usize>()
    }

    /// Longest root-to-leaf path, counted in nodes. Walks with an explicit stack, so it is safe
    /// to call on trees of any depth.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1usize)];
        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            stack.extend(node.children().iter().map(|c| (c, depth + 1)));
        }
        deepest
    }
}

// Serializes back to the input shape; leaves get an empty `branches` list.
impl Serialize for TreeNode {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut s = serializer.serialize_struct("TreeNode", 3)?;
        s.serialize_field("title", &self.title)?;
        s.serialize_field("subtitle", &self.subtitle)?;
        s.serialize_field("branches", self.children())?;
        s.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_children_normalize_to_leaf() {
        let node = TreeNode::new("a", "b", Vec::new());
        assert!(node.is_leaf());
        assert_eq!(node.kind(), &NodeKind::Leaf);
        assert!(node.children().is_empty());
    }

    #[test]
    fn counts_nodes_and_depth() {
        let tree = TreeNode::new(
            "root",
            "",
            vec![
                TreeNode::new("a", "", vec![TreeNode::leaf("a1", "")]),
                TreeNode::leaf("b", ""),
            ],
        );
        assert_eq!(tree.node_count(), 4);
        assert_eq!(tree.depth(), 3);
    }

    #[test]
    fn serializes_in_input_shape() {
        let tree = TreeNode::new("r", "s", vec![TreeNode::leaf("c", "d")]);
        let v = serde_json::to_value(&tree).unwrap();
        assert_eq!(
            v,
            serde_json::json!({
                "title": "r",
                "subtitle": "s",
                "branches": [{ "title": "c", "subtitle": "d", "branches": [] }]
            })
        );
    }
}
