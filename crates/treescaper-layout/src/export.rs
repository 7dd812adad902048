//! JSON export of a measured tree, for debugging and inspection.
//!
//! The export mirrors the input shape (`title`, `subtitle`, `branches`) and adds a `_measured`
//! object to every node.

use crate::Result;
use crate::model::MeasuredNode;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize)]
struct ExportNode<'a> {
    title: &'a str,
    subtitle: &'a str,
    #[serde(rename = "_measured")]
    measured: ExportMeasured,
    branches: Vec<ExportNode<'a>>,
}

#[derive(Debug, Serialize)]
struct ExportMeasured {
    width: f64,
    height: f64,
    top_height: f64,
    bottom_height: f64,
    subtree_width: f64,
    subtree_height: f64,
    position: Option<[f64; 2]>,
    leaves_only: bool,
}

impl<'a> ExportNode<'a> {
    fn from_measured(node: &'a MeasuredNode) -> Self {
        Self {
            title: &node.title,
            subtitle: &node.subtitle,
            measured: ExportMeasured {
                width: node.width,
                height: node.height,
                top_height: node.title_height,
                bottom_height: node.subtitle_height,
                subtree_width: node.subtree_width,
                subtree_height: node.subtree_height,
                position: node.position.map(|p| [p.x, p.y]),
                leaves_only: node.is_leaf_stack(),
            },
            branches: node.children.iter().map(ExportNode::from_measured).collect(),
        }
    }
}

pub fn export_value(tree: &MeasuredNode) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(ExportNode::from_measured(tree))?)
}

pub fn export_json(tree: &MeasuredNode, pretty: bool) -> Result<String> {
    let node = ExportNode::from_measured(tree);
    let text = if pretty {
        serde_json::to_string_pretty(&node)?
    } else {
        serde_json::to_string(&node)?
    };
    Ok(text)
}

/// Writes the pretty-printed export to `path`, overwriting any existing file.
pub fn export_to_file(tree: &MeasuredNode, path: &Path) -> Result<()> {
    let text = export_json(tree, true)?;
    std::fs::write(path, text)?;
    tracing::debug!(path = %path.display(), "wrote layout export");
    Ok(())
}

/// `data/tree.json` -> `data/tree_export.json`.
pub fn export_path_for(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "tree".to_string());
    let name = match input.extension() {
        Some(ext) => format!("{stem}_export.{}", ext.to_string_lossy()),
        None => format!("{stem}_export.json"),
    };
    input.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_path_keeps_directory_and_extension() {
        assert_eq!(
            export_path_for(Path::new("data/example_data.json")),
            PathBuf::from("data/example_data_export.json")
        );
        assert_eq!(
            export_path_for(Path::new("tree")),
            PathBuf::from("tree_export.json")
        );
    }
}
