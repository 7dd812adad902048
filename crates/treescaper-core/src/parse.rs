use crate::model::{MAX_TREE_DEPTH, TreeNode};
use crate::{Error, Result};
use serde::Deserialize;
use serde_json::Value;

/// Parses a tree from JSON text.
///
/// Each node must be an object with string `title` and `subtitle` fields. `branches` is optional;
/// an absent, `null` or empty list makes the node a leaf. Trees up to [`MAX_TREE_DEPTH`] levels
/// deep are accepted.
pub fn parse_tree(text: &str) -> Result<TreeNode> {
    // Every tree level is two JSON levels (the node object and its `branches` array), so the
    // default 128 limit would stop at 64 nodes. Grow the stack on demand instead.
    let mut de = serde_json::Deserializer::from_str(text);
    de.disable_recursion_limit();
    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;
    parse_tree_value(&value)
}

/// Same as [`parse_tree`], starting from an already decoded JSON value.
pub fn parse_tree_value(value: &Value) -> Result<TreeNode> {
    let mut path = String::from("$");
    let tree = parse_node(value, &mut path, 1)?;
    tracing::debug!(
        nodes = tree.node_count(),
        depth = tree.depth(),
        "parsed input tree"
    );
    Ok(tree)
}

fn parse_node(value: &Value, path: &mut String, depth: usize) -> Result<TreeNode> {
    if depth > MAX_TREE_DEPTH {
        return Err(Error::TooDeep {
            path: path.clone(),
            limit: MAX_TREE_DEPTH,
        });
    }
    let Some(obj) = value.as_object() else {
        return Err(Error::InvalidNode { path: path.clone() });
    };

    let title = string_field(obj, "title", path)?;
    let subtitle = string_field(obj, "subtitle", path)?;

    let children = match obj.get("branches") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => {
            let mut out = Vec::with_capacity(items.len());
            for (idx, item) in items.iter().enumerate() {
                let restore = path.len();
                path.push_str(&format!(".branches[{idx}]"));
                out.push(parse_node(item, path, depth + 1)?);
                path.truncate(restore);
            }
            out
        }
        Some(_) => {
            return Err(Error::InvalidField {
                path: path.clone(),
                field: "branches",
                expected: "an array of nodes",
            });
        }
    };

    Ok(TreeNode::new(title, subtitle, children))
}

fn string_field(
    obj: &serde_json::Map<String, Value>,
    field: &'static str,
    path: &str,
) -> Result<String> {
    match obj.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(Error::InvalidField {
            path: path.to_string(),
            field,
            expected: "a string",
        }),
        None => Err(Error::MissingField {
            path: path.to_string(),
            field,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_null_and_empty_branches_are_leaves() {
        for text in [
            r#"{"title":"a","subtitle":"b"}"#,
            r#"{"title":"a","subtitle":"b","branches":null}"#,
            r#"{"title":"a","subtitle":"b","branches":[]}"#,
        ] {
            let node = parse_tree(text).unwrap();
            assert!(node.is_leaf(), "{text}");
        }
    }

    #[test]
    fn preserves_child_order_and_newlines() {
        let node = parse_tree(
            r#"{"title":"root\nline 2","subtitle":"","branches":[
                {"title":"first","subtitle":"1"},
                {"title":"second","subtitle":"2"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(node.title, "root\nline 2");
        let titles: Vec<&str> = node.children().iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, ["first", "second"]);
    }

    #[test]
    fn missing_subtitle_reports_node_path() {
        let err = parse_tree(
            r#"{"title":"r","subtitle":"","branches":[
                {"title":"ok","subtitle":""},
                {"title":"bad"}
            ]}"#,
        )
        .unwrap_err();
        match err {
            Error::MissingField { path, field } => {
                assert_eq!(path, "$.branches[1]");
                assert_eq!(field, "subtitle");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_non_string_title_and_non_array_branches() {
        let err = parse_tree(r#"{"title":1,"subtitle":""}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidField { field: "title", .. }));

        let err = parse_tree(r#"{"title":"a","subtitle":"","branches":{}}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidField { field: "branches", .. }));

        let err = parse_tree(r#"["not a node"]"#).unwrap_err();
        assert!(matches!(err, Error::InvalidNode { .. }));
    }

    fn nested(levels: usize) -> String {
        let mut text = String::new();
        for _ in 1..levels {
            text.push_str(r#"{"title":"n","subtitle":"","branches":["#);
        }
        text.push_str(r#"{"title":"leaf","subtitle":""}"#);
        for _ in 1..levels {
            text.push_str("]}");
        }
        text
    }

    #[test]
    fn deep_chains_parse_past_the_json_nesting_default() {
        let tree = parse_tree(&nested(300)).unwrap();
        assert_eq!(tree.depth(), 300);
        assert_eq!(tree.node_count(), 300);

        let tree = parse_tree(&nested(MAX_TREE_DEPTH)).unwrap();
        assert_eq!(tree.depth(), MAX_TREE_DEPTH);
    }

    #[test]
    fn trees_past_the_depth_bound_are_rejected() {
        let err = parse_tree(&nested(MAX_TREE_DEPTH + 1)).unwrap_err();
        match err {
            Error::TooDeep { path, limit } => {
                assert_eq!(limit, MAX_TREE_DEPTH);
                assert_eq!(path.matches(".branches[0]").count(), MAX_TREE_DEPTH);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn trailing_garbage_is_a_json_error() {
        let err = parse_tree(r#"{"title":"a","subtitle":""} x"#).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn syntax_errors_surface_as_json_errors() {
        let err = parse_tree("{").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
