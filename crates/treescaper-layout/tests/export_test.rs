use serde_json::json;
use treescaper_core::TreeNode;
use treescaper_layout::export::{export_json, export_path_for, export_to_file, export_value};
use treescaper_layout::measure::measure_tree;
use treescaper_layout::{
    DeterministicTextMeasurer, LayoutParameters, NodeSizing, Point, TextStyle, layout_tree,
};

fn params() -> LayoutParameters {
    let style = TextStyle {
        font_size: 10.0,
        ..Default::default()
    };
    LayoutParameters {
        horizontal_spacing: 10.0,
        vertical_spacing: 20.0,
        v_stack_leafs: true,
        align_stack_widths: false,
        sizing: NodeSizing::Padded {
            padding_x: 5.0,
            padding_y: 5.0,
            min_width: 0.0,
        },
        title_style: style.clone(),
        subtitle_style: style,
    }
}

fn measurer() -> DeterministicTextMeasurer {
    DeterministicTextMeasurer {
        char_width_factor: 1.0,
        line_height_factor: 1.0,
    }
}

#[test]
fn export_mirrors_input_shape_with_measured_block() {
    let tree = TreeNode::new("root", "", vec![TreeNode::leaf("a", "b")]);
    let out = layout_tree(&tree, &params(), &measurer(), Point::new(0.0, 0.0)).unwrap();
    let v = export_value(&out).unwrap();

    assert_eq!(
        v,
        json!({
            "title": "root",
            "subtitle": "",
            "_measured": {
                "width": 50.0,
                "height": 40.0,
                "top_height": 20.0,
                "bottom_height": 20.0,
                "subtree_width": 50.0,
                "subtree_height": 100.0,
                "position": [0.0, 0.0],
                "leaves_only": true
            },
            "branches": [{
                "title": "a",
                "subtitle": "b",
                "_measured": {
                    "width": 20.0,
                    "height": 40.0,
                    "top_height": 20.0,
                    "bottom_height": 20.0,
                    "subtree_width": 20.0,
                    "subtree_height": 40.0,
                    "position": [0.0, 60.0],
                    "leaves_only": false
                },
                "branches": []
            }]
        })
    );
}

#[test]
fn unpositioned_nodes_export_null_position() {
    let tree = TreeNode::leaf("a", "b");
    let measured = measure_tree(&tree, &params(), &measurer());
    let v = export_value(&measured).unwrap();
    assert_eq!(v["_measured"]["position"], serde_json::Value::Null);
}

#[test]
fn export_file_is_written_next_to_the_input() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = tmp.path().join("example_data.json");
    let path = export_path_for(&input);
    assert_eq!(path, tmp.path().join("example_data_export.json"));

    let tree = TreeNode::new("r", "", vec![TreeNode::leaf("c", "")]);
    let out = layout_tree(&tree, &params(), &measurer(), Point::new(0.0, 0.0)).unwrap();
    export_to_file(&out, &path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text, export_json(&out, true).unwrap());
    let v: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(v["branches"][0]["title"], "c");
}
