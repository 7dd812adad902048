use std::path::PathBuf;
use treescaper_core::config::SizingMode;
use treescaper_core::{ScaperConfig, parse_tree};

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

#[test]
fn example_tree_fixture_parses() {
    let path = workspace_root().join("fixtures").join("example_data.json");
    let text = std::fs::read_to_string(&path).expect("fixture");
    let tree = parse_tree(&text).expect("parse ok");

    assert_eq!(tree.title, "Platform");
    assert_eq!(tree.children().len(), 3);
    assert_eq!(tree.node_count(), 10);
    assert_eq!(tree.depth(), 4);

    // `"branches": []` and an absent key are both leaves.
    let ingest = &tree.children()[0];
    assert!(ingest.children().iter().all(|c| c.is_leaf()));
    assert_eq!(ingest.subtitle, "queues\nand workers");
}

#[test]
fn example_config_fixture_parses() {
    let path = workspace_root().join("fixtures").join("config.yaml");
    let text = std::fs::read_to_string(&path).expect("fixture");
    let cfg = ScaperConfig::from_yaml_str(&text).expect("config ok");

    assert!(cfg.runtime.v_stack_leafs);
    assert!(cfg.runtime.align_v_stack);
    assert_eq!(cfg.window.width, 1600.0);
    assert_eq!(cfg.node.size.mode, SizingMode::Padded);
    assert_eq!(cfg.node.size.min_width, 100.0);
    assert_eq!(cfg.node.colors.levels.len(), 3);
    assert_eq!(cfg.layout.vertical_spacing, 32.0);
    assert_eq!(cfg.zoom.zoom_factor, 1.2);
}
