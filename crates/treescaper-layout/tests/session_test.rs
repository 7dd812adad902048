use treescaper_core::{ScaperConfig, TreeNode};
use treescaper_layout::svg::SvgRenderOptions;
use treescaper_layout::{Error, Point, Scene};

fn tree() -> TreeNode {
    TreeNode::new(
        "root",
        "subtitle",
        vec![TreeNode::leaf("a", "1"), TreeNode::leaf("b", "2")],
    )
}

fn config() -> ScaperConfig {
    let mut cfg = ScaperConfig::default();
    cfg.window.width = 1000.0;
    cfg.window.height = 800.0;
    cfg.window.scroll_speed_horizontal = 10.0;
    cfg.window.scroll_speed_vertical = 20.0;
    cfg.zoom.start_level = 0;
    cfg.zoom.min_level = -1;
    cfg.zoom.max_level = 1;
    cfg.zoom.zoom_factor = 2.0;
    cfg
}

#[test]
fn first_layout_puts_root_at_the_viewport_anchor() {
    let mut scene = Scene::new(tree(), config());
    assert!(scene.layout().is_none());
    assert!(scene.render_svg(&SvgRenderOptions::default()).is_none());

    let root = scene.relayout().unwrap();
    assert_eq!(root.position, Some(Point::new(500.0, 200.0)));
}

#[test]
fn zoom_rescales_spacing_and_stops_at_the_range_limit() {
    let mut scene = Scene::new(tree(), config());
    scene.relayout().unwrap();
    let base_spacing = scene.params().vertical_spacing;
    let base_height = scene.layout().unwrap().height;

    assert!(scene.zoom_in().unwrap());
    assert_eq!(scene.zoom().level(), 1);
    assert_eq!(scene.params().vertical_spacing, base_spacing * 2.0);
    assert!(scene.layout().unwrap().height > base_height);

    // Already at max: no change and no re-layout.
    assert!(!scene.zoom_in().unwrap());
    assert_eq!(scene.zoom().level(), 1);

    assert!(scene.set_zoom_level(-5).unwrap());
    assert_eq!(scene.zoom().level(), -1);
    assert_eq!(scene.params().vertical_spacing, base_spacing / 2.0);
}

#[test]
fn scrolling_moves_the_cached_layout_without_resizing() {
    let mut scene = Scene::new(tree(), config());
    scene.relayout().unwrap();
    let before = scene.layout().unwrap().clone();

    scene.scroll(2.0, -1.0);
    let after = scene.layout().unwrap();
    assert_eq!(after.position, Some(Point::new(520.0, 180.0)));
    for (a, b) in before.iter().zip(after.iter()) {
        let (pa, pb) = (a.position.unwrap(), b.position.unwrap());
        assert!((pb.x - pa.x - 20.0).abs() < 1e-9);
        assert!((pb.y - pa.y + 20.0).abs() < 1e-9);
        assert_eq!(a.subtree_width, b.subtree_width);
    }

    // Pan survives a re-layout.
    scene.zoom_out().unwrap();
    assert_eq!(scene.layout().unwrap().position, Some(Point::new(520.0, 180.0)));
}

#[test]
fn failed_pass_keeps_the_last_good_layout() {
    let mut scene = Scene::new(tree(), config());
    scene.relayout().unwrap();
    let good = scene.layout().unwrap().clone();
    let good_params = scene.params().clone();

    let mut broken = config();
    broken.layout.horizontal_spacing = -5.0;
    let err = scene.set_config(broken).unwrap_err();
    assert!(matches!(err, Error::InvalidParameters { .. }));

    assert_eq!(scene.layout(), Some(&good));
    assert_eq!(scene.params(), &good_params);
    assert_eq!(scene.config(), &config());
    assert!(scene.render_svg(&SvgRenderOptions::default()).is_some());
}

#[test]
fn svg_is_titled_with_the_window_name_unless_overridden() {
    let mut cfg = config();
    cfg.window.name = "Org <chart>".to_string();
    let mut scene = Scene::new(tree(), cfg);
    scene.relayout().unwrap();

    let svg = scene.render_svg(&SvgRenderOptions::default()).unwrap();
    assert!(svg.contains("<title>Org &lt;chart&gt;</title>"));

    let svg = scene
        .render_svg(&SvgRenderOptions {
            title: Some("Custom".to_string()),
            ..Default::default()
        })
        .unwrap();
    assert!(svg.contains("<title>Custom</title>"));
    assert!(!svg.contains("Org &lt;chart&gt;"));
}

#[test]
fn set_tree_replaces_the_layout() {
    let mut scene = Scene::new(tree(), config());
    scene.relayout().unwrap();
    scene.set_tree(TreeNode::leaf("solo", "")).unwrap();
    let layout = scene.layout().unwrap();
    assert_eq!(layout.title, "solo");
    assert_eq!(layout.node_count(), 1);
    assert_eq!(scene.tree().title, "solo");
}

#[test]
fn config_change_resets_zoom_and_applies_new_flags() {
    let mut scene = Scene::new(tree(), config());
    scene.relayout().unwrap();
    scene.zoom_in().unwrap();

    let mut cfg = config();
    cfg.runtime.v_stack_leafs = true;
    scene.set_config(cfg).unwrap();
    assert_eq!(scene.zoom().level(), 0);
    assert!(scene.layout().unwrap().is_leaf_stack());
}
