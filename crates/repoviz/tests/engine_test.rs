use futures::executor::block_on;
use repoviz::{
    Connection, Engine, EngineConfig, FileInfo, Focus, FsScanner, GraphView, JsonConnections,
    LayoutMode, OrphanRole, Position,
};
use std::fs;

fn scenario() -> Vec<Connection> {
    vec![
        Connection::new("a.ts", "b.ts", "import"),
        Connection::new("b.ts", "pkg", "external"),
    ]
}

fn position(view: &GraphView, id: &str) -> Position {
    view.graph()
        .and_then(|g| g.node(id))
        .map(|n| n.position)
        .unwrap_or_else(|| panic!("missing node {id}"))
}

#[test]
fn overview_is_laid_out_as_a_folder_tree() {
    let conns = vec![Connection::new("src/a.ts", "src/b.ts", "import")];
    let view = Engine::new().overview(&conns).expect("overview");

    assert!(matches!(view, GraphView::Overview { .. }));
    assert_eq!(view.focus(), None);
    assert_eq!(position(&view, "src"), Position::new(0.0, 50.0));
    assert_eq!(position(&view, "src/a.ts"), Position::new(280.0, 50.0));
    assert_eq!(position(&view, "src/b.ts"), Position::new(280.0, 150.0));
}

#[test]
fn overview_of_the_scenario_flags_orphans() {
    let view = Engine::new().overview(&scenario()).expect("overview");
    let graph = view.graph().expect("graph");

    assert_eq!(graph.nodes.len(), 3);
    assert_eq!(graph.edges.len(), 2);
    let a = graph.node("a.ts").expect("a.ts");
    assert!(a.is_orphan);
    assert_eq!(a.orphan_role, Some(OrphanRole::Source));
    let pkg = graph.node("pkg").expect("pkg");
    assert!(pkg.is_orphan);
    assert_eq!(pkg.orphan_role, Some(OrphanRole::Sink));
    assert!(!graph.node("b.ts").expect("b.ts").is_orphan);
    assert!(graph.nodes.iter().all(|n| !n.is_selected));
}

#[test]
fn focusing_b_keeps_its_whole_neighborhood() {
    let view = Engine::new()
        .build_view(&scenario(), Some(&Focus::new("b.ts")))
        .expect("view");

    assert_eq!(view.focus(), Some("b.ts"));
    let graph = view.graph().expect("graph");
    assert_eq!(graph.nodes.len(), 3);
    assert_eq!(graph.edges.len(), 2);
    assert!(graph.node("b.ts").expect("b.ts").is_selected);
    assert!(!graph.node("a.ts").expect("a.ts").is_selected);
}

#[test]
fn focusing_a_keeps_full_list_orphan_flags() {
    let view = Engine::new()
        .build_view(&scenario(), Some(&Focus::new("a.ts")))
        .expect("view");
    let graph = view.graph().expect("graph");

    assert_eq!(graph.edges.len(), 1);
    assert!(graph.node("pkg").is_none());
    assert!(graph.node("a.ts").expect("a.ts").is_orphan);
    // b.ts is a source in the full list even though its outgoing edge was filtered away.
    assert!(!graph.node("b.ts").expect("b.ts").is_orphan);
}

#[test]
fn focused_view_uses_the_force_layout() {
    let view = Engine::new()
        .build_view(&scenario(), Some(&Focus::new("b.ts")))
        .expect("view");
    let graph = view.graph().expect("graph");

    let n = graph.nodes.len() as f64;
    let cx = graph.nodes.iter().map(|n| n.position.x).sum::<f64>() / n;
    let cy = graph.nodes.iter().map(|n| n.position.y).sum::<f64>() / n;
    assert!((cx - 600.0).abs() < 5.0, "centroid x {cx}");
    assert!((cy - 400.0).abs() < 5.0, "centroid y {cy}");

    let again = Engine::new()
        .build_view(&scenario(), Some(&Focus::new("b.ts")))
        .expect("view");
    assert_eq!(view, again);
}

#[test]
fn layout_mode_overrides_the_automatic_choice() {
    let view = Engine::new()
        .with_layout_mode(LayoutMode::Tree)
        .build_view(&scenario(), Some(&Focus::new("b.ts")))
        .expect("view");

    assert_eq!(position(&view, "a.ts"), Position::new(0.0, 50.0));
    assert_eq!(position(&view, "b.ts"), Position::new(0.0, 150.0));
    assert_eq!(position(&view, "pkg"), Position::new(0.0, 250.0));
}

#[test]
fn focus_without_connections_reports_an_empty_state() {
    let view = Engine::new()
        .build_view(&scenario(), Some(&Focus::new("lonely.ts")))
        .expect("view");

    assert_eq!(
        view,
        GraphView::NoConnectionsForFocus {
            focus: "lonely.ts".to_string()
        }
    );
    assert!(view.graph().is_none());
}

#[test]
fn empty_connection_list_gives_an_empty_overview() {
    let view = Engine::new().overview(&[]).expect("overview");
    assert!(view.graph().is_some_and(|g| g.is_empty()));
}

#[test]
fn selecting_a_directory_shows_the_overview() {
    let dir = FileInfo::dir("src", "src", vec![FileInfo::file("a.ts", "src/a.ts")]);
    let view = Engine::new().select(&scenario(), &dir).expect("view");
    assert!(matches!(view, GraphView::Overview { .. }));

    let file = FileInfo::file("b.ts", "b.ts");
    let view = Engine::new().select(&scenario(), &file).expect("view");
    assert_eq!(view.focus(), Some("b.ts"));
}

#[test]
fn view_serializes_with_a_tag() {
    let view = Engine::new()
        .build_view(&scenario(), Some(&Focus::new("lonely.ts")))
        .expect("view");
    let json = serde_json::to_value(&view).expect("json");
    assert_eq!(
        json,
        serde_json::json!({"view": "noConnectionsForFocus", "focus": "lonely.ts"})
    );

    let overview = Engine::new().overview(&scenario()).expect("overview");
    let json = serde_json::to_value(&overview).expect("json");
    assert_eq!(json["view"], "overview");
    assert_eq!(json["graph"]["nodes"][0]["isOrphan"], true);
}

#[test]
fn config_json_overrides_defaults() {
    let config = EngineConfig::from_json(
        r##"{"layout":"tree","tree":{"horizontalSpacing":100},"palette":{"orphanBackground":"#000000"}}"##,
    )
    .expect("config");
    assert_eq!(config.layout, LayoutMode::Tree);
    assert_eq!(config.tree.horizontal_spacing, 100.0);
    assert_eq!(config.tree.vertical_spacing, 100.0);
    assert_eq!(config.force.iterations, 300);

    let conns = vec![Connection::new("src/a.ts", "lib", "import")];
    let view = Engine::new().with_config(config).overview(&conns).expect("view");
    assert_eq!(position(&view, "lib"), Position::new(0.0, 50.0));
    assert_eq!(position(&view, "src"), Position::new(0.0, 150.0));
    assert_eq!(position(&view, "src/a.ts"), Position::new(100.0, 150.0));
    let graph = view.graph().expect("graph");
    assert_eq!(graph.node("src/a.ts").expect("a").style.background, "#000000");
}

#[test]
fn load_scans_and_reads_connections_together() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let root = tmp.path();
    fs::create_dir_all(root.join("src")).expect("mkdir");
    fs::write(root.join("src/a.ts"), "").expect("write");
    fs::write(
        root.join("connections.json"),
        r#"[{"from":"src/a.ts","to":"react","type":"external","fromFile":"a.ts","toFile":"react"}]"#,
    )
    .expect("write");

    let engine = Engine::new();
    let loaded = block_on(engine.load(
        &FsScanner::default(),
        &JsonConnections::new("connections.json"),
        root,
    ))
    .expect("load");

    assert!(loaded.tree.find("src/a.ts").is_some());
    assert_eq!(loaded.connections.len(), 1);

    let view = engine.overview(&loaded.connections).expect("view");
    let graph = view.graph().expect("graph");
    assert_eq!(graph.edges[0].color_class, "external");
}

#[test]
fn load_fails_when_connections_are_missing() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let err = block_on(Engine::new().load(
        &FsScanner::default(),
        &JsonConnections::new("missing.json"),
        tmp.path(),
    ))
    .expect_err("missing connections");
    assert!(matches!(err, repoviz::error::Error::Core(_)), "unexpected error: {err}");
    assert!(err.to_string().contains("missing.json"), "{err}");
}
