use repoviz_layout::{Algorithm, Edge, Error, ForceLayoutOptions, Graph, Node, layout};

fn graph(ids: &[&str], edges: &[(&str, &str)]) -> Graph {
    Graph {
        nodes: ids.iter().map(|id| Node::new(*id)).collect(),
        edges: edges
            .iter()
            .enumerate()
            .map(|(i, (s, t))| Edge::new(format!("e{s}-{t}-{i}"), *s, *t))
            .collect(),
    }
}

fn force(g: &Graph) -> repoviz_layout::LayoutResult {
    layout(g, &Algorithm::Force(ForceLayoutOptions::default())).expect("layout")
}

#[test]
fn two_connected_nodes_settle_near_the_rest_length() {
    let out = force(&graph(&["a.ts", "b.ts"], &[("a.ts", "b.ts")]));
    let d = out.positions["a.ts"].distance(out.positions["b.ts"]);
    let rest = ForceLayoutOptions::default().link_distance;
    assert!(
        d > rest * 0.75 && d < rest * 1.3,
        "distance {d} is outside the band around {rest}"
    );
}

#[test]
fn layout_is_reproducible() {
    let g = graph(
        &["f", "a", "b", "c", "d"],
        &[("f", "a"), ("f", "b"), ("c", "f"), ("a", "b"), ("d", "f")],
    );
    let first = force(&g);
    let second = force(&g);
    assert_eq!(first.positions, second.positions);
}

#[test]
fn layout_is_centred_on_the_canvas() {
    let g = graph(
        &["f", "a", "b", "c", "d", "e"],
        &[("f", "a"), ("f", "b"), ("f", "c"), ("f", "d"), ("f", "e"), ("a", "b")],
    );
    let out = force(&g);
    let n = out.positions.len() as f64;
    let cx = out.positions.values().map(|p| p.x).sum::<f64>() / n;
    let cy = out.positions.values().map(|p| p.y).sum::<f64>() / n;
    assert!((cx - 600.0).abs() < 5.0, "centroid x {cx}");
    assert!((cy - 400.0).abs() < 5.0, "centroid y {cy}");
}

#[test]
fn collision_keeps_nodes_apart() {
    let g = graph(
        &["f", "a", "b", "c", "d", "e"],
        &[("f", "a"), ("f", "b"), ("f", "c"), ("f", "d"), ("f", "e"), ("a", "b")],
    );
    let out = force(&g);
    let pts = out.positions.values().copied().collect::<Vec<_>>();
    for i in 0..pts.len() {
        for j in (i + 1)..pts.len() {
            let d = pts[i].distance(pts[j]);
            assert!(d > 150.0, "nodes {i} and {j} are only {d} apart");
        }
    }
}

#[test]
fn single_node_lands_on_the_center() {
    let out = force(&graph(&["only.ts"], &[]));
    let p = out.positions["only.ts"];
    assert!((p.x - 600.0).abs() < 1e-6 && (p.y - 400.0).abs() < 1e-6);
}

#[test]
fn zero_iterations_keeps_the_initial_spiral() {
    let opts = ForceLayoutOptions {
        iterations: 0,
        ..Default::default()
    };
    let out = layout(&graph(&["a", "b"], &[("a", "b")]), &Algorithm::Force(opts)).expect("layout");
    let a = out.positions["a"];
    assert!((a.x - 10.0 * 0.5f64.sqrt()).abs() < 1e-9);
    assert!(a.y.abs() < 1e-9);
}

#[test]
fn empty_graph_lays_out_to_nothing() {
    let out = force(&Graph::default());
    assert!(out.positions.is_empty());
    assert_eq!(out.position_or_origin("missing").x, 0.0);
}

#[test]
fn edges_must_reference_known_nodes() {
    let err = layout(
        &graph(&["a"], &[("a", "ghost")]),
        &Algorithm::Force(ForceLayoutOptions::default()),
    )
    .expect_err("missing endpoint");
    assert!(matches!(err, Error::MissingEndpoint { .. }));

    let dup = graph(&["a", "a"], &[]);
    let err = layout(&dup, &Algorithm::Force(ForceLayoutOptions::default()))
        .expect_err("duplicate node");
    assert!(matches!(err, Error::DuplicateNode { .. }));
}
