//! Graph synthesis: connections in, deduplicated nodes and per-connection edges out.

use crate::classify::Classifier;
use crate::model::{
    Connection, ConnectionKind, GraphEdge, GraphNode, NodeKind, OrphanRole, Position, RepoGraph,
    SynthesisStats,
};
use crate::paths;
use crate::style::Palette;
use indexmap::IndexMap;

/// Builds the node/edge graph for `connections`.
///
/// `classifier` must be built from the full, unfiltered connection list; `connections` may be a
/// filtered subset of it. Positions are left at the origin for a layout pass to fill in.
pub fn synthesize(
    connections: &[Connection],
    classifier: &Classifier,
    palette: &Palette,
) -> RepoGraph {
    let mut nodes: IndexMap<String, GraphNode> = IndexMap::new();
    let mut edges = Vec::with_capacity(connections.len());
    let mut stats = SynthesisStats {
        connections: connections.len(),
        dropped: 0,
    };

    for (ordinal, conn) in connections.iter().enumerate() {
        let Some((from, to)) = conn.endpoints() else {
            stats.dropped += 1;
            tracing::debug!(ordinal, ?conn, "dropping connection without endpoints");
            continue;
        };

        if !nodes.contains_key(&from) {
            let role = classifier.classify_source(&from);
            let node = file_node(&from, &conn.from_file, role, palette);
            nodes.insert(from.clone(), node);
        }
        if !nodes.contains_key(&to) {
            let role = classifier.classify_target(&to);
            let node = file_node(&to, &conn.to_file, role, palette);
            nodes.insert(to.clone(), node);
        }

        let kind = conn.connection_kind();
        edges.push(GraphEdge {
            id: GraphEdge::edge_id(&from, &to, ordinal),
            source: from,
            target: to,
            kind: conn.kind.clone(),
            animated: kind == ConnectionKind::Import,
            color_class: kind.color_class().to_string(),
            style: palette.edge_style(&conn.kind),
        });
    }

    let folders = infer_folders(nodes.keys().map(String::as_str), |id| nodes.contains_key(id));
    for folder in folders {
        let node = folder_node(&folder, palette);
        nodes.insert(folder, node);
    }

    if stats.dropped > 0 {
        tracing::debug!(
            dropped = stats.dropped,
            total = stats.connections,
            "malformed connections dropped during synthesis"
        );
    }

    RepoGraph {
        nodes: nodes.into_values().collect(),
        edges,
        stats,
    }
}

/// Ancestor folders of `ids` that are not themselves ids, in first-seen order.
pub fn infer_folders<'a>(
    ids: impl IntoIterator<Item = &'a str>,
    is_known: impl Fn(&str) -> bool,
) -> Vec<String> {
    let mut out: IndexMap<String, ()> = IndexMap::new();
    for id in ids {
        for ancestor in paths::ancestors_of(id) {
            if !is_known(&ancestor) {
                out.entry(ancestor).or_insert(());
            }
        }
    }
    out.into_keys().collect()
}

fn file_node(id: &str, display_name: &str, role: Option<OrphanRole>, palette: &Palette) -> GraphNode {
    let label = if display_name.is_empty() {
        id.to_string()
    } else {
        display_name.to_string()
    };
    let is_orphan = role.is_some();
    GraphNode {
        id: id.to_string(),
        label,
        kind: NodeKind::File,
        position: Position::ORIGIN,
        is_orphan,
        orphan_role: role,
        is_selected: false,
        style: palette.node_style(NodeKind::File, is_orphan, false),
    }
}

fn folder_node(id: &str, palette: &Palette) -> GraphNode {
    GraphNode {
        id: id.to_string(),
        label: paths::last_segment(id).to_string(),
        kind: NodeKind::Folder,
        position: Position::ORIGIN,
        is_orphan: false,
        orphan_role: None,
        is_selected: false,
        style: palette.node_style(NodeKind::Folder, false, false),
    }
}
