//! Orphan and selection classification.
//!
//! Orphan flags are computed against the *full* connection list, so a focused subgraph still
//! reports whether a file is orphaned in the repository as a whole.

use crate::model::{Connection, NodeKind, OrphanRole, RepoGraph};
use crate::style::Palette;
use rustc_hash::FxHashSet;

#[derive(Debug, Clone, Default)]
pub struct Classifier {
    all_sources: FxHashSet<String>,
    all_targets: FxHashSet<String>,
}

impl Classifier {
    /// One pass over `connections`; malformed entries contribute nothing.
    pub fn from_connections(connections: &[Connection]) -> Self {
        let mut out = Self::default();
        for conn in connections {
            let Some((from, to)) = conn.endpoints() else {
                continue;
            };
            out.all_sources.insert(from);
            out.all_targets.insert(to);
        }
        out
    }

    pub fn is_source(&self, id: &str) -> bool {
        self.all_sources.contains(id)
    }

    pub fn is_target(&self, id: &str) -> bool {
        self.all_targets.contains(id)
    }

    /// Role of a node first seen as a connection source: orphaned when nothing targets it.
    pub fn classify_source(&self, id: &str) -> Option<OrphanRole> {
        (!self.is_target(id)).then_some(OrphanRole::Source)
    }

    /// Role of a node first seen as a connection target: orphaned when it originates nothing.
    pub fn classify_target(&self, id: &str) -> Option<OrphanRole> {
        (!self.is_source(id)).then_some(OrphanRole::Sink)
    }
}

/// `true` when `focal` names this node by id or, for callers that only know display names, by
/// label.
pub fn is_selected(id: &str, label: &str, focal: Option<&str>) -> bool {
    match focal {
        Some(focal) => id == focal || label == focal,
        None => false,
    }
}

/// Sets `is_selected` on every node and refreshes the style payload of nodes whose flag changed.
pub fn apply_selection(graph: &mut RepoGraph, focal: Option<&str>, palette: &Palette) {
    for node in &mut graph.nodes {
        let selected = is_selected(&node.id, &node.label, focal);
        if selected != node.is_selected {
            node.is_selected = selected;
            node.style = palette.node_style(node.kind, node.is_orphan, selected);
        }
    }
}

/// Orphaned file nodes, in node order.
pub fn orphans(graph: &RepoGraph) -> impl Iterator<Item = &str> {
    graph
        .nodes
        .iter()
        .filter(|n| n.kind == NodeKind::File && n.is_orphan)
        .map(|n| n.id.as_str())
}
