//! Folder-containment stacking.
//!
//! Edges are ignored: a node's column is its folder nesting depth, and rows are
//! handed out depth-first so every subtree occupies a contiguous vertical band.

use crate::algo::TreeLayoutOptions;
use crate::error::Result;
use crate::graph::{Graph, LayoutResult, Point};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::BTreeMap;

pub fn layout(graph: &Graph, opts: &TreeLayoutOptions) -> Result<LayoutResult> {
    graph.validate()?;

    let known: FxHashSet<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
    let mut roots: Vec<&str> = Vec::new();
    let mut children: FxHashMap<&str, Vec<&str>> = FxHashMap::default();
    for n in &graph.nodes {
        match parent_path(&n.id) {
            Some(parent) if known.contains(parent) => {
                children.entry(parent).or_default().push(n.id.as_str());
            }
            Some(parent) => {
                // Only reachable with empty segments ("/x", "a//b"); place it as a root instead
                // of leaving it at the origin.
                tracing::debug!(id = %n.id, parent, "parent is not a node, placing as root");
                roots.push(n.id.as_str());
            }
            None => roots.push(n.id.as_str()),
        }
    }

    let mut positions = BTreeMap::new();
    let extent = place(&roots, 0, opts.start_y, &children, opts, &mut positions);
    tracing::debug!(
        nodes = positions.len(),
        roots = roots.len(),
        extent,
        "tree layout placed nodes"
    );
    Ok(LayoutResult { positions })
}

/// Places `ids` as siblings at `depth` starting at `start_y`; returns the vertical extent used.
fn place(
    ids: &[&str],
    depth: usize,
    start_y: f64,
    children: &FxHashMap<&str, Vec<&str>>,
    opts: &TreeLayoutOptions,
    positions: &mut BTreeMap<String, Point>,
) -> f64 {
    let mut y = start_y;
    for &id in ids {
        positions.insert(
            id.to_string(),
            Point {
                x: depth as f64 * opts.horizontal_spacing,
                y,
            },
        );
        match children.get(id) {
            Some(kids) if !kids.is_empty() => {
                y += place(kids, depth + 1, y, children, opts, positions);
                y += opts.vertical_spacing / 2.0;
            }
            _ => y += opts.vertical_spacing,
        }
    }
    y - start_y
}

fn parent_path(id: &str) -> Option<&str> {
    id.rfind('/').map(|idx| &id[..idx])
}
