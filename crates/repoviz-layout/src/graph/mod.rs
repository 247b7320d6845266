use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Layout input. Node order is significant: it decides sibling order in the tree layout and the
/// initial spiral in the force layout.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn validate(&self) -> Result<()> {
        let mut node_exists: std::collections::BTreeSet<&str> = std::collections::BTreeSet::new();
        for n in &self.nodes {
            if !node_exists.insert(n.id.as_str()) {
                return Err(Error::DuplicateNode {
                    node_id: n.id.clone(),
                });
            }
        }
        for e in &self.edges {
            if !node_exists.contains(e.source.as_str()) || !node_exists.contains(e.target.as_str())
            {
                return Err(Error::MissingEndpoint {
                    edge_id: e.id.clone(),
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    /// `/`-separated path; the tree layout derives containment from it.
    pub id: String,
}

impl Node {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

#[derive(Debug, Clone)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
}

impl Edge {
    pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn distance(self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

#[derive(Debug, Clone, Default)]
pub struct LayoutResult {
    pub positions: std::collections::BTreeMap<String, Point>,
}

impl LayoutResult {
    /// Position of `id`, or the origin when the layout did not place it.
    pub fn position_or_origin(&self, id: &str) -> Point {
        self.positions
            .get(id)
            .copied()
            .unwrap_or(Point { x: 0.0, y: 0.0 })
    }
}
