//! Input records (file tree, connections) and the synthesized graph they turn into.
//!
//! Serialized field names follow the camelCase shape the rendering surface consumes
//! (`isDir`, `fromFile`, `isOrphan`, ...).

use crate::paths;
use crate::style::{EdgeStyle, NodeStyle};
use serde::{Deserialize, Serialize};

/// One entry of a scanned directory tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    pub name: String,
    pub path: String,
    pub is_dir: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<FileInfo>>,
}

impl FileInfo {
    pub fn file(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            is_dir: false,
            children: None,
        }
    }

    pub fn dir(name: impl Into<String>, path: impl Into<String>, children: Vec<FileInfo>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            is_dir: true,
            children: Some(children),
        }
    }

    pub fn children(&self) -> &[FileInfo] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Number of entries in this subtree, the entry itself included.
    pub fn count_entries(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(FileInfo::count_entries)
            .sum::<usize>()
    }

    /// Looks up a descendant (or `self`) by path. Separators are normalized on both sides.
    pub fn find(&self, path: &str) -> Option<&FileInfo> {
        let wanted = paths::normalize(path);
        self.find_normalized(&wanted)
    }

    fn find_normalized(&self, wanted: &str) -> Option<&FileInfo> {
        if paths::normalize(&self.path) == wanted {
            return Some(self);
        }
        self.children()
            .iter()
            .find_map(|child| child.find_normalized(wanted))
    }

    /// Normalized paths of every non-directory entry, depth-first.
    pub fn file_paths(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_file_paths(&mut out);
        out
    }

    fn collect_file_paths(&self, out: &mut Vec<String>) {
        if !self.is_dir {
            out.push(paths::normalize(&self.path));
        }
        for child in self.children() {
            child.collect_file_paths(out);
        }
    }
}

/// A raw relationship between two files as produced by a connection extractor.
///
/// Older producers only fill `fromFile`/`toFile`; every field reads as empty when missing or
/// `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Connection {
    #[serde(deserialize_with = "null_as_empty")]
    pub from: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub to: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub from_file: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub to_file: String,
    #[serde(rename = "type", deserialize_with = "null_as_empty")]
    pub kind: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl Connection {
    pub fn new(from: impl Into<String>, to: impl Into<String>, kind: impl Into<String>) -> Self {
        let from = from.into();
        let to = to.into();
        Self {
            from_file: paths::last_segment(&paths::normalize(&from)).to_string(),
            to_file: paths::last_segment(&paths::normalize(&to)).to_string(),
            from,
            to,
            kind: kind.into(),
        }
    }

    /// Source id: `from`, falling back to `fromFile`, normalized. `None` when both are empty.
    pub fn source_id(&self) -> Option<String> {
        resolve_endpoint(&self.from, &self.from_file)
    }

    /// Target id: `to`, falling back to `toFile`, normalized. `None` when both are empty.
    pub fn target_id(&self) -> Option<String> {
        resolve_endpoint(&self.to, &self.to_file)
    }

    /// Both endpoints, or `None` for a malformed connection.
    pub fn endpoints(&self) -> Option<(String, String)> {
        Some((self.source_id()?, self.target_id()?))
    }

    pub fn connection_kind(&self) -> ConnectionKind {
        ConnectionKind::parse(&self.kind)
    }
}

fn resolve_endpoint(path: &str, display_name: &str) -> Option<String> {
    let raw = if path.is_empty() { display_name } else { path };
    if raw.is_empty() {
        None
    } else {
        Some(paths::normalize(raw))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionKind {
    Import,
    External,
    Other,
}

impl ConnectionKind {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "import" => Self::Import,
            "external" => Self::External,
            _ => Self::Other,
        }
    }

    pub fn color_class(self) -> &'static str {
        match self {
            Self::Import => "import",
            Self::External => "external",
            Self::Other => "default",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Folder,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Why a node counts as orphaned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrphanRole {
    /// Introduced as a source and never targeted by any connection.
    Source,
    /// Introduced as a target and never the origin of any connection.
    Sink,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub kind: NodeKind,
    pub position: Position,
    pub is_orphan: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orphan_role: Option<OrphanRole>,
    pub is_selected: bool,
    pub style: NodeStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub animated: bool,
    pub color_class: String,
    pub style: EdgeStyle,
}

impl GraphEdge {
    pub fn edge_id(source: &str, target: &str, ordinal: usize) -> String {
        format!("e{source}-{target}-{ordinal}")
    }
}

/// Soft conditions observed while synthesizing a graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesisStats {
    /// Connections handed to the synthesizer.
    pub connections: usize,
    /// Connections dropped because an endpoint could not be resolved.
    pub dropped: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepoGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    #[serde(skip)]
    pub stats: SynthesisStats,
}

impl RepoGraph {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut GraphNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    /// The node ids plus edge ids of this graph, order-independent.
    pub fn identity(&self) -> GraphIdentity {
        let mut nodes = self.nodes.iter().map(|n| n.id.clone()).collect::<Vec<_>>();
        nodes.sort();
        let mut edges = self.edges.iter().map(|e| e.id.clone()).collect::<Vec<_>>();
        edges.sort();
        GraphIdentity { nodes, edges }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct GraphIdentity {
    nodes: Vec<String>,
    edges: Vec<String>,
}
