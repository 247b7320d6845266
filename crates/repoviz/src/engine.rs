use crate::config::{EngineConfig, LayoutMode};
use crate::error::Result;
use repoviz_core::filter::{self, Scoped};
use repoviz_core::{
    Classifier, Connection, ConnectionSource, FileInfo, Focus, Position, RepoGraph, Scanner,
    classify, synthesize,
};
use repoviz_layout::{Algorithm, Edge, Graph, Node};
use serde::Serialize;
use std::path::Path;

/// Result of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "camelCase")]
pub enum GraphView {
    /// No focal file: every connection, plus inferred folders.
    #[serde(rename_all = "camelCase")]
    Overview { graph: RepoGraph },
    /// The focal file's neighborhood.
    #[serde(rename_all = "camelCase")]
    Focused { focus: String, graph: RepoGraph },
    /// A focal file is set but no connection touches it.
    #[serde(rename_all = "camelCase")]
    NoConnectionsForFocus { focus: String },
}

impl GraphView {
    pub fn graph(&self) -> Option<&RepoGraph> {
        match self {
            GraphView::Overview { graph } | GraphView::Focused { graph, .. } => Some(graph),
            GraphView::NoConnectionsForFocus { .. } => None,
        }
    }

    pub fn graph_mut(&mut self) -> Option<&mut RepoGraph> {
        match self {
            GraphView::Overview { graph } | GraphView::Focused { graph, .. } => Some(graph),
            GraphView::NoConnectionsForFocus { .. } => None,
        }
    }

    pub fn focus(&self) -> Option<&str> {
        match self {
            GraphView::Overview { .. } => None,
            GraphView::Focused { focus, .. } | GraphView::NoConnectionsForFocus { focus } => {
                Some(focus)
            }
        }
    }
}

/// Everything the collaborators produced for one repository.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedRepo {
    pub tree: FileInfo,
    pub connections: Vec<Connection>,
}

#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    fn timing_enabled() -> bool {
        static ENABLED: std::sync::OnceLock<bool> = std::sync::OnceLock::new();
        *ENABLED.get_or_init(|| {
            std::env::var("REPOVIZ_LAYOUT_TIMING").ok().as_deref() == Some("1")
        })
    }

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_layout_mode(mut self, mode: LayoutMode) -> Self {
        self.config.layout = mode;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Runs the whole pipeline for `connections`, optionally focused on one file.
    ///
    /// Orphan flags are always computed against the full `connections` list.
    pub fn build_view(&self, connections: &[Connection], focus: Option<&Focus>) -> Result<GraphView> {
        let timing_enabled = Self::timing_enabled();
        let total_start = timing_enabled.then(std::time::Instant::now);

        let classifier = Classifier::from_connections(connections);
        let (focus, scoped) = match filter::scope(connections, focus) {
            Scoped::NoConnectionsForFocus { focus } => {
                tracing::info!(focus = focus.path(), "no connections for focal file");
                return Ok(GraphView::NoConnectionsForFocus {
                    focus: focus.path().to_string(),
                });
            }
            scoped => (scoped.focus().cloned(), scoped),
        };

        let synth_start = timing_enabled.then(std::time::Instant::now);
        let mut graph = synthesize(scoped.connections(), &classifier, &self.config.palette);
        classify::apply_selection(
            &mut graph,
            focus.as_ref().map(Focus::path),
            &self.config.palette,
        );
        let synth = synth_start.map(|s| s.elapsed());

        let layout_start = timing_enabled.then(std::time::Instant::now);
        let algorithm = self.algorithm_for(focus.is_some());
        self.apply_layout(&mut graph, &algorithm)?;
        let layout = layout_start.map(|s| s.elapsed());

        if let Some(start) = total_start {
            eprintln!(
                "[repoviz-timing] total={:?} synthesize={:?} layout={:?} nodes={} edges={} dropped={}",
                start.elapsed(),
                synth.unwrap_or_default(),
                layout.unwrap_or_default(),
                graph.nodes.len(),
                graph.edges.len(),
                graph.stats.dropped,
            );
        }
        tracing::debug!(
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            dropped = graph.stats.dropped,
            focused = focus.is_some(),
            "graph view built"
        );

        Ok(match focus {
            Some(focus) => GraphView::Focused {
                focus: focus.path().to_string(),
                graph,
            },
            None => GraphView::Overview { graph },
        })
    }

    /// Full-repository view, no focal file.
    pub fn overview(&self, connections: &[Connection]) -> Result<GraphView> {
        self.build_view(connections, None)
    }

    /// View for a selection from the file tree. Directories select nothing and give the overview.
    pub fn select(&self, connections: &[Connection], selection: &FileInfo) -> Result<GraphView> {
        let focus = Focus::from_file_info(selection);
        self.build_view(connections, focus.as_ref())
    }

    /// Scans `root` and fetches its connections, joining both collaborator futures.
    pub async fn load<S, C>(&self, scanner: &S, source: &C, root: &Path) -> Result<LoadedRepo>
    where
        S: Scanner,
        C: ConnectionSource,
    {
        let (tree, connections) =
            futures::future::try_join(scanner.scan(root), source.connections(root)).await?;
        tracing::info!(
            root = %root.display(),
            entries = tree.count_entries(),
            connections = connections.len(),
            "repository loaded"
        );
        Ok(LoadedRepo { tree, connections })
    }

    fn algorithm_for(&self, focused: bool) -> Algorithm {
        match (self.config.layout, focused) {
            (LayoutMode::Tree, _) | (LayoutMode::Auto, false) => {
                Algorithm::Tree(self.config.tree.clone())
            }
            (LayoutMode::Force, _) | (LayoutMode::Auto, true) => {
                Algorithm::Force(self.config.force.clone())
            }
        }
    }

    fn apply_layout(&self, graph: &mut RepoGraph, algorithm: &Algorithm) -> Result<()> {
        let input = Graph {
            nodes: graph.nodes.iter().map(|n| Node::new(n.id.as_str())).collect(),
            edges: graph
                .edges
                .iter()
                .map(|e| Edge::new(e.id.as_str(), e.source.as_str(), e.target.as_str()))
                .collect(),
        };
        let result = repoviz_layout::layout(&input, algorithm)?;
        for node in &mut graph.nodes {
            let p = result.position_or_origin(&node.id);
            node.position = Position::new(p.x, p.y);
        }
        Ok(())
    }
}
