use crate::engine::{Engine, GraphView};
use crate::error::Result;
use repoviz_core::{Connection, Focus, GraphIdentity, Position};
use rustc_hash::FxHashMap;

/// Keeps the last view between updates.
///
/// Positions moved by the user survive a recomputation as long as the node and edge sets are
/// unchanged; any change to either set discards them and the fresh layout wins.
#[derive(Debug, Clone, Default)]
pub struct Session {
    engine: Engine,
    current: Option<GraphView>,
    identity: Option<GraphIdentity>,
    pinned: FxHashMap<String, Position>,
}

impl Session {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine,
            ..Self::default()
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn view(&self) -> Option<&GraphView> {
        self.current.as_ref()
    }

    pub fn update(&mut self, connections: &[Connection], focus: Option<&Focus>) -> Result<&GraphView> {
        let mut view = self.engine.build_view(connections, focus)?;
        let identity = view.graph().map(|g| g.identity());

        if identity.is_some() && identity == self.identity {
            if let Some(graph) = view.graph_mut() {
                for node in &mut graph.nodes {
                    if let Some(pos) = self.pinned.get(&node.id) {
                        node.position = *pos;
                    }
                }
            }
            tracing::debug!(pinned = self.pinned.len(), "graph unchanged, kept moved nodes");
        } else {
            self.pinned.clear();
        }

        self.identity = identity;
        Ok(&*self.current.insert(view))
    }

    /// Moves a node of the current view. Returns `false` if there is no such node.
    pub fn move_node(&mut self, id: &str, position: Position) -> bool {
        let Some(node) = self
            .current
            .as_mut()
            .and_then(GraphView::graph_mut)
            .and_then(|g| g.node_mut(id))
        else {
            return false;
        };
        node.position = position;
        self.pinned.insert(id.to_string(), position);
        true
    }
}
