//! Selection-scoped filtering around a focal file.

use crate::model::{Connection, FileInfo};
use crate::paths;
use rustc_hash::FxHashSet;

/// The file a focused view is centred on. The path is stored normalized.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Focus {
    path: String,
}

impl Focus {
    pub fn new(path: &str) -> Self {
        Self {
            path: paths::normalize(path),
        }
    }

    /// Directory selections do not focus anything and yield `None`.
    pub fn from_file_info(info: &FileInfo) -> Option<Self> {
        (!info.is_dir).then(|| Self::new(&info.path))
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Connection set after applying an optional focus.
#[derive(Debug, Clone, PartialEq)]
pub enum Scoped<'a> {
    /// No focus: the full list, untouched.
    Full(&'a [Connection]),
    /// The focus' neighborhood; never empty.
    Focused {
        focus: Focus,
        connections: Vec<Connection>,
    },
    /// A focus was given but no connection touches its neighborhood.
    NoConnectionsForFocus { focus: Focus },
}

impl Scoped<'_> {
    pub fn connections(&self) -> &[Connection] {
        match self {
            Scoped::Full(all) => all,
            Scoped::Focused { connections, .. } => connections,
            Scoped::NoConnectionsForFocus { .. } => &[],
        }
    }

    pub fn focus(&self) -> Option<&Focus> {
        match self {
            Scoped::Full(_) => None,
            Scoped::Focused { focus, .. } | Scoped::NoConnectionsForFocus { focus } => Some(focus),
        }
    }
}

pub fn scope<'a>(connections: &'a [Connection], focus: Option<&Focus>) -> Scoped<'a> {
    let Some(focus) = focus else {
        return Scoped::Full(connections);
    };
    let kept = filter_connections(connections, focus);
    tracing::debug!(
        focus = focus.path(),
        kept = kept.len(),
        total = connections.len(),
        "scoped connections to focus"
    );
    if kept.is_empty() {
        Scoped::NoConnectionsForFocus {
            focus: focus.clone(),
        }
    } else {
        Scoped::Focused {
            focus: focus.clone(),
            connections: kept,
        }
    }
}

/// The focal path plus every path directly connected to it, in either direction.
pub fn related_paths(connections: &[Connection], focus: &Focus) -> FxHashSet<String> {
    let mut related = FxHashSet::default();
    related.insert(focus.path().to_string());
    for conn in connections {
        let Some((from, to)) = conn.endpoints() else {
            continue;
        };
        if from == focus.path() {
            related.insert(to);
        } else if to == focus.path() {
            related.insert(from);
        }
    }
    related
}

/// Connections whose endpoints are both related to the focus.
///
/// Edges between two neighbors of the focus are kept even when they do not pass through it, so
/// the result shows the focus' local cluster rather than a strict star.
pub fn filter_connections(connections: &[Connection], focus: &Focus) -> Vec<Connection> {
    let related = related_paths(connections, focus);
    connections
        .iter()
        .filter(|conn| {
            conn.endpoints()
                .is_some_and(|(from, to)| related.contains(&from) && related.contains(&to))
        })
        .cloned()
        .collect()
}
