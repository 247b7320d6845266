#![forbid(unsafe_code)]

//! Repository graph synthesis (headless).
//!
//! Turns a scanned file tree and a flat list of file-to-file connections into a classified
//! node/edge graph ready for layout:
//! - [`filter`] narrows connections to a focal file's neighborhood
//! - [`synth`] builds file nodes, inferred folder nodes and one edge per connection
//! - [`classify`] flags orphaned and selected nodes, which drives the [`style`] payloads
//!
//! Layout lives in `repoviz-layout`; the `repoviz` crate wires the whole pipeline together.

pub mod classify;
pub mod collab;
pub mod error;
pub mod filter;
pub mod model;
pub mod paths;
pub mod scan;
pub mod style;
pub mod synth;

pub use classify::Classifier;
pub use collab::{ConnectionSource, DirectoryPicker, FixedDirectory, JsonConnections, Scanner};
pub use error::{Error, Result};
pub use filter::{Focus, Scoped};
pub use model::{
    Connection, ConnectionKind, FileInfo, GraphEdge, GraphIdentity, GraphNode, NodeKind,
    OrphanRole, Position, RepoGraph, SynthesisStats,
};
pub use scan::FsScanner;
pub use style::Palette;
pub use synth::synthesize;
