#![forbid(unsafe_code)]

//! Headless layouts for repository graphs.
//!
//! - [`Algorithm::Tree`]: stacks folder contents depth-first, ignoring edges (overview)
//! - [`Algorithm::Force`]: fixed-budget physical simulation (focused subgraph)
//!
//! Both are pure functions of their input: equal graphs and options give equal positions.

pub mod algo;
pub mod error;
pub mod graph;

pub use algo::{Algorithm, ForceLayoutOptions, TreeLayoutOptions};
pub use error::{Error, Result};
pub use graph::{Edge, Graph, LayoutResult, Node, Point};

/// Headless layout entry point.
pub fn layout(graph: &Graph, algorithm: &Algorithm) -> Result<LayoutResult> {
    match algorithm {
        Algorithm::Tree(opts) => algo::tree::layout(graph, opts),
        Algorithm::Force(opts) => algo::force::layout(graph, opts),
    }
}
