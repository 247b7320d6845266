#![forbid(unsafe_code)]

//! `repoviz` turns a repository's file tree and connection list into a positioned graph.
//!
//! The pipeline is filter → synthesize → classify → layout:
//! - without a focal file the whole graph is laid out as a folder tree
//! - with a focal file only its neighborhood is kept and laid out by a force simulation
//!
//! The crate re-exports `repoviz-core`; layouts are available under [`layout`].

pub use repoviz_core::*;
pub use repoviz_layout as layout;

mod config;
mod engine;
pub mod error;
mod session;

pub use config::{EngineConfig, LayoutMode};
pub use engine::{Engine, GraphView, LoadedRepo};
pub use error::{Error, Result};
pub use session::Session;
