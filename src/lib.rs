//! Bounded views over a regulatory predicate lineage graph.
//!
//! A [`GraphIndex`] is built once from the loaded node/edge collection and
//! never mutated. Every query in [`engine`] is a pure function over it.

pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod highlight;
pub mod layout;
pub mod lineage;
pub mod search;
pub mod stats;
mod util;

#[cfg(test)]
mod testing;

pub use config::{Config, Limits};
pub use engine::{
    CycleGroup, DepthMap, cycle_groups, depths, descendants, extract, extract_by_organization,
    path_to_root, strong_components,
};
pub use error::{LineageError, Result};
pub use highlight::{Highlight, HighlightMode, highlight};
pub use layout::{Projection, project};
pub use lineage::{Adjacency, Device, Edge, GraphIndex, GraphMetadata, LineageGraph, View};
