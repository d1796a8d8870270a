use std::fs;
use std::path::Path;

use crate::error::{LineageError, Result};

use super::graph::LineageGraph;
use super::parse::parse_graph;

/// Reads and parses a lineage graph file.
pub fn load_graph(path: &Path) -> Result<LineageGraph> {
    let raw = fs::read_to_string(path).map_err(|source| LineageError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let graph = parse_graph(&raw)?;
    log::info!(
        "loaded {} nodes and {} edges from {}",
        graph.nodes.len(),
        graph.edges.len(),
        path.display()
    );

    Ok(graph)
}
