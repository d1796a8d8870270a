use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{LineageError, Result};

use super::graph::{Device, Edge, GraphMetadata, LineageGraph};

#[derive(Deserialize)]
struct NativeGraph {
    #[serde(default)]
    metadata: GraphMetadata,
    nodes: IndexMap<String, Device>,
    #[serde(default)]
    edges: Vec<Edge>,
}

#[derive(Deserialize)]
struct CytoscapeGraph {
    #[serde(default)]
    metadata: GraphMetadata,
    elements: CytoscapeElements,
}

#[derive(Deserialize)]
struct CytoscapeElements {
    #[serde(default)]
    nodes: Vec<CytoscapeNode>,
    #[serde(default)]
    edges: Vec<CytoscapeEdge>,
}

#[derive(Deserialize)]
struct CytoscapeNode {
    data: CytoscapeNodeData,
}

#[derive(Deserialize)]
struct CytoscapeNodeData {
    id: String,
    #[serde(flatten)]
    device: Device,
}

#[derive(Deserialize)]
struct CytoscapeEdge {
    data: Edge,
}

/// Parses either the native `{metadata, nodes: {id: node}, edges}` layout or
/// the Cytoscape `{metadata, elements: {nodes, edges}}` layout.
pub fn parse_graph(raw: &str) -> Result<LineageGraph> {
    let parsed: Value = serde_json::from_str(raw)?;
    let object = parsed
        .as_object()
        .ok_or_else(|| LineageError::UnrecognizedLayout("top-level value is not an object".into()))?;

    if object.contains_key("elements") {
        let graph = CytoscapeGraph::deserialize(parsed)?;
        let nodes = graph
            .elements
            .nodes
            .into_iter()
            .map(|node| Device {
                id: node.data.id,
                ..node.data.device
            })
            .collect();
        let edges = graph
            .elements
            .edges
            .into_iter()
            .map(|edge| edge.data)
            .collect();

        return Ok(LineageGraph {
            metadata: graph.metadata,
            nodes,
            edges,
        });
    }

    if object.contains_key("nodes") {
        let graph = NativeGraph::deserialize(parsed)?;
        let nodes = graph
            .nodes
            .into_iter()
            .map(|(id, device)| Device { id, ..device })
            .collect();

        return Ok(LineageGraph {
            metadata: graph.metadata,
            nodes,
            edges: graph.edges,
        });
    }

    Err(LineageError::UnrecognizedLayout(
        "expected a `nodes` map or an `elements` object".into(),
    ))
}
