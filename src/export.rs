use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::error::Result;
use crate::lineage::{Device, Edge, GraphMetadata, View};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// `{metadata, nodes: {id: node}, edges}`
    #[default]
    Native,
    /// `{metadata, elements: {nodes: [{data}], edges: [{data}]}}`
    Cytoscape,
}

#[derive(Serialize)]
struct NativeView<'a> {
    metadata: &'a GraphMetadata,
    nodes: IndexMap<&'a str, &'a Device>,
    edges: &'a [Edge],
}

#[derive(Serialize)]
struct CytoscapeView<'a> {
    metadata: &'a GraphMetadata,
    elements: CytoscapeElements<'a>,
}

#[derive(Serialize)]
struct CytoscapeElements<'a> {
    nodes: Vec<Element<CytoscapeNode<'a>>>,
    edges: Vec<Element<CytoscapeEdge<'a>>>,
}

#[derive(Serialize)]
struct Element<T> {
    data: T,
}

#[derive(Serialize)]
struct CytoscapeNode<'a> {
    id: &'a str,
    #[serde(flatten)]
    device: &'a Device,
}

#[derive(Serialize)]
struct CytoscapeEdge<'a> {
    id: String,
    source: &'a str,
    target: &'a str,
    relationship: &'static str,
}

/// Serializes a view in the requested layout.
pub fn view_to_value(view: &View, format: OutputFormat) -> Result<Value> {
    let value = match format {
        OutputFormat::Native => serde_json::to_value(NativeView {
            metadata: &view.metadata,
            nodes: view
                .nodes
                .iter()
                .map(|device| (device.id.as_str(), device))
                .collect(),
            edges: &view.edges,
        })?,
        OutputFormat::Cytoscape => serde_json::to_value(CytoscapeView {
            metadata: &view.metadata,
            elements: CytoscapeElements {
                nodes: view
                    .nodes
                    .iter()
                    .map(|device| Element {
                        data: CytoscapeNode {
                            id: &device.id,
                            device,
                        },
                    })
                    .collect(),
                edges: view
                    .edges
                    .iter()
                    .enumerate()
                    .map(|(index, edge)| Element {
                        data: CytoscapeEdge {
                            id: format!("e{index}"),
                            source: &edge.source,
                            target: &edge.target,
                            relationship: "predicate",
                        },
                    })
                    .collect(),
            },
        })?,
    };

    Ok(value)
}
