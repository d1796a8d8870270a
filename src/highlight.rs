use indexmap::IndexSet;
use serde::Serialize;

use crate::engine::{descendants, path_to_root};
use crate::lineage::{Adjacency, Edge, View};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum HighlightMode {
    Ancestors,
    Descendants,
}

/// Nodes and induced edges to emphasise inside a view; everything else dims.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Highlight {
    pub nodes: Vec<String>,
    pub edges: Vec<Edge>,
}

impl Highlight {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Highlight for `selected`, computed over the view's own edges so that
/// only lineage visible on screen lights up.
pub fn highlight(view: &View, selected: &str, mode: HighlightMode) -> Highlight {
    let local = view.index();
    let Some(selected) = local.canonical_id(selected) else {
        return Highlight::default();
    };

    let members: IndexSet<&str> = match mode {
        HighlightMode::Ancestors => path_to_root(&local, selected),
        HighlightMode::Descendants => {
            let mut members = descendants(&local, selected);
            members.insert(selected);
            members
        }
    };

    let nodes = view
        .node_ids()
        .filter(|id| members.contains(id))
        .map(str::to_owned)
        .collect();
    let edges = view
        .edges
        .iter()
        .filter(|edge| {
            members.contains(edge.source.as_str()) && members.contains(edge.target.as_str())
        })
        .cloned()
        .collect();

    Highlight { nodes, edges }
}
