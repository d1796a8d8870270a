use indexmap::IndexSet;

use crate::lineage::{Adjacency, GraphIndex, View};

use super::walk::{Direction, expand_into};

/// Bounded neighbourhood of `focal_id`.
///
/// Walks up to `ancestor_depth` levels of predecessors, then up to
/// `descendant_depth` levels of successors. Both walks share one node budget
/// of `max_nodes`, which always admits the focal node itself. Unknown ids
/// give an empty view.
pub fn extract(
    index: &GraphIndex,
    focal_id: &str,
    ancestor_depth: usize,
    descendant_depth: usize,
    max_nodes: usize,
) -> View {
    let Some(focal) = index.canonical_id(focal_id) else {
        log::debug!("focal node {focal_id} not found");
        return View::empty(index.metadata());
    };

    let budget = max_nodes.max(1);
    let mut included = IndexSet::from([focal]);

    let mut truncated = expand_into(
        index,
        &[focal],
        Direction::Predecessors,
        ancestor_depth,
        budget,
        &mut included,
    );
    if !truncated {
        truncated = expand_into(
            index,
            &[focal],
            Direction::Successors,
            descendant_depth,
            budget,
            &mut included,
        );
    }
    if truncated {
        log::debug!("view around {focal} stopped at the {budget}-node budget");
    }

    let view = View::induced(index, &included);
    log::debug!(
        "view around {focal}: {} nodes, {} edges",
        view.nodes.len(),
        view.edges.len()
    );
    view
}
