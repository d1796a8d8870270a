use indexmap::IndexSet;

use super::graph::{Device, Edge, GraphMetadata};
use super::index::{Adjacency, GraphIndex};

/// A bounded node/edge subset of the full graph.
///
/// Edges are exactly the links with both endpoints among `nodes`, each
/// logical relationship listed once. They are grouped by source in node
/// order, then follow first-seen input order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct View {
    pub metadata: GraphMetadata,
    pub nodes: Vec<Device>,
    pub edges: Vec<Edge>,
}

impl View {
    pub fn empty(metadata: &GraphMetadata) -> Self {
        Self {
            metadata: metadata.with_counts(0, 0),
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Materializes the view induced by `included`, keeping its order.
    pub fn induced(index: &GraphIndex, included: &IndexSet<&str>) -> Self {
        let nodes = included
            .iter()
            .filter_map(|id| index.device(id))
            .cloned()
            .collect::<Vec<_>>();

        // Only the included nodes' adjacency is read.
        let edges = included
            .iter()
            .flat_map(|&source| {
                index
                    .successors_of(source)
                    .iter()
                    .filter(|target| included.contains(target.as_str()))
                    .map(move |target| Edge::new(source, target.as_str()))
            })
            .collect::<Vec<_>>();

        Self {
            metadata: index.metadata().with_counts(nodes.len(), edges.len()),
            nodes,
            edges,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|device| device.id.as_str())
    }

    /// Index over just this view, for queries restricted to what is displayed.
    pub fn index(&self) -> GraphIndex {
        GraphIndex::build(self.nodes.clone(), self.edges.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lineage::Adjacency;
    use crate::testing::{device, edge};

    #[test]
    fn induced_view_drops_edges_leaving_the_subset() {
        let index = GraphIndex::build(
            vec![device("A"), device("B"), device("C")],
            vec![edge("A", "B"), edge("B", "C"), edge("A", "B"), edge("C", "K_GONE")],
        );
        let included = IndexSet::from(["B", "A"]);

        let view = View::induced(&index, &included);

        assert_eq!(view.node_ids().collect::<Vec<_>>(), ["B", "A"]);
        assert_eq!(view.edges, [edge("A", "B")]);
        assert_eq!(view.metadata.total_nodes, 2);
        assert_eq!(view.metadata.total_edges, 1);
    }

    #[test]
    fn edges_follow_node_order_then_adjacency_order() {
        let index = GraphIndex::build(
            vec![device("A"), device("B"), device("C")],
            vec![edge("A", "C"), edge("B", "C"), edge("A", "B")],
        );
        let included = IndexSet::from(["B", "A", "C"]);

        let view = View::induced(&index, &included);

        assert_eq!(view.edges, [edge("B", "C"), edge("A", "C"), edge("A", "B")]);
    }

    #[test]
    fn empty_view_zeroes_counts() {
        let metadata = GraphMetadata {
            generated_at: "then".to_owned(),
            total_nodes: 4,
            total_edges: 9,
            ..Default::default()
        };
        let view = View::empty(&metadata);
        assert!(view.is_empty());
        assert_eq!(view.metadata.generated_at, "then");
        assert_eq!((view.metadata.total_nodes, view.metadata.total_edges), (0, 0));
    }

    #[test]
    fn view_index_only_sees_view_edges() {
        let index = GraphIndex::build(
            vec![device("A"), device("B"), device("C")],
            vec![edge("A", "B"), edge("B", "C")],
        );
        let view = View::induced(&index, &IndexSet::from(["A", "B"]));
        let local = view.index();

        assert_eq!(local.successors_of("A"), ["B"]);
        assert!(local.successors_of("B").is_empty());
        assert!(!local.contains("C"));
    }
}
