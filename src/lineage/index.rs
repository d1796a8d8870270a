use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;

use super::graph::{Device, Edge, GraphMetadata, LineageGraph};

/// Read-only adjacency queries the traversal algorithms are written against.
pub trait Adjacency {
    /// The stored key for `id`, if the node exists.
    fn canonical_id(&self, id: &str) -> Option<&str>;

    /// All node ids in load order.
    fn node_ids(&self) -> impl Iterator<Item = &str>;

    /// Entities `id` claims as predicate (incoming edge sources).
    fn predecessors_of(&self, id: &str) -> &[String];

    /// Entities claiming `id` as predicate (outgoing edge targets).
    fn successors_of(&self, id: &str) -> &[String];

    fn contains(&self, id: &str) -> bool {
        self.canonical_id(id).is_some()
    }
}

/// Forward/backward adjacency over an immutable lineage graph.
///
/// Adjacency lists hold each logical relationship once, in the order the
/// first copy of the edge appeared in the input. Edges with an endpoint that
/// is not a known node stay in the raw edge list but are never traversed.
#[derive(Clone, Debug, Default)]
pub struct GraphIndex {
    metadata: GraphMetadata,
    devices: IndexMap<String, Device>,
    predecessors: HashMap<String, Vec<String>>,
    successors: HashMap<String, Vec<String>>,
    edges: Vec<Edge>,
    link_count: usize,
    orphan_edges: usize,
}

impl GraphIndex {
    pub fn build(nodes: Vec<Device>, edges: Vec<Edge>) -> Self {
        Self::from_graph(LineageGraph {
            metadata: GraphMetadata::default(),
            nodes,
            edges,
        })
    }

    pub fn from_graph(graph: LineageGraph) -> Self {
        let LineageGraph {
            metadata,
            nodes,
            edges,
        } = graph;

        let mut devices = IndexMap::with_capacity(nodes.len());
        let mut duplicate_nodes = 0usize;
        for device in nodes {
            if devices.contains_key(&device.id) {
                duplicate_nodes += 1;
                continue;
            }
            devices.insert(device.id.clone(), device);
        }
        if duplicate_nodes > 0 {
            log::warn!("ignored {duplicate_nodes} node records with an already-seen id");
        }

        let mut predecessors: HashMap<String, Vec<String>> = HashMap::new();
        let mut successors: HashMap<String, Vec<String>> = HashMap::new();
        let mut orphan_edges = 0usize;
        let mut link_count = 0usize;

        {
            let mut seen = HashSet::with_capacity(edges.len());
            for edge in &edges {
                if !devices.contains_key(&edge.source) || !devices.contains_key(&edge.target) {
                    orphan_edges += 1;
                    continue;
                }
                if !seen.insert((edge.source.as_str(), edge.target.as_str())) {
                    continue;
                }

                link_count += 1;
                successors
                    .entry(edge.source.clone())
                    .or_default()
                    .push(edge.target.clone());
                predecessors
                    .entry(edge.target.clone())
                    .or_default()
                    .push(edge.source.clone());
            }
        }

        log::debug!(
            "indexed {} nodes, {} links, {} orphan edges",
            devices.len(),
            link_count,
            orphan_edges
        );

        Self {
            metadata,
            devices,
            predecessors,
            successors,
            edges,
            link_count,
            orphan_edges,
        }
    }

    pub fn metadata(&self) -> &GraphMetadata {
        &self.metadata
    }

    pub fn device(&self, id: &str) -> Option<&Device> {
        self.devices.get(id)
    }

    /// Devices in load order.
    pub fn devices(&self) -> impl Iterator<Item = &Device> {
        self.devices.values()
    }

    pub fn node_count(&self) -> usize {
        self.devices.len()
    }

    /// Every input edge, duplicates and orphans included.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Distinct edges whose endpoints are both known nodes.
    pub fn link_count(&self) -> usize {
        self.link_count
    }

    pub fn orphan_edges(&self) -> usize {
        self.orphan_edges
    }
}

impl Adjacency for GraphIndex {
    fn canonical_id(&self, id: &str) -> Option<&str> {
        self.devices.get_key_value(id).map(|(key, _)| key.as_str())
    }

    fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.devices.keys().map(String::as_str)
    }

    fn predecessors_of(&self, id: &str) -> &[String] {
        self.predecessors.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    fn successors_of(&self, id: &str) -> &[String] {
        self.successors.get(id).map(Vec::as_slice).unwrap_or(&[])
    }
}
