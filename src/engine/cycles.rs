use std::collections::{HashMap, HashSet, VecDeque};

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;

use crate::lineage::Adjacency;

/// Strongly connected components of the link graph.
///
/// Members are listed in load order and components are ordered by their
/// first member, so the result does not depend on how Tarjan's algorithm
/// happens to visit the graph.
pub fn strong_components<A: Adjacency>(graph: &A) -> Vec<Vec<&str>> {
    let ids = graph.node_ids().collect::<Vec<_>>();
    let position = ids
        .iter()
        .enumerate()
        .map(|(i, id)| (*id, NodeIndex::new(i)))
        .collect::<HashMap<_, _>>();

    let mut digraph = DiGraph::<(), ()>::with_capacity(ids.len(), ids.len());
    for _ in &ids {
        digraph.add_node(());
    }
    for (i, id) in ids.iter().enumerate() {
        for next in graph.successors_of(id) {
            if let Some(&target) = position.get(next.as_str()) {
                digraph.add_edge(NodeIndex::new(i), target, ());
            }
        }
    }

    let mut components = tarjan_scc(&digraph);
    for members in &mut components {
        members.sort_unstable();
    }
    components.sort_unstable_by_key(|members| members.first().copied());

    components
        .into_iter()
        .map(|members| members.into_iter().map(|node| ids[node.index()]).collect())
        .collect()
}

/// First member of every component that no link enters from outside.
///
/// Roots are the single-node case. Every node is reachable from at least one
/// of these seeds.
pub fn source_seeds<'a, A: Adjacency>(graph: &A, components: &[Vec<&'a str>]) -> Vec<&'a str> {
    components
        .iter()
        .filter(|members| {
            let inside = members.iter().copied().collect::<HashSet<_>>();
            members.iter().all(|id| {
                graph
                    .predecessors_of(id)
                    .iter()
                    .all(|pred| inside.contains(pred.as_str()))
            })
        })
        .filter_map(|members| members.first().copied())
        .collect()
}

/// A set of devices that claim each other as predicate, directly or not.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CycleGroup {
    /// Members in load order.
    pub members: Vec<String>,
    /// One shortest cycle through the first member, ending where it starts.
    pub cycle: Vec<String>,
}

/// Every strongly connected component that contains a cycle, self-loops
/// included.
pub fn cycle_groups<A: Adjacency>(graph: &A) -> Vec<CycleGroup> {
    strong_components(graph)
        .into_iter()
        .filter(|members| {
            members.len() > 1
                || members
                    .first()
                    .is_some_and(|&id| graph.successors_of(id).iter().any(|next| next == id))
        })
        .filter_map(|members| {
            let start = *members.first()?;
            let inside = members.iter().copied().collect::<HashSet<_>>();
            let cycle = shortest_cycle(graph, start, &inside).unwrap_or_default();
            Some(CycleGroup {
                members: members.iter().map(|id| (*id).to_owned()).collect(),
                cycle,
            })
        })
        .collect()
}

fn shortest_cycle<A: Adjacency>(
    graph: &A,
    start: &str,
    inside: &HashSet<&str>,
) -> Option<Vec<String>> {
    let mut queue = VecDeque::from([start]);
    let mut visited = HashSet::from([start]);
    let mut parent: HashMap<&str, &str> = HashMap::new();

    while let Some(current) = queue.pop_front() {
        for next in graph.successors_of(current) {
            let next = next.as_str();
            if next == start {
                let mut path = vec![start.to_owned()];
                let mut cursor = current;
                while cursor != start {
                    path.push(cursor.to_owned());
                    cursor = parent.get(cursor).copied()?;
                }
                path.push(start.to_owned());
                path.reverse();
                return Some(path);
            }

            if inside.contains(next) && visited.insert(next) {
                parent.insert(next, current);
                queue.push_back(next);
            }
        }
    }

    None
}
