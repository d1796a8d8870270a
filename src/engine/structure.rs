use std::collections::HashMap;

use indexmap::IndexSet;

use crate::lineage::Adjacency;

use super::cycles::{source_seeds, strong_components};
use super::walk::{Direction, Walker};

pub type DepthMap = HashMap<String, usize>;

/// Topological depth of every node.
///
/// Depth spreads along successor links on first visit from a set of
/// depth-0 seeds, so a node reachable over paths of different length reports
/// the shortest. The seeds are the roots (no predecessors) together with the
/// first member, in load order, of every cycle that nothing outside it
/// leads into. Nodes downstream of such a cycle take their depth from it.
///
/// Unbounded in the size of the graph; compute once per load.
pub fn depths<A: Adjacency>(graph: &A) -> DepthMap {
    let components = strong_components(graph);
    let seeds = source_seeds(graph, &components);

    let mut depths = DepthMap::with_capacity(components.iter().map(Vec::len).sum());
    let mut walker = Walker::new(graph, Direction::Successors);
    assign_depths(&mut walker, seeds, &mut depths);

    depths
}

fn assign_depths<'a, A, I>(walker: &mut Walker<'a, A>, seeds: I, depths: &mut DepthMap)
where
    A: Adjacency,
    I: IntoIterator<Item = &'a str>,
{
    for &id in walker.seed(seeds) {
        depths.insert(id.to_owned(), 0);
    }
    while let Some((depth, level)) = walker.step() {
        for &id in level {
            depths.insert(id.to_owned(), depth);
        }
    }
}

/// `id` and everything it transitively claims as predicate.
pub fn path_to_root<'a, A: Adjacency>(graph: &'a A, id: &str) -> IndexSet<&'a str> {
    closure(graph, id, Direction::Predecessors, true)
}

/// Everything that transitively claims `id` as predicate, `id` excluded.
pub fn descendants<'a, A: Adjacency>(graph: &'a A, id: &str) -> IndexSet<&'a str> {
    closure(graph, id, Direction::Successors, false)
}

fn closure<'a, A: Adjacency>(
    graph: &'a A,
    id: &str,
    direction: Direction,
    include_start: bool,
) -> IndexSet<&'a str> {
    let Some(start) = graph.canonical_id(id) else {
        return IndexSet::new();
    };

    let mut members = IndexSet::new();
    if include_start {
        members.insert(start);
    }

    let mut walker = Walker::new(graph, direction);
    walker.seed([start]);
    while let Some((_, level)) = walker.step() {
        members.extend(level.iter().copied());
    }

    members
}
