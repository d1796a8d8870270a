use std::collections::HashSet;

use indexmap::IndexSet;

use crate::lineage::Adjacency;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Toward the antecedents a node cites.
    Predecessors,
    /// Toward the newer nodes citing it.
    Successors,
    /// Both ways, for weak connectivity.
    Undirected,
}

impl Direction {
    fn links<'a, A: Adjacency>(self, graph: &'a A, id: &str) -> impl Iterator<Item = &'a String> {
        let (first, second): (&'a [String], &'a [String]) = match self {
            Self::Predecessors => (graph.predecessors_of(id), &[]),
            Self::Successors => (graph.successors_of(id), &[]),
            Self::Undirected => (graph.predecessors_of(id), graph.successors_of(id)),
        };
        first.iter().chain(second)
    }
}

/// Level-by-level breadth-first walk with a visited set.
///
/// A node enters the walk at most once, so cycles shrink the frontier to
/// nothing instead of looping. Within a level, nodes are reached in frontier
/// order and then adjacency order, which keeps every walk reproducible.
pub struct Walker<'a, A> {
    graph: &'a A,
    direction: Direction,
    visited: HashSet<&'a str>,
    frontier: Vec<&'a str>,
    depth: usize,
}

impl<'a, A: Adjacency> Walker<'a, A> {
    pub fn new(graph: &'a A, direction: Direction) -> Self {
        Self {
            graph,
            direction,
            visited: HashSet::new(),
            frontier: Vec::new(),
            depth: 0,
        }
    }

    /// Restarts the walk at depth 0 from the seeds not yet visited, which are returned.
    pub fn seed<I>(&mut self, seeds: I) -> &[&'a str]
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.frontier.clear();
        self.depth = 0;
        for id in seeds {
            if self.visited.insert(id) {
                self.frontier.push(id);
            }
        }
        &self.frontier
    }

    /// Expands to the next level, returning its depth and newly reached nodes.
    pub fn step(&mut self) -> Option<(usize, &[&'a str])> {
        let graph = self.graph;
        let mut next = Vec::new();
        for &id in &self.frontier {
            for link in self.direction.links(graph, id) {
                let link = link.as_str();
                if self.visited.insert(link) {
                    next.push(link);
                }
            }
        }

        self.frontier = next;
        if self.frontier.is_empty() {
            return None;
        }

        self.depth += 1;
        Some((self.depth, &self.frontier))
    }

    pub fn is_visited(&self, id: &str) -> bool {
        self.visited.contains(id)
    }
}

/// Walks up to `max_depth` levels from `seeds`, adding reached nodes to
/// `included` until it holds `budget` nodes.
///
/// Nodes already in `included` are walked through but not re-counted.
/// Returns `true` when the budget cut the expansion short.
pub fn expand_into<'a, A: Adjacency>(
    graph: &'a A,
    seeds: &[&'a str],
    direction: Direction,
    max_depth: usize,
    budget: usize,
    included: &mut IndexSet<&'a str>,
) -> bool {
    let mut walker = Walker::new(graph, direction);
    walker.seed(seeds.iter().copied());

    for _ in 0..max_depth {
        let Some((_, level)) = walker.step() else {
            break;
        };

        for &id in level {
            if included.contains(id) {
                continue;
            }
            if included.len() >= budget {
                return true;
            }
            included.insert(id);
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    // Minimal adjacency, independent of `GraphIndex`.
    #[derive(Default)]
    struct Links {
        ids: Vec<String>,
        forward: HashMap<String, Vec<String>>,
        backward: HashMap<String, Vec<String>>,
    }

    impl Links {
        fn from_pairs(pairs: &[(&str, &str)]) -> Self {
            let mut links = Self::default();
            for &(source, target) in pairs {
                for id in [source, target] {
                    if !links.ids.iter().any(|known| known == id) {
                        links.ids.push(id.to_owned());
                    }
                }
                links
                    .forward
                    .entry(source.to_owned())
                    .or_default()
                    .push(target.to_owned());
                links
                    .backward
                    .entry(target.to_owned())
                    .or_default()
                    .push(source.to_owned());
            }
            links
        }
    }

    impl Adjacency for Links {
        fn canonical_id(&self, id: &str) -> Option<&str> {
            self.ids.iter().find(|known| *known == id).map(String::as_str)
        }

        fn node_ids(&self) -> impl Iterator<Item = &str> {
            self.ids.iter().map(String::as_str)
        }

        fn predecessors_of(&self, id: &str) -> &[String] {
            self.backward.get(id).map(Vec::as_slice).unwrap_or(&[])
        }

        fn successors_of(&self, id: &str) -> &[String] {
            self.forward.get(id).map(Vec::as_slice).unwrap_or(&[])
        }
    }

    fn levels(walker: &mut Walker<'_, Links>) -> Vec<(usize, Vec<String>)> {
        let mut out = Vec::new();
        while let Some((depth, level)) = walker.step() {
            out.push((depth, level.iter().map(|id| id.to_string()).collect()));
        }
        out
    }

    #[test]
    fn walks_level_by_level_in_adjacency_order() {
        let links = Links::from_pairs(&[("a", "c"), ("a", "b"), ("b", "d"), ("c", "d")]);
        let mut walker = Walker::new(&links, Direction::Successors);
        walker.seed(["a"]);

        assert_eq!(
            levels(&mut walker),
            [
                (1, vec!["c".to_owned(), "b".to_owned()]),
                (2, vec!["d".to_owned()]),
            ]
        );
    }

    #[test]
    fn cycles_terminate() {
        let links = Links::from_pairs(&[("a", "b"), ("b", "c"), ("c", "a")]);
        let mut walker = Walker::new(&links, Direction::Successors);
        walker.seed(["a"]);

        let reached = levels(&mut walker);
        assert_eq!(reached.len(), 2);
        assert!(walker.is_visited("c"));
    }

    #[test]
    fn reseeding_skips_visited_nodes() {
        let links = Links::from_pairs(&[("a", "b"), ("c", "b")]);
        let mut walker = Walker::new(&links, Direction::Undirected);
        walker.seed(["a"]);
        levels(&mut walker);

        assert!(walker.seed(["c", "x"]).iter().eq(["x"].iter()));
    }

    #[test]
    fn expansion_respects_depth_and_budget() {
        let links = Links::from_pairs(&[("r", "a"), ("r", "b"), ("a", "c"), ("b", "d")]);

        let mut included = IndexSet::from(["r"]);
        let truncated = expand_into(&links, &["r"], Direction::Successors, 1, 10, &mut included);
        assert!(!truncated);
        assert_eq!(included.iter().copied().collect::<Vec<_>>(), ["r", "a", "b"]);

        let mut included = IndexSet::from(["r"]);
        let truncated = expand_into(&links, &["r"], Direction::Successors, 5, 2, &mut included);
        assert!(truncated);
        assert_eq!(included.iter().copied().collect::<Vec<_>>(), ["r", "a"]);
    }
}
