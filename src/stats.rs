use std::collections::HashSet;

use indexmap::IndexMap;
use serde::Serialize;

use crate::engine::cycle_groups;
use crate::engine::walk::{Direction, Walker};
use crate::lineage::{Adjacency, Device, GraphIndex};

/// Whole-graph structural summary.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GraphStats {
    pub total_nodes: usize,
    pub total_edges: usize,
    pub orphan_edges: usize,
    pub nodes_with_predicates: usize,
    pub root_count: usize,
    pub leaf_count: usize,
    pub component_count: usize,
    pub largest_component: usize,
    pub max_in_degree: usize,
    pub max_out_degree: usize,
    pub avg_degree: f64,
    pub density: f64,
    /// Strongly connected groups that contain a cycle.
    pub cycle_groups: usize,
    pub nodes_in_cycles: usize,
}

impl GraphStats {
    pub fn compute(index: &GraphIndex) -> Self {
        let total_nodes = index.node_count();
        let total_edges = index.link_count();

        let mut root_count = 0usize;
        let mut leaf_count = 0usize;
        let mut max_in_degree = 0usize;
        let mut max_out_degree = 0usize;
        for id in index.node_ids() {
            let in_degree = index.predecessors_of(id).len();
            let out_degree = index.successors_of(id).len();
            if in_degree == 0 {
                root_count += 1;
            }
            if out_degree == 0 {
                leaf_count += 1;
            }
            max_in_degree = max_in_degree.max(in_degree);
            max_out_degree = max_out_degree.max(out_degree);
        }

        let (component_count, largest_component) = weak_components(index);
        let cycles = cycle_groups(index);

        let avg_degree = if total_nodes == 0 {
            0.0
        } else {
            total_edges as f64 / total_nodes as f64
        };
        let density = if total_nodes < 2 {
            0.0
        } else {
            total_edges as f64 / (total_nodes as f64 * (total_nodes - 1) as f64)
        };

        Self {
            total_nodes,
            total_edges,
            orphan_edges: index.orphan_edges(),
            nodes_with_predicates: total_nodes - root_count,
            root_count,
            leaf_count,
            component_count,
            largest_component,
            max_in_degree,
            max_out_degree,
            avg_degree,
            density,
            cycle_groups: cycles.len(),
            nodes_in_cycles: cycles.iter().map(|group| group.members.len()).sum(),
        }
    }
}

fn weak_components<A: Adjacency>(graph: &A) -> (usize, usize) {
    let mut walker = Walker::new(graph, Direction::Undirected);
    let mut count = 0usize;
    let mut largest = 0usize;

    for id in graph.node_ids() {
        if walker.is_visited(id) {
            continue;
        }

        let mut size = walker.seed([id]).len();
        while let Some((_, level)) = walker.step() {
            size += level.len();
        }
        count += 1;
        largest = largest.max(size);
    }

    (count, largest)
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CitedDevice {
    pub id: String,
    pub device_name: String,
    pub applicant: String,
    /// Devices claiming this one as predicate.
    pub citations: usize,
    /// Predicates this device claims.
    pub predicates: usize,
}

/// Devices most often claimed as predicate, ties broken by id.
pub fn most_cited(index: &GraphIndex, limit: usize) -> Vec<CitedDevice> {
    let mut ranked = index
        .devices()
        .map(|device| {
            (
                index.successors_of(&device.id).len(),
                index.predecessors_of(&device.id).len(),
                device,
            )
        })
        .collect::<Vec<_>>();

    ranked.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.2.id.cmp(&b.2.id)));
    ranked.truncate(limit);

    ranked
        .into_iter()
        .map(|(citations, predicates, device)| CitedDevice {
            id: device.id.clone(),
            device_name: device.device_name.clone(),
            applicant: device.applicant.clone(),
            citations,
            predicates,
        })
        .collect()
}

/// Ids of devices that claim no predicate, in load order.
pub fn roots<A: Adjacency>(graph: &A, limit: usize) -> Vec<String> {
    graph
        .node_ids()
        .filter(|id| graph.predecessors_of(id).is_empty())
        .take(limit)
        .map(str::to_owned)
        .collect()
}

/// Per-applicant citation summary. Applicants are compared verbatim.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CompanyMetrics {
    pub name: String,
    pub total_devices: usize,
    /// Devices at least one other device claims as predicate.
    pub devices_as_predicates: usize,
    /// Claims made on this applicant's devices.
    pub total_citations: usize,
    /// Distinct devices this applicant's devices claim as predicate.
    pub unique_predicates_used: usize,
    /// Predicate claims whose predicate belongs to another applicant.
    pub cross_company_claims: usize,
    /// `cross_company_claims` over all predicate claims made.
    pub cross_company_ratio: f64,
}

/// Applicants ranked by `total_citations`, ties in first-appearance order.
pub fn company_metrics(index: &GraphIndex, limit: usize) -> Vec<CompanyMetrics> {
    let mut ranked = devices_by_applicant(index)
        .into_iter()
        .map(|(name, devices)| summarize_company(index, name, &devices))
        .collect::<Vec<_>>();

    ranked.sort_by(|a, b| b.total_citations.cmp(&a.total_citations));
    ranked.truncate(limit);
    ranked
}

fn devices_by_applicant(index: &GraphIndex) -> IndexMap<&str, Vec<&Device>> {
    let mut companies: IndexMap<&str, Vec<&Device>> = IndexMap::new();
    for device in index.devices() {
        companies
            .entry(device.applicant.as_str())
            .or_default()
            .push(device);
    }
    companies
}

fn summarize_company(index: &GraphIndex, name: &str, devices: &[&Device]) -> CompanyMetrics {
    let mut devices_as_predicates = 0usize;
    let mut total_citations = 0usize;
    let mut predicates = HashSet::new();
    let mut claims = 0usize;
    let mut cross_company_claims = 0usize;

    for device in devices {
        let citations = index.successors_of(&device.id).len();
        if citations > 0 {
            devices_as_predicates += 1;
            total_citations += citations;
        }

        for predicate in index.predecessors_of(&device.id) {
            predicates.insert(predicate.as_str());
            claims += 1;
            let same_company = index
                .device(predicate)
                .is_some_and(|other| other.applicant == name);
            if !same_company {
                cross_company_claims += 1;
            }
        }
    }

    let cross_company_ratio = if claims == 0 {
        0.0
    } else {
        cross_company_claims as f64 / claims as f64
    };

    CompanyMetrics {
        name: name.to_owned(),
        total_devices: devices.len(),
        devices_as_predicates,
        total_citations,
        unique_predicates_used: predicates.len(),
        cross_company_claims,
        cross_company_ratio,
    }
}

/// Links between two different applicants, aggregated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CompanyLink {
    /// Applicant of the predicate devices.
    pub source_company: String,
    /// Applicant of the devices claiming them.
    pub target_company: String,
    pub edge_count: usize,
}

/// Applicant-to-applicant links carrying at least `min_edge_count` device
/// links, most frequent first.
pub fn company_network(index: &GraphIndex, min_edge_count: usize) -> Vec<CompanyLink> {
    let mut counts: IndexMap<(&str, &str), usize> = IndexMap::new();
    for device in index.devices() {
        for target in index.successors_of(&device.id) {
            let Some(claimant) = index.device(target) else {
                continue;
            };
            if claimant.applicant != device.applicant {
                *counts
                    .entry((device.applicant.as_str(), claimant.applicant.as_str()))
                    .or_default() += 1;
            }
        }
    }

    let mut links = counts
        .into_iter()
        .filter(|&(_, count)| count >= min_edge_count)
        .map(|((source, target), edge_count)| CompanyLink {
            source_company: source.to_owned(),
            target_company: target.to_owned(),
            edge_count,
        })
        .collect::<Vec<_>>();
    links.sort_by(|a, b| b.edge_count.cmp(&a.edge_count));
    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{chain, cycle, dated, device, edge, star};

    // Two ACME devices built on one OTHER CO device, plus an ACME follow-up.
    fn market() -> GraphIndex {
        GraphIndex::build(
            vec![
                dated("O1", "OTHER CO", None),
                dated("A1", "ACME", None),
                dated("A2", "ACME", None),
                dated("A3", "ACME", None),
                dated("L1", "LONE LLC", None),
            ],
            vec![
                edge("O1", "A1"),
                edge("O1", "A2"),
                edge("A1", "A3"),
                edge("O1", "A3"),
            ],
        )
    }

    #[test]
    fn chain_summary() {
        let stats = GraphStats::compute(&chain());

        assert_eq!(stats.total_nodes, 3);
        assert_eq!(stats.total_edges, 2);
        assert_eq!(stats.root_count, 1);
        assert_eq!(stats.leaf_count, 1);
        assert_eq!(stats.nodes_with_predicates, 2);
        assert_eq!((stats.component_count, stats.largest_component), (1, 3));
        assert!((stats.density - 2.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn components_are_weak() {
        // Two islands: a -> b <- c, and d alone; plus an orphan edge.
        let index = GraphIndex::build(
            vec![device("a"), device("b"), device("c"), device("d")],
            vec![edge("a", "b"), edge("c", "b"), edge("d", "K_GONE")],
        );
        let stats = GraphStats::compute(&index);

        assert_eq!(stats.component_count, 2);
        assert_eq!(stats.largest_component, 3);
        assert_eq!(stats.orphan_edges, 1);
        assert_eq!(stats.max_in_degree, 2);
    }

    #[test]
    fn cycle_has_no_roots() {
        let stats = GraphStats::compute(&cycle());
        assert_eq!(stats.root_count, 0);
        assert_eq!(stats.leaf_count, 0);
        assert_eq!(stats.component_count, 1);
    }

    #[test]
    fn empty_graph_is_all_zero() {
        let stats = GraphStats::compute(&GraphIndex::default());
        assert_eq!(stats.total_nodes, 0);
        assert_eq!(stats.component_count, 0);
        assert_eq!(stats.avg_degree, 0.0);
        assert_eq!(stats.density, 0.0);
    }

    #[test]
    fn most_cited_ranks_by_successors() {
        let index = star();
        let top = most_cited(&index, 2);

        assert_eq!(top.len(), 2);
        assert_eq!(top[0].id, "hub");
        assert_eq!(top[0].citations, 3);
        assert_eq!(top[0].predicates, 3);
        assert_eq!(top[1].id, "p1");
        assert_eq!(top[1].citations, 1);
    }

    #[test]
    fn cycles_are_counted() {
        let stats = GraphStats::compute(&cycle());
        assert_eq!((stats.cycle_groups, stats.nodes_in_cycles), (1, 3));

        let stats = GraphStats::compute(&chain());
        assert_eq!((stats.cycle_groups, stats.nodes_in_cycles), (0, 0));
    }

    #[test]
    fn roots_are_listed_in_load_order() {
        assert_eq!(roots(&star(), 10), ["p1", "p2", "p3"]);
        assert_eq!(roots(&star(), 2), ["p1", "p2"]);
        assert!(roots(&cycle(), 10).is_empty());
    }

    #[test]
    fn company_metrics_split_own_and_foreign_predicates() {
        let metrics = company_metrics(&market(), 10);
        let names = metrics.iter().map(|m| m.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, ["OTHER CO", "ACME", "LONE LLC"]);

        let other = &metrics[0];
        assert_eq!(other.total_devices, 1);
        assert_eq!(other.devices_as_predicates, 1);
        assert_eq!(other.total_citations, 3);
        assert_eq!(other.unique_predicates_used, 0);
        assert_eq!(other.cross_company_ratio, 0.0);

        let acme = &metrics[1];
        assert_eq!(acme.total_devices, 3);
        assert_eq!(acme.devices_as_predicates, 1);
        assert_eq!(acme.total_citations, 1);
        assert_eq!(acme.unique_predicates_used, 2);
        assert_eq!(acme.cross_company_claims, 3);
        assert!((acme.cross_company_ratio - 0.75).abs() < 1e-12);

        assert_eq!(company_metrics(&market(), 1).len(), 1);
    }

    #[test]
    fn company_network_drops_same_company_and_rare_links() {
        let index = market();

        assert_eq!(
            company_network(&index, 1),
            [CompanyLink {
                source_company: "OTHER CO".to_owned(),
                target_company: "ACME".to_owned(),
                edge_count: 3,
            }]
        );
        assert!(company_network(&index, 4).is_empty());
    }
}
