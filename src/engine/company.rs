use indexmap::IndexSet;

use crate::lineage::{GraphIndex, View};

use super::walk::{Direction, expand_into};

/// View of an organisation's most recent clearances and their antecedents.
///
/// Devices whose applicant equals `org_name` exactly are ordered newest
/// first, undated ones last in load order, and the first `max_devices` are
/// kept. Their predecessors are then added up to `ancestor_depth` levels with
/// no node budget.
pub fn extract_by_organization(
    index: &GraphIndex,
    org_name: &str,
    max_devices: usize,
    ancestor_depth: usize,
) -> View {
    let mut matches = index
        .devices()
        .filter(|device| device.applicant == org_name)
        .map(|device| (device.decision_date(), device.id.as_str()))
        .collect::<Vec<_>>();

    // `None` orders below every date, so a stable descending sort puts
    // undated devices last without reordering them.
    matches.sort_by(|a, b| b.0.cmp(&a.0));
    let total_matches = matches.len();
    matches.truncate(max_devices);

    let seeds = matches.iter().map(|(_, id)| *id).collect::<Vec<_>>();
    let mut included = seeds.iter().copied().collect::<IndexSet<_>>();
    expand_into(
        index,
        &seeds,
        Direction::Predecessors,
        ancestor_depth,
        usize::MAX,
        &mut included,
    );

    let view = View::induced(index, &included);
    log::debug!(
        "organization {org_name:?}: {} of {} devices selected, view has {} nodes and {} edges",
        seeds.len(),
        total_matches,
        view.nodes.len(),
        view.edges.len()
    );
    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{dated, edge};

    fn ids(view: &View) -> Vec<&str> {
        view.node_ids().collect()
    }

    fn portfolio() -> GraphIndex {
        GraphIndex::build(
            vec![
                dated("P1", "OTHER CO", Some("2010-01-01")),
                dated("P2", "OTHER CO", Some("2011-01-01")),
                dated("P0", "OTHER CO", Some("2005-01-01")),
                dated("A1", "ACME", Some("2015-05-05")),
                dated("A2", "ACME", Some("2019-09-09")),
                dated("A3", "ACME", Some("2017-07-07")),
            ],
            vec![
                edge("P1", "A1"),
                edge("P2", "A2"),
                edge("A1", "A3"),
                edge("P0", "P2"),
            ],
        )
    }

    #[test]
    fn newest_devices_and_direct_predecessors() {
        let view = extract_by_organization(&portfolio(), "ACME", 2, 1);

        assert_eq!(ids(&view), ["A2", "A3", "P2", "A1"]);
        assert_eq!(view.edges, [edge("P2", "A2"), edge("A1", "A3")]);
        assert_eq!(view.metadata.total_nodes, 4);
    }

    #[test]
    fn deeper_ancestry_follows_predecessor_links() {
        let view = extract_by_organization(&portfolio(), "ACME", 2, 2);
        assert_eq!(ids(&view), ["A2", "A3", "P2", "A1", "P0", "P1"]);
    }

    #[test]
    fn zero_depth_lists_only_the_selection() {
        let view = extract_by_organization(&portfolio(), "ACME", 10, 0);
        assert_eq!(ids(&view), ["A2", "A3", "A1"]);
        assert_eq!(view.edges, [edge("A1", "A3")]);
    }

    #[test]
    fn undated_devices_sort_last_in_load_order() {
        let index = GraphIndex::build(
            vec![
                dated("U1", "ACME", None),
                dated("D1", "ACME", Some("2001-01-01")),
                dated("U2", "ACME", Some("garbled")),
                dated("D2", "ACME", Some("2003-01-01")),
            ],
            Vec::new(),
        );

        let view = extract_by_organization(&index, "ACME", 10, 0);
        assert_eq!(ids(&view), ["D2", "D1", "U1", "U2"]);
    }

    #[test]
    fn match_is_exact() {
        let view = extract_by_organization(&portfolio(), "acme", 10, 1);
        assert!(view.is_empty());
        assert!(view.edges.is_empty());
    }
}
