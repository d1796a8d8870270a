//! Shared graph fixtures for unit tests.

use crate::lineage::{Device, Edge, GraphIndex};

pub fn device(id: &str) -> Device {
    Device::new(id)
}

pub fn dated(id: &str, applicant: &str, decision_date: Option<&str>) -> Device {
    Device {
        applicant: applicant.to_owned(),
        decision_date: decision_date.map(str::to_owned),
        ..Device::new(id)
    }
}

pub fn edge(source: &str, target: &str) -> Edge {
    Edge::new(source, target)
}

/// K100001 -> K100002 -> K100003, one year apart.
pub fn chain() -> GraphIndex {
    GraphIndex::build(
        vec![
            dated("K100001", "ACME", Some("2018-01-01")),
            dated("K100002", "ACME", Some("2019-01-01")),
            dated("K100003", "ACME", Some("2020-01-01")),
        ],
        vec![edge("K100001", "K100002"), edge("K100002", "K100003")],
    )
}

/// A -> B -> C -> A
pub fn cycle() -> GraphIndex {
    GraphIndex::build(
        vec![device("A"), device("B"), device("C")],
        vec![edge("A", "B"), edge("B", "C"), edge("C", "A")],
    )
}

/// p1, p2, p3 -> hub -> c1, c2, c3
pub fn star() -> GraphIndex {
    GraphIndex::build(
        ["hub", "p1", "p2", "p3", "c1", "c2", "c3"]
            .into_iter()
            .map(device)
            .collect(),
        vec![
            edge("p1", "hub"),
            edge("p2", "hub"),
            edge("p3", "hub"),
            edge("hub", "c1"),
            edge("hub", "c2"),
            edge("hub", "c3"),
        ],
    )
}
