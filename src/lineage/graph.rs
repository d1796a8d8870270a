use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::util::parse_decision_date;

/// One clearance record.
///
/// `id` is the graph key. It is carried outside the serialized body because
/// the native file layout stores nodes as an `id -> record` map.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    #[serde(skip)]
    pub id: String,
    #[serde(default = "unknown")]
    pub device_name: String,
    #[serde(default = "unknown")]
    pub applicant: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision_date: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub device_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_received: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl Device {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            device_name: unknown(),
            applicant: unknown(),
            ..Default::default()
        }
    }

    /// Parsed decision date, or `None` when absent or malformed.
    pub fn decision_date(&self) -> Option<NaiveDate> {
        self.decision_date.as_deref().and_then(parse_decision_date)
    }
}

fn unknown() -> String {
    "Unknown".to_owned()
}

// Some exports carry the device class as a bare number.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(value)) => Some(value),
        Some(Value::Number(value)) => Some(value.to_string()),
        _ => None,
    })
}

/// `source` is claimed as a predicate of `target`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphMetadata {
    #[serde(default)]
    pub generated_at: String,
    #[serde(default)]
    pub total_nodes: usize,
    #[serde(default)]
    pub total_edges: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nodes_with_predicates: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nodes_without_predicates: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orphan_predicates: Option<usize>,
}

impl GraphMetadata {
    /// Copy of the metadata with the counts replaced; everything else passes through.
    pub fn with_counts(&self, total_nodes: usize, total_edges: usize) -> Self {
        Self {
            total_nodes,
            total_edges,
            ..self.clone()
        }
    }
}

/// The full graph as loaded from disk, before indexing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LineageGraph {
    pub metadata: GraphMetadata,
    pub nodes: Vec<Device>,
    pub edges: Vec<Edge>,
}
