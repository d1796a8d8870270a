use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use indexmap::IndexMap;
use serde::Serialize;

use crate::lineage::GraphIndex;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub id: String,
    pub device_name: String,
    pub applicant: String,
    pub score: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OrganizationHit {
    pub name: String,
    pub devices: usize,
    pub score: i64,
}

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

/// Devices whose id, name or applicant fuzzily match `query`, best first.
pub fn search(index: &GraphIndex, query: &str, limit: usize) -> Vec<SearchHit> {
    let query = query.trim();
    if query.is_empty() || limit == 0 {
        return Vec::new();
    }

    let matcher = SkimMatcherV2::default();
    let mut hits = index
        .devices()
        .filter_map(|device| {
            let score = [
                device.id.as_str(),
                device.device_name.as_str(),
                device.applicant.as_str(),
            ]
            .into_iter()
            .filter_map(|field| fuzzy_match_score(&matcher, field, query))
            .max()?;

            Some(SearchHit {
                id: device.id.clone(),
                device_name: device.device_name.clone(),
                applicant: device.applicant.clone(),
                score,
            })
        })
        .collect::<Vec<_>>();

    hits.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.id.cmp(&b.id)));
    hits.truncate(limit);
    hits
}

/// Distinct applicant names fuzzily matching `query`, with their device counts.
pub fn organizations(index: &GraphIndex, query: &str, limit: usize) -> Vec<OrganizationHit> {
    let query = query.trim();
    if query.is_empty() || limit == 0 {
        return Vec::new();
    }

    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for device in index.devices() {
        *counts.entry(device.applicant.as_str()).or_default() += 1;
    }

    let matcher = SkimMatcherV2::default();
    let mut hits = counts
        .into_iter()
        .filter_map(|(name, devices)| {
            fuzzy_match_score(&matcher, name, query).map(|score| OrganizationHit {
                name: name.to_owned(),
                devices,
                score,
            })
        })
        .collect::<Vec<_>>();

    hits.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| b.devices.cmp(&a.devices))
            .then_with(|| a.name.cmp(&b.name))
    });
    hits.truncate(limit);
    hits
}
