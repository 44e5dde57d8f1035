// src/analyzer/aggregate.rs
// =============================================================================
// This module merges probe outcomes back onto the full resource list and
// computes the page-level statistics.
//
// Responsibilities:
// - Preserve discovery order (the dispatcher finishes in arbitrary order)
// - Mark duplicates: every result whose resolved URL was already seen
//   earlier points back at the first occurrence's id
// - Compute counts (broken, slow, duplicates, unnecessary) and the average
//   response time over successful probes
// - Derive the fixed list of human-readable recommendations
//
// Rust concepts:
// - HashMap entry API: "insert if absent, otherwise read" in one lookup
// - Iterator chains: filter/count/sum over the result list
// =============================================================================

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use super::config::AnalyzerConfig;
use super::model::{
    AnalysisSummary, Classification, PageAnalysis, ProbeOutcome, ResourceReference, ResourceResult,
};
use super::resolve;

// A reference after resolution and classification, before probe merging
//
// This is the shape the pipeline hands to the aggregator: everything is
// decided except the network outcome and the duplicate marking.
#[derive(Debug, Clone)]
pub struct PendingResource {
    pub reference: ResourceReference,
    pub resolved_url: Option<String>,
    pub classification: Classification,
}

// Produces the final analysis from the classified references and the
// dispatcher's outcomes
//
// Parameters:
//   pending: all references in discovery order, already classified
//   probes: probe outcomes keyed by resolved URL
//   config: for the slow threshold
//
// The output list has exactly the same length and order as `pending`.
pub fn aggregate(
    pending: Vec<PendingResource>,
    probes: &HashMap<String, ProbeOutcome>,
    config: &AnalyzerConfig,
) -> PageAnalysis {
    // First id seen for each resolved URL, filled as we walk in order
    let mut first_seen: HashMap<String, usize> = HashMap::new();

    let mut resources = Vec::with_capacity(pending.len());
    for item in pending {
        // Only checked items carry a probe outcome; a duplicate of a
        // checked URL shares the same outcome via the shared key
        let probe = match item.classification {
            Classification::Checked => item
                .resolved_url
                .as_deref()
                .and_then(|url| probes.get(url))
                .cloned(),
            _ => None,
        };

        // Duplicate marking: anything with a resolved URL participates,
        // whether it was probed or capped out
        let duplicate_of = item.resolved_url.as_deref().and_then(|url| {
            match first_seen.entry(url.to_string()) {
                Entry::Occupied(entry) => Some(*entry.get()),
                Entry::Vacant(entry) => {
                    entry.insert(item.reference.id);
                    None
                }
            }
        });

        resources.push(ResourceResult {
            reference: item.reference,
            resolved_url: item.resolved_url,
            classification: item.classification,
            probe,
            duplicate_of,
        });
    }

    let summary = summarize(&resources, config);
    let recommendations = recommend(&summary);

    PageAnalysis {
        resources,
        summary,
        recommendations,
    }
}

// Computes the page-level counts and the average response time
fn summarize(resources: &[ResourceResult], config: &AnalyzerConfig) -> AnalysisSummary {
    let checked = resources
        .iter()
        .filter(|r| r.classification == Classification::Checked)
        .count();

    let broken = resources.iter().filter(|r| r.is_broken()).count();

    let slow = resources
        .iter()
        .filter_map(|r| r.probe.as_ref())
        .filter(|p| p.time_ms > config.slow_threshold_ms)
        .count();

    let duplicates = resources.iter().filter(|r| r.duplicate_of.is_some()).count();

    let unnecessary = resources
        .iter()
        .filter(|r| {
            r.classification == Classification::Skipped
                && resolve::is_unnecessary(&r.reference.raw_value)
        })
        .count();

    // Average over *successful* probes only. If nothing succeeded there is
    // no average - reporting 0ms would claim a measurement we never made.
    let successful: Vec<u64> = resources
        .iter()
        .filter_map(|r| r.probe.as_ref())
        .filter(|p| p.succeeded)
        .map(|p| p.time_ms)
        .collect();

    let average_response_ms = if successful.is_empty() {
        None
    } else {
        let sum: u64 = successful.iter().sum();
        Some((sum as f64 / successful.len() as f64).round() as u64)
    };

    AnalysisSummary {
        total: resources.len(),
        checked,
        broken,
        slow,
        duplicates,
        unnecessary,
        average_response_ms,
    }
}

// Derives the advisory strings from the summary
//
// The list is fixed and ordered; each entry appears exactly when its
// count is nonzero.
fn recommend(summary: &AnalysisSummary) -> Vec<String> {
    let mut recommendations = Vec::new();

    if summary.broken > 0 {
        recommendations.push(format!(
            "Fix or remove {} broken resource(s)",
            summary.broken
        ));
    }
    if summary.duplicates > 0 {
        recommendations.push(format!(
            "Remove {} duplicate resource reference(s)",
            summary.duplicates
        ));
    }
    if summary.slow > 0 {
        recommendations.push(format!(
            "Investigate and optimize {} slow resource(s)",
            summary.slow
        ));
    }
    if summary.unnecessary > 0 {
        recommendations.push(format!(
            "Remove {} unnecessary link(s) or make them accessible",
            summary.unnecessary
        ));
    }

    recommendations
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is the entry API?
//    - first_seen.entry(url) looks the key up once and tells us whether
//      it was already there (Occupied) or not (Vacant)
//    - One hash lookup instead of a contains_key + insert pair
//
// 2. Why does dedup run here instead of before dispatch?
//    - The final list must preserve discovery order, and the duplicate
//      marking is defined in terms of that order ("first occurrence")
//    - The dispatcher finishes in whatever order the network dictates,
//      so order-sensitive work belongs after it
//
// 3. Why filter_map(|r| r.probe.as_ref())?
//    - Skipped/unresolved/capped results have no probe outcome
//    - filter_map drops the Nones and unwraps the Somes in one step
// -----------------------------------------------------------------------------
