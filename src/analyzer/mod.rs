// src/analyzer/mod.rs
// =============================================================================
// This module is the resource-verification engine: it takes the references
// extracted from a page and produces per-resource health results plus a
// page-level summary.
//
// Pipeline:
// 1. Classify each reference (skippable? resolvable?) and cap how many
//    will actually be probed
// 2. Dispatch the checkable URLs through a bounded worker pool
// 3. Aggregate: merge outcomes back in discovery order, mark duplicates,
//    compute the summary and recommendations
//
// Submodules:
// - model: the data types (references, results, summary)
// - config: tunable knobs with defaults
// - resolve: URL resolution and skippability rules
// - probe: the two-phase network check for one URL
// - dispatch: the fixed-size worker pool
// - aggregate: dedup, summary and recommendations
// =============================================================================

mod aggregate;
mod config;
mod dispatch;
mod model;
mod probe;
mod resolve;

// Re-export the public API so callers write analyzer::analyze(...) and
// analyzer::AnalyzerConfig without knowing the internal layout
pub use config::AnalyzerConfig;
pub use model::{
    AnalysisSummary, Classification, PageAnalysis, ProbeOutcome, ResourceKind, ResourceReference,
    ResourceResult,
};

use aggregate::PendingResource;
use anyhow::{Context, Result};
use url::Url;

// Runs the full analysis over the extracted references
//
// Parameters:
//   base_url: the page's own absolute URL (for resolving relative refs)
//   references: every reference found in the markup, in discovery order
//   config: concurrency / timeout / threshold settings
//
// Returns: the complete analysis. Individual resources failing is normal
// and reported as data; the only error here is an unusable base URL or
// an HTTP client that cannot be constructed.
pub async fn analyze(
    base_url: &str,
    references: Vec<ResourceReference>,
    config: &AnalyzerConfig,
) -> Result<PageAnalysis> {
    let base = Url::parse(base_url)
        .with_context(|| format!("Invalid base URL: {}", base_url))?;

    // Classify every reference and collect the URLs worth probing.
    // The cap bounds how much network work a pathological page can
    // demand; everything past it is reported honestly as not-checked.
    let mut pending = Vec::with_capacity(references.len());
    let mut checkable = Vec::new();

    for reference in references {
        let (resolved_url, classification) = if resolve::is_skippable(&reference.raw_value) {
            // Skippable wins unconditionally, even if the value would resolve
            (None, Classification::Skipped)
        } else {
            match resolve::resolve(&base, &reference.raw_value) {
                Some(url) => {
                    if checkable.len() < config.max_checkable_resources {
                        checkable.push(url.clone());
                        (Some(url), Classification::Checked)
                    } else {
                        (Some(url), Classification::NotChecked)
                    }
                }
                None => (None, Classification::Unresolved),
            }
        };

        pending.push(PendingResource {
            reference,
            resolved_url,
            classification,
        });
    }

    let client = probe::build_client(config)?;

    // A zero limit would mean zero workers and a hung analysis
    let limit = config.concurrency_limit.max(1);

    let probes = dispatch::dispatch(checkable, limit, move |url| {
        let client = client.clone();
        async move { probe::probe(&client, &url).await }
    })
    .await;

    Ok(aggregate::aggregate(pending, &probes, config))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(id: usize, kind: ResourceKind, raw: &str) -> ResourceReference {
        ResourceReference {
            id,
            kind,
            raw_value: raw.to_string(),
        }
    }

    // These tests pick inputs that never reach the network: skippable,
    // unresolvable, or capped-out references

    #[tokio::test]
    async fn test_skippable_references_are_never_probed() {
        let references = vec![
            reference(0, ResourceKind::Image, "javascript:void(0)"),
            reference(1, ResourceKind::Anchor, "#"),
            reference(2, ResourceKind::Anchor, "mailto:test@example.com"),
        ];

        let analysis = analyze("https://example.com/", references, &AnalyzerConfig::default())
            .await
            .unwrap();

        assert_eq!(analysis.resources.len(), 3);
        for result in &analysis.resources {
            assert_eq!(result.classification, Classification::Skipped);
            assert!(result.resolved_url.is_none());
            assert!(result.probe.is_none());
        }
        assert_eq!(analysis.summary.checked, 0);
        assert_eq!(analysis.summary.average_response_ms, None);
    }

    #[tokio::test]
    async fn test_malformed_references_are_unresolved() {
        let references = vec![reference(0, ResourceKind::Anchor, "http://[")];

        let analysis = analyze("https://example.com/", references, &AnalyzerConfig::default())
            .await
            .unwrap();

        assert_eq!(
            analysis.resources[0].classification,
            Classification::Unresolved
        );
        assert!(analysis.resources[0].resolved_url.is_none());
    }

    #[tokio::test]
    async fn test_capacity_cap_marks_the_excess_not_checked() {
        let references: Vec<ResourceReference> = (0..5)
            .map(|i| reference(i, ResourceKind::Anchor, &format!("/page-{i}")))
            .collect();

        // Cap of zero: everything resolvable is capped out, nothing
        // touches the network
        let config = AnalyzerConfig {
            max_checkable_resources: 0,
            ..AnalyzerConfig::default()
        };

        let analysis = analyze("https://example.com/", references, &config)
            .await
            .unwrap();

        assert_eq!(analysis.resources.len(), 5);
        for result in &analysis.resources {
            assert_eq!(result.classification, Classification::NotChecked);
            // Capped items still resolved - we know what they point at
            assert!(result.resolved_url.is_some());
            assert!(result.probe.is_none());
        }
        assert_eq!(analysis.summary.checked, 0);
    }

    #[tokio::test]
    async fn test_capped_duplicates_are_still_marked() {
        let references = vec![
            reference(0, ResourceKind::Anchor, "/about"),
            reference(1, ResourceKind::Stylesheet, "/about"),
        ];
        let config = AnalyzerConfig {
            max_checkable_resources: 0,
            ..AnalyzerConfig::default()
        };

        let analysis = analyze("https://example.com/", references, &config)
            .await
            .unwrap();

        assert_eq!(analysis.resources[0].duplicate_of, None);
        assert_eq!(analysis.resources[1].duplicate_of, Some(0));
        assert_eq!(analysis.summary.duplicates, 1);
    }

    #[tokio::test]
    async fn test_invalid_base_url_is_the_one_fatal_error() {
        let references = vec![reference(0, ResourceKind::Anchor, "/about")];
        let result = analyze("not a url", references, &AnalyzerConfig::default()).await;
        assert!(result.is_err());
    }
}
