// src/analyzer/model.rs
// =============================================================================
// This module defines the data types that flow through the analyzer.
//
// The shapes here mirror the JSON we emit with --json, so the serde
// attributes matter: field names like `httpStatus`, `timeMs`, `resolved`,
// `duplicateOf` and `status` are part of the output format and must not
// change casually.
//
// Rust concepts:
// - Enums: To represent resource kinds and classifications
// - #[derive(Serialize)]: Automatic JSON conversion via serde
// - Option<T>: For fields that are legitimately absent
// =============================================================================

use serde::Serialize;

// The kind of embedded resource a reference was extracted from
//
// kebab-case gives us "meta-refresh" etc. in JSON output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    /// An <a href="..."> link
    Anchor,
    /// An <img src="..."> image
    Image,
    /// A <script src="..."> external script
    Script,
    /// A <link rel="stylesheet" href="..."> stylesheet
    Stylesheet,
    /// An <iframe src="..."> embedded frame
    Iframe,
    /// A <meta http-equiv="refresh" content="...; url=..."> redirect target
    MetaRefresh,
}

// One reference discovered in the page markup
//
// Created once during extraction and never mutated afterwards.
// `id` is the position in discovery order, unique within one run.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceReference {
    /// Stable identifier, unique within one analysis run
    pub id: usize,
    /// Where in the markup this reference came from
    pub kind: ResourceKind,
    /// The literal attribute value as found in the markup
    /// (may be empty, relative, absolute, or a non-HTTP scheme)
    #[serde(rename = "url")]
    pub raw_value: String,
}

// What happened to a reference during analysis
//
// Exactly one classification applies to each reference, decided once:
// - Unresolved: the raw value could not be turned into an absolute URL
// - Skipped: not a real network resource (javascript:, mailto:, ...)
// - Checked: resolved and probed over the network
// - NotChecked: resolved but beyond the per-page resource cap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Classification {
    Unresolved,
    Skipped,
    Checked,
    NotChecked,
}

// The result of probing one URL over the network
#[derive(Debug, Clone, Serialize)]
pub struct ProbeOutcome {
    /// HTTP status code, if the server responded at all
    #[serde(rename = "httpStatus", skip_serializing_if = "Option::is_none")]
    pub http_status: Option<u16>,
    /// Wall-clock duration of the attempt that produced this outcome
    #[serde(rename = "timeMs")]
    pub time_ms: u64,
    /// Did the request complete at the transport level?
    /// (An HTTP error status still counts as succeeded here - whether the
    /// resource is "broken" is decided later, during aggregation.)
    #[serde(rename = "ok")]
    pub succeeded: bool,
    /// Human-readable failure description (timeout, DNS failure, ...)
    #[serde(rename = "note", skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

// One reference after resolution, classification and (possibly) probing
#[derive(Debug, Clone, Serialize)]
pub struct ResourceResult {
    /// The originating reference (its fields are flattened into the JSON)
    #[serde(flatten)]
    pub reference: ResourceReference,
    /// Absolute URL, absent if resolution failed or the reference was skipped
    #[serde(rename = "resolved", skip_serializing_if = "Option::is_none")]
    pub resolved_url: Option<String>,
    /// What happened to this reference
    #[serde(rename = "status")]
    pub classification: Classification,
    /// Present only when classification is Checked
    #[serde(flatten)]
    pub probe: Option<ProbeOutcome>,
    /// Id of the first-seen result sharing the same resolved URL.
    /// Never set on the first occurrence, and always points to an
    /// earlier id in discovery order.
    #[serde(rename = "duplicateOf", skip_serializing_if = "Option::is_none")]
    pub duplicate_of: Option<usize>,
}

impl ResourceResult {
    /// Is this resource broken?
    ///
    /// Broken means: we probed it and either the request failed outright
    /// or the server answered with an error status (>= 400)
    pub fn is_broken(&self) -> bool {
        match &self.probe {
            Some(outcome) => {
                !outcome.succeeded || outcome.http_status.is_some_and(|s| s >= 400)
            }
            None => false,
        }
    }
}

// Page-level statistics, computed once after all probes complete
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    /// Total number of references discovered on the page
    pub total: usize,
    /// How many were actually probed over the network
    pub checked: usize,
    /// Probed and failed, or answered with status >= 400
    pub broken: usize,
    /// Probed and slower than the slow threshold
    pub slow: usize,
    /// References resolving to a URL already seen earlier on the page
    pub duplicates: usize,
    /// Dead interactive links: empty href, "#", or javascript:
    pub unnecessary: usize,
    /// Mean response time over successful probes only.
    /// Absent (not zero!) when nothing was successfully probed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_response_ms: Option<u64>,
}

// Everything one analysis run produces
#[derive(Debug, Clone, Serialize)]
pub struct PageAnalysis {
    /// Per-reference results, in discovery order
    pub resources: Vec<ResourceResult>,
    /// Aggregate statistics
    pub summary: AnalysisSummary,
    /// Advisory strings derived from the summary
    pub recommendations: Vec<String>,
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why #[serde(rename = "...")]?
//    - Rust field names are snake_case by convention
//    - Our JSON output uses camelCase names (httpStatus, timeMs, ...)
//    - rename lets us keep both conventions happy
//
// 2. What does #[serde(flatten)] do?
//    - Merges the inner struct's fields into the outer JSON object
//    - So a ResourceResult serializes as one flat object, not nested
//    - flatten on Option<ProbeOutcome> emits nothing when it's None
//
// 3. Why skip_serializing_if = "Option::is_none"?
//    - Absent fields are simply omitted from the JSON
//    - "no average" and "average of 0ms" are very different claims,
//      so we never emit a fake zero
//
// 4. What is is_some_and?
//    - A compact way to test a value inside an Option
//    - opt.is_some_and(|s| s >= 400) is false for None
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn checked_result(status: Option<u16>, succeeded: bool) -> ResourceResult {
        ResourceResult {
            reference: ResourceReference {
                id: 0,
                kind: ResourceKind::Anchor,
                raw_value: "/x".to_string(),
            },
            resolved_url: Some("https://example.com/x".to_string()),
            classification: Classification::Checked,
            probe: Some(ProbeOutcome {
                http_status: status,
                time_ms: 10,
                succeeded,
                note: None,
            }),
            duplicate_of: None,
        }
    }

    #[test]
    fn test_ok_probe_is_not_broken() {
        assert!(!checked_result(Some(200), true).is_broken());
    }

    #[test]
    fn test_http_error_status_is_broken() {
        assert!(checked_result(Some(404), true).is_broken());
        assert!(checked_result(Some(500), true).is_broken());
    }

    #[test]
    fn test_failed_probe_is_broken() {
        assert!(checked_result(None, false).is_broken());
    }

    #[test]
    fn test_unprobed_result_is_not_broken() {
        let mut result = checked_result(None, false);
        result.probe = None;
        result.classification = Classification::NotChecked;
        assert!(!result.is_broken());
    }

    #[test]
    fn test_json_field_names() {
        let result = checked_result(Some(200), true);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"], "checked");
        assert_eq!(json["httpStatus"], 200);
        assert_eq!(json["timeMs"], 10);
        assert_eq!(json["ok"], true);
        assert_eq!(json["url"], "/x");
        // Absent optionals are omitted entirely
        assert!(json.get("note").is_none());
        assert!(json.get("duplicateOf").is_none());
    }
}
