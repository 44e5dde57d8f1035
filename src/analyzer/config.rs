// src/analyzer/config.rs
// =============================================================================
// Tunable knobs for one analysis run.
//
// Every field has a sensible default; the CLI exposes each one as a flag
// so callers can override them without recompiling.
// =============================================================================

/// Configuration for one analysis run
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Per-request timeout, applied independently to each probe phase
    pub request_timeout_ms: u64,
    /// Maximum redirect hops the HTTP client will follow per request
    pub max_redirects: usize,
    /// How many probes may be in flight at the same time
    pub concurrency_limit: usize,
    /// Hard cap on probed resources per page; anything beyond it is
    /// reported as not-checked instead of hammering the network
    pub max_checkable_resources: usize,
    /// Responses slower than this are counted as slow
    pub slow_threshold_ms: u64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: 10_000,
            max_redirects: 5,
            concurrency_limit: 8,
            max_checkable_resources: 300,
            slow_threshold_ms: 2_000,
        }
    }
}
