// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// page-pulse has a single job, so there are no subcommands: one
// positional page URL plus flags that override the analyzer defaults.
// =============================================================================

use clap::Parser;

use crate::analyzer::AnalyzerConfig;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "page-pulse",
    version = "0.1.0",
    about = "Checks the health of every resource embedded in a web page",
    long_about = "page-pulse fetches one web page, extracts every embedded resource reference \
                  (links, images, scripts, stylesheets, iframes, meta-refresh targets), and \
                  probes each one concurrently to report broken, slow, duplicate and \
                  unnecessary resources."
)]
pub struct Cli {
    /// The page to analyze (e.g. https://example.com)
    ///
    /// This is a positional argument (required, no flag needed)
    pub page_url: String,

    /// Output results in JSON format instead of a table
    #[arg(long)]
    pub json: bool,

    /// Per-request timeout in milliseconds, applied to each probe phase
    #[arg(long, default_value_t = 10_000)]
    pub timeout_ms: u64,

    /// Maximum redirect hops to follow per request
    #[arg(long, default_value_t = 5)]
    pub max_redirects: usize,

    /// How many probes may run at the same time
    #[arg(long, default_value_t = 8)]
    pub concurrency: usize,

    /// Hard cap on how many resources get probed; the rest are reported
    /// as not-checked
    #[arg(long, default_value_t = 300)]
    pub max_resources: usize,

    /// Responses slower than this (in milliseconds) count as slow
    #[arg(long, default_value_t = 2_000)]
    pub slow_threshold_ms: u64,
}

impl Cli {
    /// Builds the analyzer configuration from the parsed flags
    pub fn analyzer_config(&self) -> AnalyzerConfig {
        AnalyzerConfig {
            request_timeout_ms: self.timeout_ms,
            max_redirects: self.max_redirects,
            concurrency_limit: self.concurrency,
            max_checkable_resources: self.max_resources,
            slow_threshold_ms: self.slow_threshold_ms,
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why no subcommands?
//    - Subcommands make sense when a tool does several distinct things
//    - This tool does exactly one; a positional URL plus flags is the
//      whole interface, and `page-pulse --help` stays one screen long
//
// 2. What does default_value_t do?
//    - Supplies the default as a typed value (not a string)
//    - The flag defaults here intentionally match AnalyzerConfig's
//      Default impl, so CLI and library users see the same behavior
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_analyzer_config() {
        let cli = Cli::parse_from(["page-pulse", "https://example.com"]);
        let from_cli = cli.analyzer_config();
        let defaults = AnalyzerConfig::default();

        assert_eq!(from_cli.request_timeout_ms, defaults.request_timeout_ms);
        assert_eq!(from_cli.max_redirects, defaults.max_redirects);
        assert_eq!(from_cli.concurrency_limit, defaults.concurrency_limit);
        assert_eq!(
            from_cli.max_checkable_resources,
            defaults.max_checkable_resources
        );
        assert_eq!(from_cli.slow_threshold_ms, defaults.slow_threshold_ms);
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from([
            "page-pulse",
            "https://example.com",
            "--concurrency",
            "2",
            "--max-resources",
            "10",
            "--json",
        ]);

        assert!(cli.json);
        let config = cli.analyzer_config();
        assert_eq!(config.concurrency_limit, 2);
        assert_eq!(config.max_checkable_resources, 10);
    }
}
