// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Fetch the page and extract its embedded resource references
// 3. Run the analyzer (concurrent probing + aggregation)
// 4. Print results as a table or JSON
// 5. Exit with proper code (0 = healthy, 1 = broken resources, 2 = error)
//
// Rust concepts used:
// - async/await: Because we make many network requests concurrently
// - Result<T, E>: For error handling (T = success type, E = error type)
// =============================================================================

// Module declarations - tells Rust about our other source files
mod analyzer; // src/analyzer/ - the resource-verification engine
mod cli; // src/cli.rs - command-line parsing
mod extract; // src/extract/ - page fetching and HTML extraction

use clap::Parser; // Parser trait enables the parse() method
use cli::Cli;

// anyhow::Result is like std::result::Result but simpler for applications
// It lets us return any error type with the ? operator
use anyhow::Result;

use analyzer::{Classification, PageAnalysis, ResourceKind, ResourceResult};

// The #[tokio::main] attribute transforms our async main into a real main
// function. It creates a tokio runtime and runs our async code inside it.
#[tokio::main]
async fn main() {
    // Run our application logic and capture the exit code
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // If an unexpected error occurred, print it and exit with code 2
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic
// Returns:
//   Ok(0) = page is healthy
//   Ok(1) = broken resources found
//   Err = fatal error (page unreachable, bad URL, ...)
async fn run() -> Result<i32> {
    let cli = Cli::parse();
    let config = cli.analyzer_config();

    if !cli.json {
        println!("🔍 Analyzing page: {}", cli.page_url);
    }

    // Fetching the page itself is the one fatal operation: without it
    // there is nothing to analyze
    let html = extract::fetch_page(&cli.page_url, &config).await?;

    let references = extract::extract_resources(&html);

    if !cli.json {
        println!("📄 Found {} resource reference(s)", references.len());
        println!();
    }

    let analysis = analyzer::analyze(&cli.page_url, references, &config).await?;

    print_results(&analysis, cli.json)?;

    // Exit code 1 flags broken resources, e.g. for CI pipelines
    if analysis.summary.broken > 0 {
        Ok(1)
    } else {
        Ok(0)
    }
}

// Prints the analysis either as a table or JSON
fn print_results(analysis: &PageAnalysis, json: bool) -> Result<()> {
    if json {
        // Serialize the whole analysis to JSON and print
        let json_output = serde_json::to_string_pretty(analysis)?;
        println!("{}", json_output);
    } else {
        // Print human-readable table + summary + recommendations
        print_table(&analysis.resources);
        print_summary(analysis);
    }
    Ok(())
}

// Prints per-resource results as a human-readable table in the terminal
fn print_table(resources: &[ResourceResult]) {
    // Print table header
    println!(
        "{:<4} {:<12} {:<50} {:<18} {:>8}  {}",
        "#", "KIND", "URL", "STATUS", "TIME", "NOTE"
    );
    println!("{}", "=".repeat(110));

    // Print each result in discovery order
    for result in resources {
        let url_display = truncate(&result.reference.raw_value, 47);
        let status_display = format_status(result);
        let time_display = match &result.probe {
            Some(outcome) => format!("{}ms", outcome.time_ms),
            None => String::new(),
        };
        let note = format_note(result);

        println!(
            "{:<4} {:<12} {:<50} {:<18} {:>8}  {}",
            result.reference.id,
            format_kind(result.reference.kind),
            url_display,
            status_display,
            time_display,
            note
        );
    }

    println!();
}

// Prints the summary block and the recommendations
fn print_summary(analysis: &PageAnalysis) {
    let summary = &analysis.summary;

    println!("📊 Summary:");
    println!("   📋 Total:       {}", summary.total);
    println!("   🌐 Checked:     {}", summary.checked);
    println!("   ❌ Broken:      {}", summary.broken);
    println!("   🐢 Slow:        {}", summary.slow);
    println!("   👯 Duplicates:  {}", summary.duplicates);
    println!("   🗑️  Unnecessary: {}", summary.unnecessary);
    match summary.average_response_ms {
        Some(average) => println!("   ⏱️  Avg response: {}ms", average),
        None => println!("   ⏱️  Avg response: n/a"),
    }

    if !analysis.recommendations.is_empty() {
        println!();
        println!("💡 Recommendations:");
        for recommendation in &analysis.recommendations {
            println!("   - {}", recommendation);
        }
    }
}

// Formats one result's status for the table
fn format_status(result: &ResourceResult) -> String {
    match result.classification {
        Classification::Unresolved => "❓ UNRESOLVED".to_string(),
        Classification::Skipped => "⏭️  SKIPPED".to_string(),
        Classification::NotChecked => "⏸️  NOT CHECKED".to_string(),
        Classification::Checked => match &result.probe {
            Some(outcome) if !outcome.succeeded => "⚠️  FAILED".to_string(),
            Some(outcome) => match outcome.http_status {
                Some(status) if status >= 400 => format!("❌ HTTP {}", status),
                Some(status) => format!("✅ HTTP {}", status),
                None => "✅ OK".to_string(),
            },
            // Should not happen: checked results carry an outcome
            None => "❓ UNKNOWN".to_string(),
        },
    }
}

// Formats the free-text note column
fn format_note(result: &ResourceResult) -> String {
    if let Some(first_id) = result.duplicate_of {
        return format!("duplicate of #{}", first_id);
    }
    match &result.probe {
        Some(outcome) => outcome.note.clone().unwrap_or_default(),
        None => String::new(),
    }
}

// Formats the resource kind for the table
fn format_kind(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::Anchor => "anchor",
        ResourceKind::Image => "image",
        ResourceKind::Script => "script",
        ResourceKind::Stylesheet => "stylesheet",
        ResourceKind::Iframe => "iframe",
        ResourceKind::MetaRefresh => "meta-refresh",
    }
}

// Truncates a string for display, appending "..." when it was cut
fn truncate(value: &str, max_chars: usize) -> String {
    if value.chars().count() > max_chars {
        let cut: String = value.chars().take(max_chars).collect();
        format!("{}...", cut)
    } else {
        value.to_string()
    }
}
