// src/analyzer/resolve.rs
// =============================================================================
// This module turns raw reference strings into absolute URLs, and decides
// which references are not worth resolving in the first place.
//
// We use the `url` crate to:
// - Parse and validate URLs
// - Resolve relative references against the page URL (like a browser does)
//
// Important contract: a reference that cannot be resolved is a normal,
// expected outcome. We return Option, never an error - malformed markup
// is the web's natural state, not a fault in this program.
//
// Rust concepts:
// - Option<T>: "no resolution" as a first-class value
// - The ? operator on Option: early-return None on failure
// =============================================================================

use url::Url;

// Resolves a raw reference against the page URL
//
// Parameters:
//   base: the page URL (already parsed and absolute)
//   raw: the attribute value from the markup (might be relative or absolute)
//
// Returns: Some(absolute_url) or None if the reference can't be resolved
// or doesn't resolve to something we can check over HTTP
//
// Examples:
//   base = "https://example.com/page"
//   raw = "/docs" -> Some("https://example.com/docs")
//   raw = "../other" -> Some("https://example.com/other")
//   raw = "//cdn.example.com/app.js" -> Some("https://cdn.example.com/app.js")
//   raw = "ftp://example.com/file" -> None (not HTTP)
pub fn resolve(base: &Url, raw: &str) -> Option<String> {
    // Url::join handles every case for us: absolute references replace the
    // base entirely, relative ones are resolved against it, and anything
    // syntactically broken comes back as an error
    let resolved = base.join(raw).ok()?;

    // Only http/https resources can be probed
    match resolved.scheme() {
        "http" | "https" => Some(resolved.to_string()),
        _ => None,
    }
}

// Is this reference something other than a real network resource?
//
// Skippable references are never resolved and never probed, even if they
// would happen to resolve:
// - empty href (after trimming whitespace)
// - exactly "#" (fragment-only, stays on the page)
// - javascript: (runs code, fetches nothing)
// - mailto: / tel: (handled by other applications)
pub fn is_skippable(raw: &str) -> bool {
    let value = raw.trim().to_ascii_lowercase();

    value.is_empty()
        || value == "#"
        || value.starts_with("javascript:")
        || value.starts_with("mailto:")
        || value.starts_with("tel:")
}

// Is this reference a dead interactive link the page author should fix?
//
// This is a subset of skippable: empty hrefs, bare "#" and javascript:
// links look clickable but lead nowhere (and often break keyboard
// navigation). mailto: and tel: are skipped but perfectly legitimate,
// so they don't count here.
pub fn is_unnecessary(raw: &str) -> bool {
    let value = raw.trim().to_ascii_lowercase();

    value.is_empty() || value == "#" || value.starts_with("javascript:")
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does .ok()? do?
//    - .ok() converts Result<T, E> into Option<T>, discarding the error
//    - The ? then early-returns None if there was no value
//    - Perfect when the caller doesn't care *why* something failed
//
// 2. Why lowercase before matching schemes?
//    - "JAVASCRIPT:void(0)" is just as dead as "javascript:void(0)"
//    - HTML attribute values are case-preserving but schemes are
//      case-insensitive, so we normalize once up front
//
// 3. Why does resolve take &Url instead of &str?
//    - The caller parses the base URL exactly once per page
//    - Passing the parsed form avoids re-parsing it for every reference
// -----------------------------------------------------------------------------
