// src/extract/html.rs
// =============================================================================
// This module extracts embedded resource references from an HTML page.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// One combined selector walks the document a single time, so the
// references come out in document order - that order is the "discovery
// order" everything downstream (ids, duplicate marking) is defined by.
//
// Rust concepts:
// - Iterators: For walking selected elements
// - match on &str: Dispatching per element name
// =============================================================================

use scraper::{Html, Selector};

use crate::analyzer::{ResourceKind, ResourceReference};

// Extracts every embedded resource reference from HTML content
//
// What we look for:
//   <a href>                       -> Anchor
//   <img src>                      -> Image
//   <script src>                   -> Script (inline scripts have no src)
//   <link rel="stylesheet" href>   -> Stylesheet
//   <iframe src>                   -> Iframe
//   <meta http-equiv="refresh">    -> MetaRefresh (url= parsed from content)
//
// Returns: references in document order, with sequential ids.
// The raw values are kept verbatim - resolution happens later.
pub fn extract_resources(html: &str) -> Vec<ResourceReference> {
    let document = Html::parse_document(html);

    // One selector list, one DOM walk. The selector is a constant and
    // known to be valid, so unwrap() here is a programmer-error check.
    let selector = Selector::parse(
        "a[href], img[src], script[src], link[rel][href], iframe[src], \
         meta[http-equiv][content]",
    )
    .unwrap();

    let mut found: Vec<(ResourceKind, String)> = Vec::new();

    for element in document.select(&selector) {
        let value = element.value();

        match value.name() {
            "a" => {
                if let Some(href) = value.attr("href") {
                    found.push((ResourceKind::Anchor, href.to_string()));
                }
            }
            "img" => {
                if let Some(src) = value.attr("src") {
                    found.push((ResourceKind::Image, src.to_string()));
                }
            }
            "script" => {
                if let Some(src) = value.attr("src") {
                    found.push((ResourceKind::Script, src.to_string()));
                }
            }
            "link" => {
                // rel is a space-separated token list and case-insensitive
                let is_stylesheet = value.attr("rel").is_some_and(|rel| {
                    rel.split_whitespace()
                        .any(|token| token.eq_ignore_ascii_case("stylesheet"))
                });
                if is_stylesheet {
                    if let Some(href) = value.attr("href") {
                        found.push((ResourceKind::Stylesheet, href.to_string()));
                    }
                }
            }
            "iframe" => {
                if let Some(src) = value.attr("src") {
                    found.push((ResourceKind::Iframe, src.to_string()));
                }
            }
            "meta" => {
                let is_refresh = value
                    .attr("http-equiv")
                    .is_some_and(|equiv| equiv.eq_ignore_ascii_case("refresh"));
                if is_refresh {
                    if let Some(target) = value.attr("content").and_then(parse_meta_refresh) {
                        found.push((ResourceKind::MetaRefresh, target));
                    }
                }
            }
            _ => {}
        }
    }

    // Ids are simply the discovery-order positions
    found
        .into_iter()
        .enumerate()
        .map(|(id, (kind, raw_value))| ResourceReference {
            id,
            kind,
            raw_value,
        })
        .collect()
}

// Pulls the redirect target out of a meta-refresh content attribute
//
// The attribute looks like:
//   "5"                      -> no target, just a reload delay
//   "5; url=/next"           -> Some("/next")
//   "0;URL='https://x.com'"  -> Some("https://x.com")  (quotes stripped)
fn parse_meta_refresh(content: &str) -> Option<String> {
    // Only the first ';' separates the delay from the url clause; the
    // target itself may contain semicolons (query strings, matrix params)
    let clause = match content.split_once(';') {
        Some((_delay, rest)) => rest,
        None => content,
    }
    .trim();

    // Case-insensitive "url", optional spaces, "=". The lowercased copy
    // has identical byte offsets, so slicing the original with them is
    // safe (and keeps the target's casing intact).
    let lower = clause.to_ascii_lowercase();
    let after_keyword = lower.strip_prefix("url")?;
    let rest = clause[clause.len() - after_keyword.len()..].trim_start();
    let value = rest.strip_prefix('=')?;

    let target = value.trim().trim_matches(|c| c == '\'' || c == '"');
    if target.is_empty() {
        None
    } else {
        Some(target.to_string())
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why one combined selector?
//    - "a[href], img[src], ..." is a CSS selector *list*
//    - scraper walks the document once and yields matches in document
//      order, which is exactly the discovery order we need
//    - Six separate selects would group results by kind instead
//
// 2. Why keep the raw attribute values verbatim?
//    - Resolution and skippability are the analyzer's business
//    - The extractor just reports what the markup literally says,
//      including empty strings and javascript: pseudo-links
//
// 3. What is is_some_and?
//    - Tests a predicate against the value inside an Option
//    - None simply yields false, no unwrapping needed
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_all_resource_kinds() {
        let html = r#"
            <html>
            <head>
                <meta http-equiv="refresh" content="5; url=/next">
                <link rel="stylesheet" href="/style.css">
                <script src="/app.js"></script>
            </head>
            <body>
                <a href="/about">About</a>
                <img src="/logo.png">
                <iframe src="/embed"></iframe>
            </body>
            </html>
        "#;

        let references = extract_resources(html);
        let kinds: Vec<ResourceKind> = references.iter().map(|r| r.kind).collect();

        assert_eq!(
            kinds,
            vec![
                ResourceKind::MetaRefresh,
                ResourceKind::Stylesheet,
                ResourceKind::Script,
                ResourceKind::Anchor,
                ResourceKind::Image,
                ResourceKind::Iframe,
            ]
        );
    }

    #[test]
    fn test_ids_follow_document_order() {
        let html = r#"<a href="/a">A</a><img src="/b"><a href="/c">C</a>"#;
        let references = extract_resources(html);

        assert_eq!(references.len(), 3);
        for (expected_id, reference) in references.iter().enumerate() {
            assert_eq!(reference.id, expected_id);
        }
        assert_eq!(references[0].raw_value, "/a");
        assert_eq!(references[1].raw_value, "/b");
        assert_eq!(references[2].raw_value, "/c");
    }

    #[test]
    fn test_inline_scripts_are_ignored() {
        let html = r#"<script>console.log("hi")</script><script src="/app.js"></script>"#;
        let references = extract_resources(html);

        assert_eq!(references.len(), 1);
        assert_eq!(references[0].raw_value, "/app.js");
    }

    #[test]
    fn test_non_stylesheet_links_are_ignored() {
        let html = r#"
            <link rel="icon" href="/favicon.ico">
            <link rel="StyleSheet" href="/style.css">
            <link rel="preload stylesheet" href="/extra.css">
        "#;
        let references = extract_resources(html);

        assert_eq!(references.len(), 2);
        assert_eq!(references[0].raw_value, "/style.css");
        assert_eq!(references[1].raw_value, "/extra.css");
    }

    #[test]
    fn test_raw_values_are_kept_verbatim() {
        let html = r#"<a href="javascript:void(0)">Click</a><a href="">Empty</a>"#;
        let references = extract_resources(html);

        assert_eq!(references[0].raw_value, "javascript:void(0)");
        assert_eq!(references[1].raw_value, "");
    }

    #[test]
    fn test_parse_meta_refresh_variants() {
        assert_eq!(parse_meta_refresh("5"), None);
        assert_eq!(parse_meta_refresh("5; url=/next"), Some("/next".to_string()));
        assert_eq!(
            parse_meta_refresh("0;URL='https://example.com/'"),
            Some("https://example.com/".to_string())
        );
        assert_eq!(
            parse_meta_refresh(r#"3 ; url = "/quoted""#),
            Some("/quoted".to_string())
        );
        assert_eq!(parse_meta_refresh("5; url="), None);
    }

    #[test]
    fn test_parse_meta_refresh_target_may_contain_semicolons() {
        assert_eq!(
            parse_meta_refresh("0; url=/a;b=c"),
            Some("/a;b=c".to_string())
        );
        assert_eq!(
            parse_meta_refresh("5; url=/search?q=a;b"),
            Some("/search?q=a;b".to_string())
        );
        // A bare target without a delay clause still parses
        assert_eq!(parse_meta_refresh("url=/plain"), Some("/plain".to_string()));
    }

    #[test]
    fn test_meta_without_refresh_is_ignored() {
        let html = r#"<meta http-equiv="content-type" content="text/html">"#;
        assert!(extract_resources(html).is_empty());
    }
}
