// src/analyzer/probe.rs
// =============================================================================
// This module performs the actual network check against a single URL.
//
// Two-phase strategy:
// 1. Try a HEAD request first - no body transfer, so it's cheap, and most
//    live servers answer it happily.
// 2. If HEAD fails (timeout, connection error, or the server rejecting the
//    method with 405/501), fall back to a GET - but drop the response the
//    moment the headers arrive, so we never pay for the body.
//
// Each phase has its own timeout and its own stopwatch: the recorded
// elapsed time always belongs to the attempt that produced the outcome,
// never to a failed earlier attempt.
//
// Rust concepts:
// - async/await: For non-blocking network I/O
// - Instant: Monotonic wall-clock measurement
// - drop(): Explicitly releasing a value (here: aborting the body stream)
// =============================================================================

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use std::time::{Duration, Instant};

use super::config::AnalyzerConfig;
use super::model::ProbeOutcome;

// Builds the HTTP client shared by all probes in one run
//
// One client means one connection pool, so probes against the same host
// reuse connections instead of re-handshaking every time.
pub fn build_client(config: &AnalyzerConfig) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_millis(config.request_timeout_ms))
        .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
        .build()
        .context("Failed to create HTTP client")
}

// Probes a single URL and reports what happened
//
// Parameters:
//   client: the shared HTTP client (cheap to clone, pools connections)
//   url: the absolute URL to check
//
// Returns: a ProbeOutcome - this function never errors, because every
// failure mode is itself a valid answer about the resource's health
pub async fn probe(client: &Client, url: &str) -> ProbeOutcome {
    // Phase 1: header-only check
    let start = Instant::now();
    if let Ok(response) = client.head(url).send().await {
        let status = response.status();
        if !rejects_head(status) {
            return ProbeOutcome {
                http_status: Some(status.as_u16()),
                time_ms: start.elapsed().as_millis() as u64,
                succeeded: true,
                note: None,
            };
        }
        // 405/501: the server refuses HEAD outright. Fall through to GET -
        // the rejection tells us nothing about the resource itself.
    }

    // Phase 2: body-capable fallback, timed independently.
    // The failed first attempt's elapsed time is discarded.
    let start = Instant::now();
    match client.get(url).send().await {
        Ok(response) => {
            // send() resolves as soon as the response headers are in;
            // the body has not been transferred yet
            let status = response.status().as_u16();
            let elapsed = start.elapsed().as_millis() as u64;

            // Dropping the response closes the connection without reading
            // the body - reachability and latency are all we came for
            drop(response);

            ProbeOutcome {
                http_status: Some(status),
                time_ms: elapsed,
                succeeded: true,
                note: None,
            }
        }
        Err(error) => ProbeOutcome {
            // Some failures still carry a status (e.g. redirect-policy
            // errors); record it when present
            http_status: error.status().map(|s| s.as_u16()),
            time_ms: start.elapsed().as_millis() as u64,
            succeeded: false,
            note: Some(describe_error(&error)),
        },
    }
}

// Does this status mean "the server refuses header-only requests"?
//
// 405 Method Not Allowed and 501 Not Implemented are the two answers
// servers give when HEAD itself is the problem. Anything else (including
// 404) is a real verdict about the resource and stands as-is.
fn rejects_head(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::METHOD_NOT_ALLOWED | StatusCode::NOT_IMPLEMENTED
    )
}

// Turns a reqwest error into a short human-readable description
//
// reqwest errors can happen for many reasons:
// - Network timeout
// - DNS resolution failure
// - Connection refused / host unreachable
// - Too many redirects (redirect loop)
// - TLS certificate issues
fn describe_error(error: &reqwest::Error) -> String {
    // Convert the error to a string once so we can sniff its contents
    let error_string = error.to_string();

    if error.is_timeout() {
        "Request timed out".to_string()
    } else if error.is_redirect() {
        "Too many redirects".to_string()
    } else if error.is_connect() {
        // Connection errors often mean DNS issues or host unreachable
        if error_string.contains("dns") {
            "Could not resolve hostname".to_string()
        } else {
            "Connection failed".to_string()
        }
    } else if error_string.contains("certificate") || error_string.contains("ssl") {
        "TLS certificate error".to_string()
    } else {
        error_string
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why HEAD before GET?
//    - HEAD asks for headers only, no body - checking a 40MB video with
//      GET-and-download would be absurd when all we want is "does it exist
//      and how fast does it answer"
//    - The GET fallback exists because some servers reject HEAD (405),
//      and we still abandon the body immediately
//
// 2. How does dropping a Response abort the body?
//    - reqwest's send() returns once headers are received
//    - The body streams lazily as you read it; dropping the Response
//      closes the connection so no further bytes flow
//
// 3. Why two separate Instant::now() calls?
//    - Each phase is timed on its own
//    - If HEAD times out after 10s and GET answers in 50ms, the honest
//      latency for this resource is 50ms, not 10050ms
//
// 4. Why does probe() return a plain value instead of Result?
//    - A dead link is not an error in this program - it's a finding
//    - Encoding failures as data keeps the caller's logic simple
// -----------------------------------------------------------------------------
