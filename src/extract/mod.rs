// src/extract/mod.rs
// =============================================================================
// This module gets the page into memory and finds the resources in it.
//
// Submodules:
// - html: CSS-selector extraction of embedded resource references
//
// This file also owns fetching the top-level page. That fetch is the one
// operation in the whole program that is allowed to be fatal: without the
// page there is nothing to analyze, so the error propagates all the way
// up to main and becomes exit code 2.
// =============================================================================

mod html;

// Re-export the extraction entry point
pub use html::extract_resources;

use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use std::time::Duration;

use crate::analyzer::AnalyzerConfig;

// Fetches the page we are about to analyze
//
// Parameters:
//   url: the page URL (must be absolute)
//   config: for the timeout and redirect bound - the top-level fetch
//           plays by the same rules as every probe
//
// Returns: the page's HTML, or an error if the server is unreachable or
// answers with a non-success status - both are fatal for the whole run.
pub async fn fetch_page(url: &str, config: &AnalyzerConfig) -> Result<String> {
    let client = Client::builder()
        .timeout(Duration::from_millis(config.request_timeout_ms))
        .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
        .build()
        .context("Failed to create HTTP client")?;

    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Failed to fetch page: {}", url))?;

    if !response.status().is_success() {
        return Err(anyhow!("Page returned HTTP {}", response.status()));
    }

    let html = response
        .text()
        .await
        .context("Failed to read page body")?;

    Ok(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    // A loopback server answering every request with the same raw
    // response. Returns the URL to fetch.
    async fn spawn_server(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    break;
                };
                tokio::spawn(async move {
                    let mut buffer = [0u8; 1024];
                    let _ = socket.read(&mut buffer).await;
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        format!("http://127.0.0.1:{}/", port)
    }

    #[tokio::test]
    async fn test_fetch_page_returns_the_body() {
        let page: &str =
            "HTTP/1.1 200 OK\r\ncontent-length: 15\r\nconnection: close\r\n\r\n<html>ok</html>";
        let url = spawn_server(page).await;

        let html = fetch_page(&url, &AnalyzerConfig::default()).await.unwrap();

        assert_eq!(html, "<html>ok</html>");
    }

    #[tokio::test]
    async fn test_fetch_page_rejects_error_statuses() {
        let not_found: &str =
            "HTTP/1.1 404 Not Found\r\ncontent-length: 0\r\nconnection: close\r\n\r\n";
        let url = spawn_server(not_found).await;

        assert!(fetch_page(&url, &AnalyzerConfig::default()).await.is_err());
    }

    #[tokio::test]
    async fn test_fetch_page_honors_the_redirect_bound() {
        // Every answer points back at the same server: an endless loop
        // that only the redirect limit can break
        let redirect: &str =
            "HTTP/1.1 302 Found\r\nlocation: /again\r\ncontent-length: 0\r\nconnection: close\r\n\r\n";
        let url = spawn_server(redirect).await;

        let config = AnalyzerConfig {
            max_redirects: 2,
            ..AnalyzerConfig::default()
        };

        assert!(fetch_page(&url, &config).await.is_err());
    }
}
