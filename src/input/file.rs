// src/input/file.rs
// =============================================================================
// Loads the URL list: one URL per line, blank lines ignored.
//
// Rust concepts:
// - tokio::fs: file I/O that doesn't block the runtime
// - anyhow::Context: attach "what were we doing" to an error
// =============================================================================

use anyhow::{Context, Result};
use std::path::Path;

/// Reads `path` and returns its URLs in file order
pub async fn load_urls(path: &Path) -> Result<Vec<String>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("cannot read urls from {}", path.display()))?;

    Ok(parse_url_list(&content))
}

/// Splits text into URLs, trimming whitespace and skipping blank lines
///
/// Duplicates are kept: every line is one probe.
pub fn parse_url_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}
