// src/input/mod.rs
// =============================================================================
// This module gets URLs from storage into the dispatcher.
//
// Submodules:
// - file: reads a line-delimited URL list from disk
// - stream: turns that list into an async Stream fed by its own task
//
// By the time URLs leave this module they are trimmed and non-blank.
// Whether they are valid URLs is the probe's business.
// =============================================================================

mod file;
mod stream;

pub use file::{load_urls, parse_url_list};
pub use stream::stream_urls;
