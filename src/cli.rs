// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Derive macros: Automatically generate code for our types
// - value_parser ranges: clap rejects out-of-range numbers for us
// =============================================================================

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::dispatch::DispatchConfig;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
#[derive(Parser, Debug)]
#[command(
    name = "head-prober",
    version,
    about = "Probe a list of URLs with HEAD requests and summarize the results",
    long_about = "head-prober sends a HEAD request to every URL in a file, at most \
                  --concurrency at a time, and stops early once --max URLs answered 200. \
                  It finishes with a summary of successes, errors, cancellations and status codes."
)]
pub struct Cli {
    /// A file containing a list of urls, one per line
    #[arg(long, value_name = "FILE")]
    pub urls: PathBuf,

    /// Stop after this many OK fetches (0 or negative: probe everything)
    ///
    /// Only enforced when --concurrency is greater than 1.
    #[arg(long, default_value_t = 2, allow_negative_numbers = true)]
    pub max: i64,

    /// Maximum number of probes in flight (1 = strictly sequential)
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u16).range(1..))]
    pub concurrency: u16,

    /// Timeout for each probe, in seconds
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Print the summary as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    pub fn dispatch_config(&self) -> DispatchConfig {
        DispatchConfig::new(usize::from(self.concurrency), self.max)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}


// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why is `max` an i64 and not a usize?
//    - A negative value is a valid way to say "no limit"
//    - allow_negative_numbers stops clap from reading "-1" as a flag
//    - DispatchConfig::new turns anything <= 0 into None
//
// 2. What does value_parser!(u16).range(1..) do?
//    - Parses the argument as a u16
//    - Rejects 0 with a helpful error before our code ever runs
//
// 3. Why PathBuf?
//    - It's the owned version of Path, like String is to &str
//    - File paths aren't always valid UTF-8, so String isn't quite right
// -----------------------------------------------------------------------------
