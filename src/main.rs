// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging (tracing) so every probe gets a log line on stderr
// 2. Parse command-line arguments using clap
// 3. Load the URL list and hand it to the dispatcher
// 4. Print the summary (table or JSON) on stdout
// 5. Exit with proper code (0 = run completed, 2 = error)
//
// Individual URLs failing is normal and never changes the exit code; only a
// problem with the run itself (unreadable URL file, no HTTP client) does.
//
// Rust concepts used:
// - async/await: Because we need to make many network requests concurrently
// - Result<T, E>: For error handling (T = success type, E = error type)
// - Arc: the probe is shared by every spawned task
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli; // src/cli.rs - command-line parsing
mod dispatch; // src/dispatch/ - sequential and bounded-parallel scheduling
mod input; // src/input/ - loading and streaming the URL list
mod probe; // src/probe/ - the HEAD request itself
mod tracker; // src/tracker/ - counters and the final summary

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser; // Parser trait enables the parse() method
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::Cli;
use probe::HeadProbe;
use tracker::Summary;

// The #[tokio::main] attribute transforms our async main into a real main function
// It creates a tokio runtime and runs our async code inside it
#[tokio::main]
async fn main() {
    init_tracing();

    let exit_code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr so `--json` output on stdout stays clean.
// Verbosity comes from RUST_LOG, e.g. RUST_LOG=head_prober=debug
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "head_prober=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.dispatch_config();

    let urls = input::load_urls(&cli.urls).await?;

    info!(
        urls = urls.len(),
        concurrency = config.concurrency,
        max_successes = ?config.max_successes,
        timeout_secs = cli.timeout,
        "Starting probe run"
    );

    let probe = HeadProbe::new(cli.probe_timeout()).context("cannot build HTTP client")?;

    // The run's top-level token; Ctrl-C cancels it like an early stop would
    let cancel = CancellationToken::new();
    cancel_on_ctrl_c(cancel.clone());

    let summary = dispatch::run(
        Arc::new(probe),
        input::stream_urls(urls),
        &config,
        &cancel,
    )
    .await;

    summary.log();
    print_summary(&summary, cli.json)
}

fn cancel_on_ctrl_c(token: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling outstanding probes");
            token.cancel();
        }
    });
}

// Prints the summary either as a table or JSON
fn print_summary(summary: &Summary, json: bool) -> Result<()> {
    if json {
        println!("{}", summary.to_json()?);
    } else {
        println!();
        print!("{}", summary.render_table());
    }
    Ok(())
}
