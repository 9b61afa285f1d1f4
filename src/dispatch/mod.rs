// src/dispatch/mod.rs
// =============================================================================
// This module decides HOW the URLs get probed.
//
// Two modes:
// - sequential: concurrency == 1, one probe at a time, in input order
// - parallel:   concurrency > 1, at most N probes in flight, optional
//               early stop after `max_successes` OK results
//
// Both modes feed the same StatusTracker and return its Summary.
//
// Rust concepts:
// - Generics with trait bounds: works with any Probe and any URL Stream
// - Arc: shared ownership of the probe across spawned tasks
// =============================================================================

mod parallel;
mod sequential;
#[cfg(test)]
mod stub;

use std::sync::Arc;

use futures::Stream;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::probe::Probe;
use crate::tracker::Summary;

pub use parallel::run_parallel;
pub use sequential::run_sequential;

/// How a run is scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchConfig {
    /// Maximum probes in flight; 1 selects sequential mode
    pub concurrency: usize,
    /// Stop after this many successes (parallel mode only)
    pub max_successes: Option<usize>,
}

impl DispatchConfig {
    /// `max <= 0` disables the early stop
    pub fn new(concurrency: usize, max: i64) -> Self {
        DispatchConfig {
            concurrency: concurrency.max(1),
            max_successes: usize::try_from(max).ok().filter(|&m| m > 0),
        }
    }

    pub fn is_sequential(&self) -> bool {
        self.concurrency == 1
    }
}

/// Probes every URL from `urls` and returns the final counters
///
/// `cancel` is the run's top-level token. Cancelling it from outside
/// (Ctrl-C, for example) stops the run the same way reaching the success
/// threshold does.
pub async fn run<P, S>(
    probe: Arc<P>,
    urls: S,
    config: &DispatchConfig,
    cancel: &CancellationToken,
) -> Summary
where
    P: Probe,
    S: Stream<Item = String> + Send + 'static,
{
    if config.is_sequential() {
        if let Some(max) = config.max_successes {
            warn!(max, "max successes is not enforced when concurrency is 1");
        }
        run_sequential(probe.as_ref(), urls, cancel).await
    } else {
        run_parallel(probe, urls, config.concurrency, config.max_successes, cancel).await
    }
}
