// src/dispatch/sequential.rs
// =============================================================================
// Strictly one-at-a-time probing.
//
// Each URL is probed and tracked before the next one is pulled, so outcomes
// reach the tracker in exactly the input order. There is no early stop in
// this mode: a `max_successes` setting is ignored. If the run token is
// cancelled from outside, the remaining URLs are still visited and each
// probe reports CANCELLED straight away.
// =============================================================================

use std::pin::pin;

use futures::{Stream, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::probe::Probe;
use crate::tracker::{StatusTracker, Summary};

pub async fn run_sequential<P, S>(probe: &P, urls: S, cancel: &CancellationToken) -> Summary
where
    P: Probe,
    S: Stream<Item = String>,
{
    debug!("running sequentially");
    let mut urls = pin!(urls);
    let mut tracker = StatusTracker::new();

    while let Some(url) = urls.next().await {
        let outcome = probe.probe(url, cancel).await;
        tracker.track(&outcome);
    }

    tracker.summary()
}
