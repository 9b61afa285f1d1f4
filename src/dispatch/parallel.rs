// src/dispatch/parallel.rs
// =============================================================================
// Bounded-parallel probing with an optional early stop.
//
// How it works:
// 1. A producer task pulls URLs from the input stream. Before each URL it
//    takes a slot from a Semaphore with `concurrency` permits, so it simply
//    waits whenever N probes are already running (backpressure).
// 2. Each URL gets its own task. The task probes, then sends its outcome
//    over a capacity-1 channel and only then gives its slot back.
// 3. The calling task is the single consumer. It feeds every outcome to the
//    StatusTracker and, once `max_successes` OKs have been seen, cancels the
//    run token.
// 4. Cancelling the token makes in-flight probes return CANCELLED and stops
//    the producer from pulling any more URLs.
// 5. The producer waits for every task it launched, then drops its Sender.
//    The channel closes, the consumer loop ends, and we have a summary.
//
// Every launched URL yields exactly one outcome. URLs never launched because
// of an early stop yield nothing and don't appear in the summary at all.
//
// Rust concepts:
// - tokio::sync::Semaphore: a counter of available slots
// - tokio::task::JoinSet: a group of tasks we can wait on together
// - mpsc channel: many senders, one receiver
// - CancellationToken::child_token(): cancelling the child leaves the parent alone
// =============================================================================

use std::pin::pin;
use std::sync::Arc;

use futures::{Stream, StreamExt};
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::probe::{Probe, ProbeOutcome};
use crate::tracker::{StatusTracker, Summary};

pub async fn run_parallel<P, S>(
    probe: Arc<P>,
    urls: S,
    concurrency: usize,
    max_successes: Option<usize>,
    parent: &CancellationToken,
) -> Summary
where
    P: Probe,
    S: Stream<Item = String> + Send + 'static,
{
    let run_token = parent.child_token();

    // tokio has no zero-capacity channel; 1 is as close to a rendezvous as it gets
    let (outcomes, mut received) = mpsc::channel::<ProbeOutcome>(1);

    let producer = tokio::spawn(feed(
        probe,
        urls,
        concurrency.max(1),
        outcomes,
        run_token.clone(),
    ));

    let mut tracker = StatusTracker::new();
    while let Some(outcome) = received.recv().await {
        tracker.track(&outcome);

        if let Some(max) = max_successes {
            if tracker.success_count() >= max && !run_token.is_cancelled() {
                info!(max, "Success threshold reached, cancelling remaining probes");
                run_token.cancel();
            }
        }
    }

    if let Err(e) = producer.await {
        warn!(error = %e, "URL producer failed");
    }
    run_token.cancel();

    tracker.summary()
}

// The producer side: launches one task per URL under the limiter
async fn feed<P, S>(
    probe: Arc<P>,
    urls: S,
    concurrency: usize,
    outcomes: mpsc::Sender<ProbeOutcome>,
    cancel: CancellationToken,
) where
    P: Probe,
    S: Stream<Item = String> + Send + 'static,
{
    let mut urls = pin!(urls);
    let limiter = Arc::new(Semaphore::new(concurrency));
    let mut tasks = JoinSet::new();
    let mut launched = 0usize;

    loop {
        // Take a slot first so no URL is pulled that we'd have to drop
        let permit = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            permit = Arc::clone(&limiter).acquire_owned() => match permit {
                Ok(permit) => permit,
                Err(_) => break,
            },
        };

        let url = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            next = urls.next() => match next {
                Some(url) => url,
                None => break,
            },
        };

        if cancel.is_cancelled() {
            break;
        }

        let probe = Arc::clone(&probe);
        let tx = outcomes.clone();
        let token = cancel.clone();
        tasks.spawn(async move {
            let outcome = probe.probe(url, &token).await;
            // Fails only if the consumer is gone, and then nobody is counting
            let _ = tx.send(outcome).await;
            drop(permit);
        });
        launched += 1;
    }

    debug!(launched, "Stopped launching probes, waiting for the rest");

    // A panicking probe loses its own outcome but never its siblings'
    while let Some(joined) = tasks.join_next().await {
        if let Err(e) = joined {
            warn!(error = %e, "Probe task failed");
        }
    }

    // `outcomes` is dropped on return, which closes the channel
}
