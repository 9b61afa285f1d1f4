// src/input/stream.rs
// =============================================================================
// Feeds URLs to the dispatcher through a channel.
//
// A small task pushes the URLs into a bounded channel and closes it at the
// end of input; the dispatcher reads the other end as a Stream. The channel
// has room for one URL, so the feeder only ever runs one step ahead of the
// dispatcher. If the dispatcher stops early and drops the stream, the
// feeder's next send fails and it quits.
// =============================================================================

use futures::{stream, Stream};
use tokio::sync::mpsc;
use tracing::debug;

pub fn stream_urls(urls: Vec<String>) -> impl Stream<Item = String> + Send + 'static {
    let (tx, rx) = mpsc::channel::<String>(1);

    tokio::spawn(async move {
        let total = urls.len();
        let mut sent = 0usize;
        for url in urls {
            if tx.send(url).await.is_err() {
                break;
            }
            sent += 1;
        }
        debug!(sent, total, "URL feeder finished");
        // Dropping `tx` closes the channel: end of input
    });

    stream::unfold(rx, |mut rx| async move { rx.recv().await.map(|url| (url, rx)) })
}
