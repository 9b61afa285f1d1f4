// src/dispatch/stub.rs
// Deterministic Probe used by the dispatcher tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

use crate::probe::{Probe, ProbeError, ProbeOutcome};

#[derive(Debug, Clone, Copy)]
pub enum Reply {
    Status(u16),
    Transport,
    Panic,
}

type Respond = Box<dyn Fn(&str) -> (Reply, Duration) + Send + Sync>;

/// Answers each URL with a scripted reply after a scripted delay
///
/// The delay is cancel-aware, like a real network wait. The stub also
/// records call order and the peak number of concurrent calls.
pub struct StubProbe {
    respond: Respond,
    calls: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl StubProbe {
    pub fn new(respond: impl Fn(&str) -> (Reply, Duration) + Send + Sync + 'static) -> Self {
        StubProbe {
            respond: Box::new(respond),
            calls: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }

    pub fn always(reply: Reply) -> Self {
        Self::new(move |_| (reply, Duration::ZERO))
    }

    /// URLs in the order their probes started
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

impl Probe for StubProbe {
    async fn probe(&self, url: String, cancel: &CancellationToken) -> ProbeOutcome {
        let started = Instant::now();
        self.calls.lock().unwrap().push(url.clone());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        let (reply, delay) = (self.respond)(&url);

        let outcome = if cancel.is_cancelled() {
            ProbeOutcome::cancelled(url, started.elapsed())
        } else {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => ProbeOutcome::cancelled(url, started.elapsed()),
                _ = tokio::time::sleep(delay) => match reply {
                    Reply::Status(code) => ProbeOutcome::from_status(url, code, started.elapsed()),
                    Reply::Transport => ProbeOutcome::from_error(
                        url,
                        ProbeError::Transport("connection refused".into()),
                        started.elapsed(),
                    ),
                    Reply::Panic => panic!("stub probe asked to panic for {url}"),
                },
            }
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        outcome
    }
}
