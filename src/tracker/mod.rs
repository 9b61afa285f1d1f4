// src/tracker/mod.rs
// =============================================================================
// This module keeps the running counters for a probing run.
//
// There is exactly one StatusTracker per run and exactly one place that
// feeds it: the dispatcher's consumer loop. Workers never touch it; they
// send their outcomes over a channel instead. That's why there is no Mutex
// in here, just a plain `&mut self`.
//
// The counters always satisfy: total == ok + errors + cancelled
//
// Rust concepts:
// - &mut self: the borrow checker guarantees a single writer
// - BTreeMap: a sorted map, so the code histogram prints in order
// =============================================================================

mod summary;

use std::collections::BTreeMap;
use tracing::info;

use crate::probe::{OutcomeKind, ProbeOutcome};

pub use summary::Summary;

/// Run-wide counters, updated once per finished probe
#[derive(Debug, Default)]
pub struct StatusTracker {
    total: usize,
    ok: usize,
    errors: usize,
    cancelled: usize,
    codes: BTreeMap<u16, usize>,
}

impl StatusTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one outcome and logs it
    ///
    /// Outcomes are applied in the order they arrive, which under
    /// parallelism is completion order, not input order.
    pub fn track(&mut self, outcome: &ProbeOutcome) {
        self.total += 1;

        // Any response counts towards the histogram, good or bad
        if let Some(code) = outcome.response_code {
            *self.codes.entry(code).or_insert(0) += 1;
        }

        let elapsed_ms = outcome.duration.as_millis() as u64;
        match (outcome.kind(), &outcome.error) {
            (OutcomeKind::Ok, _) => {
                self.ok += 1;
                info!(url = %outcome.url, elapsed_ms, "OK");
            }
            (OutcomeKind::Cancelled, _) => {
                self.cancelled += 1;
                info!(url = %outcome.url, elapsed_ms, "CANCELLED");
            }
            (OutcomeKind::Failed, error) => {
                self.errors += 1;
                let error = error.as_ref().map(ToString::to_string).unwrap_or_default();
                info!(url = %outcome.url, elapsed_ms, %error, "NOT OK");
            }
        }
    }

    /// Successes so far; the dispatcher compares this to the threshold
    pub fn success_count(&self) -> usize {
        self.ok
    }

    pub fn summary(&self) -> Summary {
        Summary {
            total: self.total,
            ok: self.ok,
            errors: self.errors,
            cancelled: self.cancelled,
            codes: self.codes.clone(),
        }
    }
}
