// src/probe/mod.rs
// =============================================================================
// This module contains the existence check performed against each URL.
//
// Submodules:
// - outcome: the result record (ProbeOutcome) and its error type
// - head: the real implementation, an HTTP HEAD request via reqwest
//
// The dispatcher never talks to reqwest directly. It only knows the Probe
// trait below, so tests can swap in stubs that answer instantly, fail on
// purpose or count how many calls are in flight.
//
// Rust concepts:
// - Traits: a shared interface implemented by different types
// - impl Future in traits: async methods without boxing
// =============================================================================

mod head;
mod outcome;

use std::future::Future;
use tokio_util::sync::CancellationToken;

pub use head::HeadProbe;
pub use outcome::{OutcomeKind, ProbeError, ProbeOutcome};

/// One existence check against one URL
///
/// Implementations must never fail: every exit path turns into a
/// ProbeOutcome. When `cancel` fires they must return promptly with
/// ProbeError::Cancelled instead of waiting for the network.
pub trait Probe: Send + Sync + 'static {
    fn probe(
        &self,
        url: String,
        cancel: &CancellationToken,
    ) -> impl Future<Output = ProbeOutcome> + Send;
}
