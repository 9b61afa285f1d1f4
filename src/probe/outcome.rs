// src/probe/outcome.rs
// =============================================================================
// The result record of a single probe.
//
// Every probe ends in exactly one of three ways:
// - a 200 response            -> success, code recorded, no error
// - any other response         -> code recorded AND a Status error
// - no response at all         -> no code, an error explaining why
//
// "No response" splits further into cancellation (the run was stopped) and
// plain transport failures. The tracker counts those two separately, so the
// distinction lives in the error type itself.
//
// Rust concepts:
// - Option<u16>: the response code is either there or it isn't
// - thiserror: derive Display/Error for our error enum
// =============================================================================

use std::time::Duration;
use thiserror::Error;

/// The only status code that counts as success
pub const SUCCESS_STATUS: u16 = 200;

/// Why a probe did not succeed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    /// The run was cancelled before or while the request was in flight
    #[error("cancelled")]
    Cancelled,

    /// A response came back, but not with 200
    #[error("non 200 status code returned: {0}")]
    Status(u16),

    /// The request could not even be built (bad URL, unsupported scheme)
    #[error("cannot create HEAD request: {0}")]
    InvalidRequest(String),

    /// The per-probe timeout elapsed
    #[error("cannot HEAD: timed out after {0:?}")]
    Timeout(Duration),

    /// DNS, connection refused, TLS and everything else
    #[error("cannot HEAD: {0}")]
    Transport(String),
}

impl ProbeError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ProbeError::Cancelled)
    }
}

/// How the tracker classifies an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    Ok,
    Failed,
    Cancelled,
}

/// The classified result of one probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    /// The URL that was probed
    pub url: String,
    /// Present only if a response was received (successful or not)
    pub response_code: Option<u16>,
    /// Wall-clock time spent on the attempt
    pub duration: Duration,
    /// Absent on success
    pub error: Option<ProbeError>,
}

impl ProbeOutcome {
    /// Builds the outcome for a received response
    ///
    /// The code is recorded either way; anything but 200 also carries an error.
    pub fn from_status(url: String, code: u16, duration: Duration) -> Self {
        let error = (code != SUCCESS_STATUS).then_some(ProbeError::Status(code));
        ProbeOutcome {
            url,
            response_code: Some(code),
            duration,
            error,
        }
    }

    /// Builds the outcome for an attempt that never got a response
    pub fn from_error(url: String, error: ProbeError, duration: Duration) -> Self {
        ProbeOutcome {
            url,
            response_code: None,
            duration,
            error: Some(error),
        }
    }

    pub fn cancelled(url: String, duration: Duration) -> Self {
        Self::from_error(url, ProbeError::Cancelled, duration)
    }

    pub fn kind(&self) -> OutcomeKind {
        match &self.error {
            None => OutcomeKind::Ok,
            Some(e) if e.is_cancelled() => OutcomeKind::Cancelled,
            Some(_) => OutcomeKind::Failed,
        }
    }
}
