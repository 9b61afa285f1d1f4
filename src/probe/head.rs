// src/probe/head.rs
// =============================================================================
// This module checks if a URL exists by making an HTTP HEAD request.
//
// Key functionality:
// - HEAD only (lightweight, no body download)
// - One shared client for the whole run (connection pooling)
// - A timeout per request, not per run
// - Gives up immediately when the run's CancellationToken fires
//
// Rust concepts:
// - tokio::select!: race two futures, keep whichever finishes first
// - Dropping a future: cancels the work it was doing
// - Error chains: std::error::Error::source()
// =============================================================================

use std::fmt::Write;
use std::time::{Duration, Instant};

use reqwest::Client;
use tokio_util::sync::CancellationToken;
use url::Url;

use super::outcome::{ProbeError, ProbeOutcome};
use super::Probe;

/// Probes URLs with HEAD requests through a shared reqwest client
#[derive(Debug, Clone)]
pub struct HeadProbe {
    client: Client,
    timeout: Duration,
}

impl HeadProbe {
    /// Builds a probe with its own client
    ///
    /// The timeout bounds each attempt (connect + response).
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .redirect(reqwest::redirect::Policy::limited(5)) // Follow up to 5 redirects
            .build()?;
        Ok(Self::with_client(client, timeout))
    }

    pub fn with_client(client: Client, timeout: Duration) -> Self {
        HeadProbe { client, timeout }
    }
}

impl Probe for HeadProbe {
    async fn probe(&self, url: String, cancel: &CancellationToken) -> ProbeOutcome {
        let started = Instant::now();

        // Never start a request for a run that's already been stopped
        if cancel.is_cancelled() {
            return ProbeOutcome::cancelled(url, started.elapsed());
        }

        let target = match parse_target(&url) {
            Ok(target) => target,
            Err(e) => return ProbeOutcome::from_error(url, e, started.elapsed()),
        };

        let request = self.client.head(target).timeout(self.timeout).send();

        // If the token wins, `request` is dropped here, which aborts the
        // request and hands its connection back.
        tokio::select! {
            biased;
            _ = cancel.cancelled() => ProbeOutcome::cancelled(url, started.elapsed()),
            result = request => match result {
                Ok(response) => {
                    ProbeOutcome::from_status(url, response.status().as_u16(), started.elapsed())
                }
                Err(e) => {
                    let error = categorize_error(&e, self.timeout);
                    ProbeOutcome::from_error(url, error, started.elapsed())
                }
            },
        }
    }
}

// Only absolute http(s) URLs can be HEAD-requested
fn parse_target(url: &str) -> Result<Url, ProbeError> {
    let parsed = Url::parse(url).map_err(|e| ProbeError::InvalidRequest(format!("{url:?}: {e}")))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(ProbeError::InvalidRequest(format!(
            "unsupported scheme {other:?} in {url}"
        ))),
    }
}

// Maps reqwest errors onto our taxonomy
//
// reqwest errors can happen for many reasons:
// - Network timeout (our per-probe limit)
// - DNS resolution failure
// - Connection refused / reset
// - SSL certificate issues
// Only the timeout gets its own variant; the rest are transport failures.
fn categorize_error(error: &reqwest::Error, timeout: Duration) -> ProbeError {
    if error.is_timeout() {
        ProbeError::Timeout(timeout)
    } else {
        ProbeError::Transport(report(error))
    }
}

// Flattens an error and all its causes into one line
fn report(mut err: &(dyn std::error::Error + 'static)) -> String {
    let mut s = err.to_string();
    while let Some(src) = err.source() {
        let _ = write!(s, ": {}", src);
        err = src;
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::OutcomeKind;
    use wiremock::{matchers::method, Mock, MockServer, ResponseTemplate};

    async fn server_answering(template: ResponseTemplate) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .respond_with(template)
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn test_head_200_is_success() {
        let server = server_answering(ResponseTemplate::new(200)).await;
        let probe = HeadProbe::new(Duration::from_secs(5)).unwrap();

        let outcome = probe.probe(server.uri(), &CancellationToken::new()).await;

        assert_eq!(outcome.kind(), OutcomeKind::Ok);
        assert_eq!(outcome.response_code, Some(200));
        assert_eq!(outcome.url, server.uri());
    }

    #[tokio::test]
    async fn test_head_404_keeps_code() {
        let server = server_answering(ResponseTemplate::new(404)).await;
        let probe = HeadProbe::new(Duration::from_secs(5)).unwrap();

        let outcome = probe.probe(server.uri(), &CancellationToken::new()).await;

        assert_eq!(outcome.kind(), OutcomeKind::Failed);
        assert_eq!(outcome.response_code, Some(404));
        assert_eq!(outcome.error, Some(ProbeError::Status(404)));
    }

    #[tokio::test]
    async fn test_slow_server_times_out() {
        let server =
            server_answering(ResponseTemplate::new(200).set_delay(Duration::from_secs(3))).await;
        let probe = HeadProbe::new(Duration::from_millis(100)).unwrap();

        let outcome = probe.probe(server.uri(), &CancellationToken::new()).await;

        assert_eq!(outcome.response_code, None);
        assert_eq!(
            outcome.error,
            Some(ProbeError::Timeout(Duration::from_millis(100)))
        );
    }

    #[tokio::test]
    async fn test_cancel_mid_flight_returns_promptly() {
        let server =
            server_answering(ResponseTemplate::new(200).set_delay(Duration::from_secs(5))).await;
        let probe = HeadProbe::new(Duration::from_secs(10)).unwrap();
        let token = CancellationToken::new();

        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            canceller.cancel();
        });

        let started = Instant::now();
        let outcome = probe.probe(server.uri(), &token).await;

        assert_eq!(outcome.kind(), OutcomeKind::Cancelled);
        assert_eq!(outcome.response_code, None);
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_already_cancelled_never_sends() {
        let server = server_answering(ResponseTemplate::new(200)).await;
        let probe = HeadProbe::new(Duration::from_secs(5)).unwrap();
        let token = CancellationToken::new();
        token.cancel();

        let outcome = probe.probe(server.uri(), &token).await;

        assert_eq!(outcome.kind(), OutcomeKind::Cancelled);
        let received = server.received_requests().await.unwrap();
        assert!(received.is_empty());
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_failure() {
        let probe = HeadProbe::new(Duration::from_secs(5)).unwrap();

        // Port 1 is reserved and nothing listens on it
        let outcome = probe
            .probe("http://127.0.0.1:1/".to_string(), &CancellationToken::new())
            .await;

        assert_eq!(outcome.response_code, None);
        assert!(matches!(outcome.error, Some(ProbeError::Transport(_))));
    }

    #[tokio::test]
    async fn test_malformed_url_is_invalid_request() {
        let probe = HeadProbe::new(Duration::from_secs(5)).unwrap();
        let token = CancellationToken::new();

        let outcome = probe.probe("not a url".to_string(), &token).await;
        assert!(matches!(outcome.error, Some(ProbeError::InvalidRequest(_))));

        let outcome = probe.probe("ftp://example.com/file".to_string(), &token).await;
        assert!(matches!(outcome.error, Some(ProbeError::InvalidRequest(_))));
        assert_eq!(outcome.kind(), OutcomeKind::Failed);
    }
}
