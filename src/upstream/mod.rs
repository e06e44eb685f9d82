//! Upstream fetch module
//!
//! Issues the outbound GET for proxied requests and turns the result into
//! an envelope (or a held-open response in streaming mode). One attempt
//! per request; a failed fetch is terminal.

pub mod envelope;

pub use envelope::{Envelope, PayloadKind};

use crate::config::TransferMode;
use crate::logger;
use reqwest::redirect::Policy;
use reqwest::Client;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Client-wide fetch deadline; individual fetches override it
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(20_000);

/// Chunk interval for buffered-download progress logging
const PROGRESS_CHUNK_INTERVAL: usize = 50;

/// Terminal fetch failures. Malformed upstream JSON is not one of these;
/// it is downgraded to an [`Envelope::InvalidJson`] outcome.
#[derive(Debug, Error)]
pub enum FetchError {
    /// No response completed within the per-request deadline
    #[error("Request timeout")]
    Timeout,
    /// DNS, connect, TLS or read failure from the transport
    #[error("{0}")]
    Transport(reqwest::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(err)
        }
    }
}

/// Outcome of a successful fetch
pub enum FetchOutcome {
    /// Fully buffered envelope, ready to serialize
    Envelope(Envelope),
    /// Binary upstream held open for stream-through (streaming mode)
    BinaryStream(reqwest::Response),
}

/// Build the process-wide outbound client
///
/// The target URL is caller-supplied and unrestricted; redirects are not
/// followed, so a redirecting upstream surfaces as its 3xx body.
pub fn build_client() -> reqwest::Result<Client> {
    Client::builder()
        .redirect(Policy::none())
        .timeout(DEFAULT_TIMEOUT)
        .build()
}

/// Fetch `url` and classify the response
///
/// The timeout covers the whole operation, body included; expiry aborts
/// the in-flight request. Binary bodies are buffered chunk by chunk and
/// only encoded once the stream completes, so the buffered byte count is
/// exactly the sum of the received chunk lengths.
pub async fn fetch(
    client: &Client,
    url: &str,
    timeout: Duration,
    transfer: TransferMode,
) -> Result<FetchOutcome, FetchError> {
    let started = Instant::now();
    logger::log_proxy_fetch(url);

    let mut response = client.get(url).timeout(timeout).send().await?;
    let upstream_status = response.status().as_u16();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    logger::log_proxy_upstream(upstream_status, &content_type);

    match PayloadKind::classify(&content_type) {
        PayloadKind::Binary => {
            if transfer == TransferMode::Streaming {
                return Ok(FetchOutcome::BinaryStream(response));
            }

            let mut payload: Vec<u8> = Vec::new();
            let mut chunks = 0usize;
            while let Some(chunk) = response.chunk().await? {
                payload.extend_from_slice(&chunk);
                chunks += 1;
                if chunks % PROGRESS_CHUNK_INTERVAL == 0 {
                    logger::log_proxy_progress(chunks, payload.len());
                }
            }
            logger::log_proxy_video_complete(payload.len(), started.elapsed());

            Ok(FetchOutcome::Envelope(Envelope::video(&payload)))
        }
        PayloadKind::Textual => {
            let mut raw: Vec<u8> = Vec::new();
            while let Some(chunk) = response.chunk().await? {
                raw.extend_from_slice(&chunk);
            }
            let text = String::from_utf8_lossy(&raw);

            let envelope = Envelope::from_text(&text, upstream_status);
            if envelope.is_parse_failure() {
                logger::log_proxy_parse_failure(started.elapsed());
            } else {
                logger::log_proxy_json_complete(started.elapsed());
            }

            Ok(FetchOutcome::Envelope(envelope))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_error_message() {
        assert_eq!(FetchError::Timeout.to_string(), "Request timeout");
    }

    #[test]
    fn test_default_timeout() {
        assert_eq!(DEFAULT_TIMEOUT, Duration::from_secs(20));
    }

    #[test]
    fn test_client_builds() {
        assert!(build_client().is_ok());
    }
}
