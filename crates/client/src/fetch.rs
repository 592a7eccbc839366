//! HTTP GET with bounded retries, a fixed inter-attempt delay, and a hard
//! per-attempt timeout.
//!
//! The delay is deliberately fixed — no exponential backoff, no jitter — so
//! the worst-case latency of a load cycle stays bounded; a status page that
//! takes minutes to give up is worse than one that fails fast.

use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const RETRY_DELAY: Duration = Duration::from_millis(2000);
pub const ATTEMPT_TIMEOUT: Duration = Duration::from_millis(15000);

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("transport error: {0}")]
    Transport(String),
}

/// Status line and body of a completed HTTP exchange. Non-2xx responses are
/// values here, not errors; only transport-level failures error.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: reqwest::StatusCode,
    pub body: String,
}

impl TransportResponse {
    pub fn is_ok(&self) -> bool {
        self.status.is_success()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Option<T> {
        serde_json::from_str(&self.body).ok()
    }
}

/// Seam between the retry policy and the network, so the policy is testable
/// against scripted transports.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<TransportResponse, FetchError>;
}

/// reqwest-backed transport. The client-level timeout bounds every attempt,
/// retried or not, at 15 seconds.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Errors when the client cannot be built (TLS backend or system
    /// configuration); there is no untimed fallback client.
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(ATTEMPT_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<TransportResponse, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        Ok(TransportResponse { status, body })
    }
}

/// Retry policy over a transport.
#[derive(Debug, Clone)]
pub struct Fetcher<T> {
    transport: T,
    max_retries: u32,
    retry_delay: Duration,
}

impl<T: Transport> Fetcher<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: RETRY_DELAY,
        }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Bounded fixed-delay retry.
    ///
    /// An ok response returns immediately. On the final attempt a non-ok
    /// response is returned as-is so the caller can inspect the status,
    /// while a transport error propagates.
    pub async fn fetch(&self, url: &str) -> Result<TransportResponse, FetchError> {
        let mut attempt = 1;
        loop {
            match self.transport.get(url).await {
                Ok(response) if response.is_ok() => return Ok(response),
                Ok(response) => {
                    if attempt >= self.max_retries {
                        return Ok(response);
                    }
                    warn!(
                        url,
                        status = %response.status,
                        attempt,
                        max_retries = self.max_retries,
                        "fetch returned non-ok status, retrying"
                    );
                }
                Err(error) => {
                    if attempt >= self.max_retries {
                        return Err(error);
                    }
                    warn!(
                        url,
                        error = %error,
                        attempt,
                        max_retries = self.max_retries,
                        "fetch failed, retrying"
                    );
                }
            }
            tokio::time::sleep(self.retry_delay).await;
            attempt += 1;
        }
    }

    /// Single-attempt fetch decoded as JSON, used by the best-effort
    /// enrichment phase; any failure degrades to `None` with a warning.
    /// Still bounded by the transport timeout.
    pub async fn fetch_json_once<V: DeserializeOwned>(&self, url: &str) -> Option<V> {
        match self.transport.get(url).await {
            Ok(response) if response.is_ok() => {
                let decoded = response.json();
                if decoded.is_none() {
                    warn!(url, "response body could not be decoded");
                }
                decoded
            }
            Ok(response) => {
                warn!(url, status = %response.status, "fetch returned non-ok status");
                None
            }
            Err(error) => {
                warn!(url, error = %error, "fetch failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::time::Instant;

    fn ok_response(body: &str) -> TransportResponse {
        TransportResponse {
            status: StatusCode::OK,
            body: body.to_owned(),
        }
    }

    fn error_response(status: StatusCode) -> TransportResponse {
        TransportResponse {
            status,
            body: String::new(),
        }
    }

    #[derive(Default)]
    struct ScriptedTransport {
        steps: Mutex<VecDeque<Result<TransportResponse, String>>>,
        attempts: AtomicU32,
    }

    impl ScriptedTransport {
        fn new(steps: Vec<Result<TransportResponse, String>>) -> Self {
            Self {
                steps: Mutex::new(steps.into_iter().collect()),
                attempts: AtomicU32::new(0),
            }
        }

        fn attempts(&self) -> u32 {
            self.attempts.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl Transport for ScriptedTransport {
        async fn get(&self, _url: &str) -> Result<TransportResponse, FetchError> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            let step = match self.steps.lock() {
                Ok(mut steps) => steps.pop_front(),
                Err(_) => None,
            };
            match step {
                Some(Ok(response)) => Ok(response),
                Some(Err(message)) => Err(FetchError::Transport(message)),
                None => Err(FetchError::Transport("script exhausted".to_owned())),
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn returns_success_after_two_failures() {
        let transport = ScriptedTransport::new(vec![
            Err("connection refused".to_owned()),
            Err("connection refused".to_owned()),
            Ok(ok_response("{}")),
        ]);
        let fetcher = Fetcher::new(transport);

        let result = fetcher.fetch("http://example/status").await;
        assert!(result.is_ok());
        let response = match result {
            Ok(response) => response,
            Err(_) => return,
        };
        assert!(response.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn propagates_transport_error_after_max_retries() {
        let transport = ScriptedTransport::new(vec![
            Err("unreachable".to_owned()),
            Err("unreachable".to_owned()),
            Err("unreachable".to_owned()),
        ]);
        let fetcher = Fetcher::new(transport);

        let started = Instant::now();
        let result = fetcher.fetch("http://example/status").await;
        let elapsed = started.elapsed();

        assert!(result.is_err());
        assert_eq!(fetcher.transport.attempts(), 3);
        // two inter-attempt delays of 2000ms each
        assert!(elapsed >= Duration::from_millis(4000));
    }

    #[tokio::test(start_paused = true)]
    async fn final_http_error_response_is_returned_as_is() {
        let transport = ScriptedTransport::new(vec![
            Ok(error_response(StatusCode::SERVICE_UNAVAILABLE)),
            Ok(error_response(StatusCode::SERVICE_UNAVAILABLE)),
            Ok(error_response(StatusCode::SERVICE_UNAVAILABLE)),
        ]);
        let fetcher = Fetcher::new(transport);

        let result = fetcher.fetch("http://example/status").await;
        let response = match result {
            Ok(response) => response,
            Err(_) => return,
        };
        assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(fetcher.transport.attempts(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn ok_response_short_circuits_remaining_attempts() {
        let transport = ScriptedTransport::new(vec![Ok(ok_response("{}"))]);
        let fetcher = Fetcher::new(transport);

        let started = Instant::now();
        let result = fetcher.fetch("http://example/status").await;
        assert!(result.is_ok());
        assert_eq!(fetcher.transport.attempts(), 1);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[test]
    fn http_transport_builds_with_its_timeout() {
        assert!(HttpTransport::new().is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn fetch_json_once_degrades_to_none_on_http_error() {
        let transport = ScriptedTransport::new(vec![Ok(error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
        ))]);
        let fetcher = Fetcher::new(transport);

        let decoded: Option<serde_json::Value> = fetcher.fetch_json_once("http://example/x").await;
        assert!(decoded.is_none());
        assert_eq!(fetcher.transport.attempts(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn fetch_json_once_never_retries() {
        let transport = ScriptedTransport::new(vec![
            Err("unreachable".to_owned()),
            Ok(ok_response("{}")),
        ]);
        let fetcher = Fetcher::new(transport);

        let decoded: Option<serde_json::Value> = fetcher.fetch_json_once("http://example/x").await;
        assert!(decoded.is_none());
        assert_eq!(fetcher.transport.attempts(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn fetch_json_once_decodes_successful_body() {
        let transport = ScriptedTransport::new(vec![Ok(ok_response(r#"{"hub":"EU"}"#))]);
        let fetcher = Fetcher::new(transport);

        let decoded: Option<serde_json::Value> = fetcher.fetch_json_once("http://example/x").await;
        assert_eq!(
            decoded.and_then(|value| value.get("hub").cloned()),
            Some(serde_json::Value::String("EU".to_owned()))
        );
    }
}
