//! REST implementation of [`DocumentSource`].
//!
//! `RestFigmaClient` wraps a `reqwest::Client` and fetches file trees from
//! the Figma files endpoint, with automatic retry + exponential back-off on
//! transient (5xx / timeout / connection) failures.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use fc_domain::config::FigmaConfig;
use fc_domain::error::{Error, Result};
use fc_domain::node::{Document, FileResponse};
use fc_domain::trace::TraceEvent;
use fc_traversal::DocumentSource;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::Deserialize;
use uuid::Uuid;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Client
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A REST client for the Figma files API.
///
/// Created once and reused for the lifetime of the server process.
/// The underlying `reqwest::Client` maintains a connection pool.
#[derive(Debug, Clone)]
pub struct RestFigmaClient {
    http: Client,
    base_url: String,
    token: Option<String>,
    timeout: Duration,
    max_retries: u32,
}

impl RestFigmaClient {
    /// Build a new client from `FigmaConfig`, reading the token from the
    /// configured environment variable.
    pub fn new(cfg: &FigmaConfig) -> Result<Self> {
        let timeout = Duration::from_millis(cfg.timeout_ms);
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("building HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: cfg.base_url.trim_end_matches('/').to_owned(),
            token: cfg.token(),
            timeout,
            max_retries: cfg.max_retries,
        })
    }

    /// Override the access token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// The configured request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    // ── request helpers ──────────────────────────────────────────────

    fn decorate(&self, rb: RequestBuilder) -> RequestBuilder {
        let mut rb = rb.header("X-Request-Id", Uuid::new_v4().to_string());
        if let Some(ref token) = self.token {
            rb = rb.header("X-Figma-Token", token);
        }
        rb
    }

    /// `{base}/v1/files/{file_key}`, with the key percent-encoded as a
    /// single path segment.
    fn file_url(&self, file_key: &str) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| Error::Config(format!("invalid base_url {:?}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|()| Error::Config(format!("base_url {:?} cannot take a path", self.base_url)))?
            .pop_if_empty()
            .extend(["v1", "files", file_key]);
        Ok(url)
    }

    // ── retry engine ─────────────────────────────────────────────────

    /// Execute a request with retry + exponential back-off.
    ///
    /// * Retries on 5xx status codes, timeouts and connection errors.
    /// * Does **not** retry on 4xx.
    /// * Emits a `TraceEvent::UpstreamCall` after every attempt.
    async fn execute_with_retry(
        &self,
        endpoint: &str,
        build_request: impl Fn() -> RequestBuilder,
    ) -> Result<Response> {
        let mut last_err: Option<Error> = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let backoff = Duration::from_millis(100 * 2u64.pow(attempt - 1));
                tracing::warn!(endpoint, attempt, ?backoff, "retrying upstream call");
                tokio::time::sleep(backoff).await;
            }

            let start = Instant::now();
            let result = self.decorate(build_request()).send().await;
            let duration_ms = start.elapsed().as_millis() as u64;

            match result {
                Ok(resp) => {
                    let status = resp.status();

                    TraceEvent::UpstreamCall {
                        endpoint: endpoint.to_owned(),
                        status: status.as_u16(),
                        duration_ms,
                        attempt,
                    }
                    .emit();

                    if status.is_server_error() {
                        let body = resp.text().await.unwrap_or_default();
                        last_err = Some(Error::UpstreamUnavailable {
                            status: Some(status.as_u16()),
                            message: format!("{endpoint}: {body}"),
                        });
                        continue;
                    }

                    if status.is_client_error() {
                        let body = resp.text().await.unwrap_or_default();
                        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                            return Err(Error::Auth(format!(
                                "{endpoint} rejected credentials ({status}): {body}"
                            )));
                        }
                        return Err(Error::UpstreamUnavailable {
                            status: Some(status.as_u16()),
                            message: format!("{endpoint}: {body}"),
                        });
                    }

                    return Ok(resp);
                }
                Err(e) => {
                    TraceEvent::UpstreamCall {
                        endpoint: endpoint.to_owned(),
                        status: e.status().map(|s| s.as_u16()).unwrap_or(0),
                        duration_ms,
                        attempt,
                    }
                    .emit();

                    last_err = Some(from_reqwest(endpoint, e));
                }
            }
        }

        Err(last_err.unwrap_or_else(|| Error::UpstreamUnavailable {
            status: None,
            message: format!("{endpoint}: all retries exhausted"),
        }))
    }

    /// Fetch the file envelope, `depth` levels deep (`None` = full tree).
    pub async fn get_file(&self, file_key: &str, depth: Option<u32>) -> Result<FileResponse> {
        if file_key.trim().is_empty() {
            return Err(Error::InvalidArgument("file key must not be empty".into()));
        }

        let url = self.file_url(file_key)?;
        let endpoint = format!("GET {}", url.path());
        let resp = self
            .execute_with_retry(&endpoint, || {
                let rb = self.http.get(url.clone());
                match depth {
                    Some(d) => rb.query(&[("depth", d)]),
                    None => rb,
                }
            })
            .await?;

        let body = resp.text().await.map_err(|e| from_reqwest(&endpoint, e))?;
        decode_file(&body)
    }
}

/// Decode a file envelope of any nesting depth.
///
/// Node trees routinely nest deeper than serde_json's default recursion
/// limit; the limit is lifted and the stack grows on demand instead.
pub fn decode_file(body: &str) -> Result<FileResponse> {
    let mut de = serde_json::Deserializer::from_str(body);
    de.disable_recursion_limit();
    let file = FileResponse::deserialize(serde_stacker::Deserializer::new(&mut de))
        .and_then(|file| de.end().map(|()| file))
        .map_err(|e| Error::InvalidUpstreamData(format!("failed to parse file response: {e}")))?;
    Ok(file)
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Trait implementation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[async_trait]
impl DocumentSource for RestFigmaClient {
    async fn fetch_document(&self, file_key: &str, depth: Option<u32>) -> Result<Document> {
        self.get_file(file_key, depth).await?.into_document()
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Error conversion helper
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Convert a `reqwest::Error` into `UpstreamUnavailable`, keeping the cause text.
pub fn from_reqwest(endpoint: &str, e: reqwest::Error) -> Error {
    let kind = if e.is_timeout() {
        "timed out"
    } else if e.is_connect() {
        "connection failed"
    } else {
        "request failed"
    };
    Error::UpstreamUnavailable {
        status: e.status().map(|s| s.as_u16()),
        message: format!("{endpoint} {kind}: {e}"),
    }
}
