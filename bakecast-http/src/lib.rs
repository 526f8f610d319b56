//! Minimal HTTP client with safe logging and pre-signed auth.
//!
//! - Request options: `Auth`, query params, absolute URLs
//! - Redacts sensitive query params and never logs secret values
//! - JSON, raw bytes, and multipart helpers
//! - Optional *raw* request/response logging via `BAKECAST_HTTP_RAW=1`
//!
//! Every request is sent exactly once. Callers that want retries wrap the
//! call themselves; bakecast deliberately does not.
//!
//! Example (no_run):
//! ```rust
//! # async fn demo() -> Result<(), bakecast_http::HttpError> {
//! let client = bakecast_http::HttpClient::new("https://api.example.com")?;
//! let got: serde_json::Value = client
//!     .get_json("v1/items", bakecast_http::RequestOpts::default())
//!     .await?;
//! # Ok(()) }
//! ```
//!
//! Security: `Authorization` values are marked sensitive and redacted in
//! every log line; logs only record whether a request was signed.

use bytes::Bytes;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::multipart::Form;
use reqwest::{Client, Method, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::env;
use std::time::Duration;
use thiserror::Error;

mod message;

use message::{extract_error_message, snip_body, truncate_on_char_boundary};

// ==============================
// Raw logging toggles
// ==============================

const RAW_ENV: &str = "BAKECAST_HTTP_RAW";
const RAW_MAX_BODY: usize = 64 * 1024; // cap raw body logs (64 KiB)

const SECRET_QUERY_KEYS: &[&str] = &[
    "access_token",
    "authorization",
    "auth",
    "key",
    "api_key",
    "token",
    "secret",
    "client_secret",
    "bearer",
    "oauth_token",
    "oauth_signature",
];

fn raw_enabled() -> bool {
    matches!(
        env::var(RAW_ENV).as_deref(),
        Ok("1") | Ok("true") | Ok("yes")
    )
}

fn is_secret_key(key: &str) -> bool {
    let lower = key.to_ascii_lowercase();
    SECRET_QUERY_KEYS.contains(&lower.as_str())
}

/// Render a best-effort curl command for repro/debug, with secrets redacted.
fn make_curl(method: &Method, url: &Url, headers: &HeaderMap, body: Option<&[u8]>) -> String {
    let mut parts = vec!["curl".to_string(), format!("-X{}", method)];
    for (name, val) in redact_headers(headers) {
        parts.push(format!("-H '{}: {}'", name, val.replace('\'', r"'\''")));
    }
    if let Some(bytes) = body {
        if let Ok(s) = std::str::from_utf8(bytes) {
            let mut s = s.to_string();
            if truncate_on_char_boundary(&mut s, RAW_MAX_BODY) {
                s.push('…');
            }
            parts.push(format!("-d '{}'", s.replace('\'', r"'\''")));
        } else {
            parts.push(format!("--data-binary @- # ({} bytes)", bytes.len()));
        }
    }
    let (host_path, query) = redact_query(url);
    let query = query
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");
    let scheme = url.scheme();
    if query.is_empty() {
        parts.push(format!("'{scheme}://{host_path}'"));
    } else {
        parts.push(format!("'{scheme}://{host_path}?{query}'"));
    }
    parts.join(" ")
}

/// Redact sensitive headers for logging
fn redact_headers(h: &HeaderMap) -> Vec<(String, String)> {
    h.iter()
        .map(|(k, v)| {
            let key = k.as_str().to_string();
            let val = if key.eq_ignore_ascii_case("authorization") {
                let scheme = v
                    .to_str()
                    .ok()
                    .and_then(|s| s.split_whitespace().next())
                    .unwrap_or("");
                format!("{scheme} <redacted>").trim_start().to_string()
            } else {
                v.to_str().unwrap_or("").to_string()
            };
            (key, val)
        })
        .collect()
}

/// Host + path string and redacted query pairs for logging.
fn redact_query(url: &Url) -> (String, Vec<(String, String)>) {
    let host_path = format!("{}{}", url.host_str().unwrap_or("-"), url.path());
    let redacted = url
        .query_pairs()
        .map(|(k, v)| {
            let k = k.to_string();
            let v = if is_secret_key(&k) {
                "<redacted>".to_string()
            } else {
                v.to_string()
            };
            (k, v)
        })
        .collect::<Vec<_>>();
    (host_path, redacted)
}

// ==============================
// Errors
// ==============================

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("invalid URL: {0}")]
    Url(String),
    #[error("request build failed: {0}")]
    Build(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("decode error: {0}, body_snippet: {1}")]
    Decode(String, String),
    #[error("server returned error {status}: {message}, request_id={request_id}")]
    Api {
        status: StatusCode,
        message: String,
        request_id: String,
    },
}

impl HttpError {
    /// HTTP status for API errors, `None` for transport/build failures.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            HttpError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// ==============================
// Auth & Request Options
// ==============================

/// A pre-computed `Authorization` header, e.g. an OAuth 1.0a signature
/// built for exactly one request.
///
/// ```
/// use bakecast_http::Auth;
/// use reqwest::header::HeaderValue;
///
/// let auth = Auth::authorization(HeaderValue::from_static("OAuth oauth_signature=\"x\""));
/// assert!(auth.value().is_sensitive());
/// ```
#[derive(Clone, Debug)]
pub struct Auth(HeaderValue);

impl Auth {
    pub fn authorization(mut value: HeaderValue) -> Self {
        value.set_sensitive(true);
        Self(value)
    }

    pub fn value(&self) -> &HeaderValue {
        &self.0
    }
}

/// Per-request options for the HTTP client.
///
/// ```
/// use bakecast_http::RequestOpts;
/// use std::borrow::Cow;
///
/// let opts = RequestOpts {
///     query: Some(vec![("type", Cow::Borrowed("recipe"))]),
///     ..Default::default()
/// };
///
/// assert!(opts.auth.is_none());
/// assert!(!opts.allow_absolute);
/// ```
#[derive(Clone, Debug, Default)]
pub struct RequestOpts<'a> {
    pub auth: Option<Auth>,
    pub query: Option<Vec<(&'a str, Cow<'a, str>)>>, // e.g. [("type", "recipe".into())]
    /// If true and `path` is an absolute URL, use it as-is (ignore base).
    pub allow_absolute: bool,
}

enum Payload {
    Empty,
    Json(Vec<u8>),
    Multipart(Form),
}

impl Payload {
    fn is_present(&self) -> bool {
        !matches!(self, Payload::Empty)
    }
}

// ==============================
// Client
// ==============================

#[derive(Clone)]
pub struct HttpClient {
    base: Url,
    inner: Client,
    pub default_timeout: Duration,
}

impl HttpClient {
    /// Construct a client anchored to a base URL.
    ///
    /// ```no_run
    /// use bakecast_http::{HttpClient, HttpError};
    /// use std::time::Duration;
    ///
    /// let client = HttpClient::new("https://api.example.com")?;
    /// assert_eq!(client.default_timeout, Duration::from_secs(30));
    /// # Ok::<(), HttpError>(())
    /// ```
    pub fn new(base: &str) -> Result<Self, HttpError> {
        let base = Url::parse(base).map_err(|e| HttpError::Url(e.to_string()))?;
        let inner = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .user_agent(concat!("bakecast/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| HttpError::Build(e.to_string()))?;
        Ok(Self {
            base,
            inner,
            default_timeout: Duration::from_secs(30),
        })
    }

    /// Override the default timeout returned by [`HttpClient::new`].
    ///
    /// ```no_run
    /// use bakecast_http::{HttpClient, HttpError};
    /// use std::time::Duration;
    ///
    /// let client = HttpClient::new("https://api.example.com")?
    ///     .with_timeout(Duration::from_secs(2));
    /// assert_eq!(client.default_timeout, Duration::from_secs(2));
    /// # Ok::<(), HttpError>(())
    /// ```
    pub fn with_timeout(mut self, dur: Duration) -> Self {
        self.default_timeout = dur;
        self
    }

    /// Resolve `path` against the base URL, or take it verbatim when
    /// `allow_absolute` is set and it parses as an absolute URL.
    ///
    /// ```
    /// use bakecast_http::HttpClient;
    ///
    /// let client = HttpClient::new("https://api.example.com/v1/").unwrap();
    /// let url = client.resolve("items", false).unwrap();
    /// assert_eq!(url.as_str(), "https://api.example.com/v1/items");
    /// let abs = client.resolve("https://cdn.example.com/a.jpg", true).unwrap();
    /// assert_eq!(abs.host_str(), Some("cdn.example.com"));
    /// ```
    pub fn resolve(&self, path: &str, allow_absolute: bool) -> Result<Url, HttpError> {
        if allow_absolute {
            if let Ok(abs) = Url::parse(path) {
                return Ok(abs);
            }
        }
        self.base
            .join(path)
            .map_err(|e| HttpError::Url(e.to_string()))
    }

    /// GET JSON with per-request options (query/auth).
    pub async fn get_json<T>(&self, path: &str, opts: RequestOpts<'_>) -> Result<T, HttpError>
    where
        T: DeserializeOwned,
    {
        let (req_id, bytes) = self.execute(Method::GET, path, Payload::Empty, opts).await?;
        decode_json(&req_id, &bytes)
    }

    /// GET a raw body (images and other binary media).
    pub async fn get_bytes(&self, path: &str, opts: RequestOpts<'_>) -> Result<Bytes, HttpError> {
        let (_, bytes) = self.execute(Method::GET, path, Payload::Empty, opts).await?;
        Ok(bytes)
    }

    /// POST JSON with per-request options (query/auth).
    pub async fn post_json_opts<B, T>(
        &self,
        path: &str,
        body: &B,
        opts: RequestOpts<'_>,
    ) -> Result<T, HttpError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let bytes = serde_json::to_vec(body).map_err(|e| HttpError::Build(e.to_string()))?;
        let (req_id, bytes) = self
            .execute(Method::POST, path, Payload::Json(bytes), opts)
            .await?;
        decode_json(&req_id, &bytes)
    }

    /// POST a `multipart/form-data` body and decode a JSON response.
    pub async fn post_multipart<T>(
        &self,
        path: &str,
        form: Form,
        opts: RequestOpts<'_>,
    ) -> Result<T, HttpError>
    where
        T: DeserializeOwned,
    {
        let (req_id, bytes) = self
            .execute(Method::POST, path, Payload::Multipart(form), opts)
            .await?;
        decode_json(&req_id, &bytes)
    }

    // ==============================
    // Core request implementation
    // ==============================

    async fn execute(
        &self,
        method: Method,
        path: &str,
        payload: Payload,
        opts: RequestOpts<'_>,
    ) -> Result<(String, Bytes), HttpError> {
        let url = self.resolve(path, opts.allow_absolute)?;
        let mut rb = self.inner.request(method.clone(), url.clone());

        let timeout = self.default_timeout;
        rb = rb.timeout(timeout);

        let query: Vec<(&str, Cow<'_, str>)> = opts.query.clone().unwrap_or_default();
        if !query.is_empty() {
            let pairs: Vec<(&str, &str)> = query.iter().map(|(k, v)| (*k, v.as_ref())).collect();
            rb = rb.query(&pairs);
        }

        let has_body = payload.is_present();
        let mut raw_body: Option<Vec<u8>> = None;
        match payload {
            Payload::Empty => {}
            Payload::Json(bytes) => {
                raw_body = Some(bytes.clone());
                rb = rb
                    .header(reqwest::header::CONTENT_TYPE, "application/json")
                    .body(bytes);
            }
            Payload::Multipart(form) => {
                rb = rb.multipart(form);
            }
        }

        let mut merged = HeaderMap::new();
        if let Some(auth) = &opts.auth {
            merged.insert(AUTHORIZATION, auth.value().clone());
        }
        rb = rb.headers(merged.clone());

        // ----- Safe request logging (pre-send) -----
        let signed = opts.auth.is_some();
        let redacted_q: Vec<(String, String)> = query
            .iter()
            .map(|(k, v)| {
                let v = if is_secret_key(k) {
                    "<redacted>".to_string()
                } else {
                    v.to_string()
                };
                ((*k).to_string(), v)
            })
            .collect();

        // Lightweight request id without extra deps
        let req_id = format!(
            "r{:x}",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        );

        tracing::debug!(
            req_id=%req_id,
            method=%method,
            host_path=%format!("{}{}", url.host_str().unwrap_or("-"), url.path()),
            query=?redacted_q,
            timeout_ms=timeout.as_millis() as u64,
            signed,
            has_body,
            "http.request.start"
        );

        if raw_enabled() {
            let mut full = url.clone();
            if !query.is_empty() {
                let mut qp = full.query_pairs_mut();
                for (k, v) in &query {
                    qp.append_pair(k, v);
                }
            }
            let curl = make_curl(&method, &full, &merged, raw_body.as_deref());
            tracing::debug!(target: "http.raw", %req_id, %curl, "request");
        }

        // ----- Send -----
        let t0 = std::time::Instant::now();
        let resp = rb.send().await.map_err(|err| {
            let message = err.to_string();
            tracing::warn!(req_id=%req_id, message=%message, "http.network_error.send");
            HttpError::Network(message)
        })?;
        let status = resp.status();
        let headers = resp.headers().clone();
        let bytes = resp.bytes().await.map_err(|err| {
            let message = err.to_string();
            tracing::warn!(req_id=%req_id, message=%message, "http.network_error.body");
            HttpError::Network(message)
        })?;
        let dur_ms = t0.elapsed().as_millis() as u64;

        let req_hdr_id = headers
            .get("x-request-id")
            .or_else(|| headers.get("x-correlation-id"))
            .or_else(|| headers.get("x-transaction-id"))
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");
        let content_type = headers
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");

        tracing::debug!(
            req_id=%req_id,
            %status,
            duration_ms=dur_ms,
            body_len=bytes.len(),
            content_type=%content_type,
            x_request_id=%req_hdr_id,
            "http.response.headers"
        );

        if raw_enabled() {
            let hdrs = redact_headers(&headers);
            let truncated = bytes.len() > RAW_MAX_BODY;
            let shown = &bytes[..bytes.len().min(RAW_MAX_BODY)];
            let text = String::from_utf8_lossy(shown);
            tracing::info!(
                target: "http.raw",
                %req_id,
                status=%status,
                duration_ms=dur_ms,
                headers=?hdrs,
                body=%text,
                truncated
            );
        }

        if status.is_success() {
            return Ok((req_id, bytes));
        }

        let message = extract_error_message(&bytes);
        let request_id = req_hdr_id.to_string();
        tracing::warn!(
            req_id=%req_id,
            %status,
            message=%message,
            x_request_id=%request_id,
            body_snippet=%snip_body(&bytes),
            "http.error"
        );
        Err(HttpError::Api {
            status,
            message,
            request_id,
        })
    }
}

fn decode_json<T: DeserializeOwned>(req_id: &str, bytes: &[u8]) -> Result<T, HttpError> {
    serde_json::from_slice::<T>(bytes).map_err(|e| {
        let snippet = snip_body(bytes);
        tracing::warn!(
            req_id=%req_id,
            serde_line=%e.line(),
            serde_col=%e.column(),
            serde_err=%e.to_string(),
            body_snippet=%snippet,
            "http.response.decode_error"
        );
        HttpError::Decode(e.to_string(), snippet)
    })
}
