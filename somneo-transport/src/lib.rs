//! Private JSON transport for Somneo device communication
//!
//! This crate provides a minimal HTTP client for the wake-up light's local
//! REST API. Every endpoint lives under `https://{host}/di/v1/products/1/`
//! and speaks JSON in both directions.
//!
//! The device serves a self-signed certificate, so certificate verification
//! is disabled by default. Connection failures are retried according to a
//! bounded [`RetryPolicy`]; timeouts and HTTP 422 rejections are not.

mod config;
mod error;

pub use config::{RetryPolicy, TransportConfig};
pub use error::TransportError;

use std::io::ErrorKind;

use reqwest::blocking::{Client, Response};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::{debug, error, warn};
use url::Url;

/// Product-scoped path every endpoint is relative to
pub const BASE_PATH: &str = "di/v1/products/1/";

/// Result type for transport operations
pub type Result<T> = std::result::Result<T, TransportError>;

/// Request/response seam between the SDK and the device
///
/// Implementations issue one request per call and block until the device
/// answers or the request fails.
pub trait Transport {
    /// Fetch the JSON document at `path`
    fn get(&self, path: &str) -> Result<Value>;

    /// Write `payload` to `path` and return the device's JSON answer
    fn put(&self, path: &str, payload: &Value) -> Result<Value>;
}

/// How a single failed attempt should be handled
enum Failure {
    Timeout,
    Connect(String),
    Rejected(String),
    Decode(String),
    Other(String),
}

impl From<reqwest::Error> for Failure {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Failure::Timeout
        } else if err.is_connect() {
            Failure::Connect(err.to_string())
        } else {
            Failure::Other(err.to_string())
        }
    }
}

impl Failure {
    /// Classify an error from sending a request, before any response arrived
    ///
    /// A connection the device accepts and then resets or closes counts as a
    /// connection failure, the same as a refused one.
    fn from_send(err: reqwest::Error) -> Self {
        if !err.is_timeout() && err.is_request() && is_dropped_connection(&err) {
            return Failure::Connect(err.to_string());
        }
        Failure::from(err)
    }
}

fn is_dropped_connection(err: &(dyn std::error::Error + 'static)) -> bool {
    let mut source = Some(err);
    while let Some(err) = source {
        if let Some(io) = err.downcast_ref::<std::io::Error>() {
            if matches!(
                io.kind(),
                ErrorKind::ConnectionReset
                    | ErrorKind::ConnectionAborted
                    | ErrorKind::BrokenPipe
                    | ErrorKind::UnexpectedEof
            ) {
                return true;
            }
        }
        if let Some(hyper) = err.downcast_ref::<hyper::Error>() {
            if hyper.is_closed() || hyper.is_incomplete_message() || hyper.is_canceled() {
                return true;
            }
        }
        source = err.source();
    }
    false
}

/// Blocking HTTPS transport for a single device
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
    retry: RetryPolicy,
}

impl HttpTransport {
    /// Create a transport for the device at `host` (IP address or hostname)
    pub fn new(host: &str, config: TransportConfig) -> Result<Self> {
        let base_url = Url::parse(&format!("https://{}/{}", host, BASE_PATH))?;
        Self::with_base_url(base_url, config)
    }

    /// Create a transport against an explicit base URL
    ///
    /// The base must end with `/` for relative paths to be appended to it.
    pub fn with_base_url(base_url: Url, config: TransportConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| TransportError::RequestFailed(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            retry: config.retry,
        })
    }

    /// The base URL every path is joined onto
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a relative endpoint path against the base URL
    pub fn url_for(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    fn request(&self, method: Method, path: &str, payload: Option<&Value>) -> Result<Value> {
        let url = self.url_for(path)?;
        let body = payload.map(|p| p.to_string());
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            debug!(%method, %url, attempt, "Sending request");

            match self.send_once(method.clone(), url.clone(), body.as_deref()) {
                Ok(value) => return Ok(value),
                Err(Failure::Timeout) => {
                    error!(%url, "Connection to device timed out");
                    return Err(TransportError::Timeout);
                }
                Err(Failure::Connect(message)) => {
                    if attempt > self.retry.max_retries {
                        error!(%url, attempt, "Giving up on unreachable device: {}", message);
                        return Err(TransportError::ConnectionFailure {
                            attempts: attempt,
                            message,
                        });
                    }
                    let delay = self.retry.delay_for_attempt(attempt);
                    warn!(%url, attempt, ?delay, "Connection failed, retrying: {}", message);
                    if !delay.is_zero() {
                        std::thread::sleep(delay);
                    }
                }
                Err(Failure::Rejected(body)) => {
                    error!(%url, "Invalid request. {}", body);
                    return Err(TransportError::InvalidRequest { body });
                }
                Err(Failure::Decode(message)) => {
                    return Err(TransportError::Decode(message));
                }
                Err(Failure::Other(message)) => {
                    error!(%url, "Error connecting to device: {}", message);
                    return Err(TransportError::RequestFailed(message));
                }
            }
        }
    }

    fn send_once(
        &self,
        method: Method,
        url: Url,
        body: Option<&str>,
    ) -> std::result::Result<Value, Failure> {
        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request
                .header(CONTENT_TYPE, "application/json")
                .body(body.to_string());
        }

        let response = request.send().map_err(Failure::from_send)?;
        Self::decode(response)
    }

    fn decode(response: Response) -> std::result::Result<Value, Failure> {
        let status = response.status();
        let text = response.text()?;

        if status == StatusCode::UNPROCESSABLE_ENTITY {
            return Err(Failure::Rejected(text));
        }

        parse_body(&text).map_err(Failure::Decode)
    }
}

impl Transport for HttpTransport {
    fn get(&self, path: &str) -> Result<Value> {
        self.request(Method::GET, path, None)
    }

    fn put(&self, path: &str, payload: &Value) -> Result<Value> {
        self.request(Method::PUT, path, Some(payload))
    }
}

/// Parse a response body, treating an empty body as `null`
pub fn parse_body(text: &str) -> std::result::Result<Value, String> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|e| e.to_string())
}
