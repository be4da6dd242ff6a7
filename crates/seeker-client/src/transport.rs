//! HTTP transport for JSON-RPC calls.
//!
//! Every call is a single POST to `<base_url>/mcp`. There is no retry: a
//! failed request is reported to the caller as a transport error.

use std::time::Duration;

use reqwest::RequestBuilder;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use url::Url;

use crate::error::{Error, Result};
use crate::protocol::JsonRpcRequest;

/// Path of the JSON-RPC endpoint below the base URL.
pub const RPC_PATH: &str = "mcp";

/// Accepted response types: plain JSON or an event stream.
const ACCEPT_RPC: &str = "application/json, text/event-stream";

/// Longest body excerpt quoted in a transport error.
const MAX_ERROR_BODY: usize = 200;

/// POSTs JSON-RPC requests and returns raw response bodies.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    root: Url,
    endpoint: Url,
    timeout: Duration,
}

impl HttpTransport {
    /// Create a transport for the service rooted at `base_url`.
    pub fn new(base_url: &str, timeout: Duration, user_agent: &str) -> Result<Self> {
        let mut root = Url::parse(base_url)
            .map_err(|e| Error::Config(format!("invalid base URL '{}': {}", base_url, e)))?;
        if !root.path().ends_with('/') {
            root.set_path(&format!("{}/", root.path()));
        }
        let endpoint = root
            .join(RPC_PATH)
            .map_err(|e| Error::Config(format!("invalid endpoint URL: {}", e)))?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(user_agent)
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {}", e)))?;

        tracing::debug!(
            endpoint = %endpoint,
            timeout_secs = timeout.as_secs(),
            "created HTTP transport"
        );

        Ok(Self {
            http,
            root,
            endpoint,
            timeout,
        })
    }

    /// Service root (base URL with a trailing slash).
    pub fn root(&self) -> &Url {
        &self.root
    }

    /// JSON-RPC endpoint URL.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Build the POST for a JSON-RPC request, without credentials.
    pub fn rpc_request(&self, request: &JsonRpcRequest) -> RequestBuilder {
        self.http
            .post(self.endpoint.clone())
            .header(ACCEPT, ACCEPT_RPC)
            .json(request)
            .timeout(self.timeout)
    }

    /// Send a prepared request and return the body of a 2xx response.
    pub async fn send(&self, request: RequestBuilder) -> Result<String> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!(url = %self.endpoint, error = %e, "request failed");
            Error::from(e)
        })?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "server returned error status");
            return Err(Error::transport(
                Some(status.as_u16()),
                http_cause(status, &body),
            ));
        }

        let body = response.text().await.map_err(|e| {
            Error::transport(
                Some(status.as_u16()),
                format!("failed to read response body: {}", e),
            )
        })?;

        tracing::trace!(
            status = status.as_u16(),
            content_type = %content_type,
            body = %body,
            "received response"
        );

        Ok(body)
    }

    /// Bare GET against the service root. Succeeds on any 2xx.
    pub async fn ping(&self) -> Result<()> {
        let response = self
            .http
            .get(self.root.clone())
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Error::transport(
                Some(status.as_u16()),
                format!("service root answered {}", status),
            ))
        }
    }
}

fn http_cause(status: reqwest::StatusCode, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return format!("server answered {}", status);
    }
    let excerpt: String = body.chars().take(MAX_ERROR_BODY).collect();
    format!("server answered {}: {}", status, excerpt)
}
