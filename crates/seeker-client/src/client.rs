//! Main client implementation.

use std::sync::Arc;
use std::time::Duration;

use seeker_auth::TokenManager;
use serde_json::{Map, Value, json};

use crate::error::{Error, Result};
use crate::normalize::{classify, extract_results, resolve_payload};
use crate::protocol::{CallToolParams, JsonRpcRequest, ListToolsResult, METHOD_LIST_TOOLS, ToolInfo};
use crate::transport::HttpTransport;
use crate::types::{DEFAULT_SEARCH_TYPE, ResultRecord};

/// Default timeout for requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// JSON-RPC id sent with every request. Calls are strictly request/response.
const REQUEST_ID: u64 = 1;

/// Name of the remote search tool.
const SEARCH_TOOL: &str = "search";

/// Query used by [`SeekerClient::test_connection`].
const PROBE_QUERY: &str = "test";

/// Client for the remote tool service.
///
/// Cheap to clone; clones share the transport and the token manager.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use seeker_auth::{MemoryCredentialStore, StaticTokenPrompt, TokenManager};
/// use seeker_client::SeekerClient;
///
/// # async fn example() -> seeker_client::Result<()> {
/// let tokens = Arc::new(TokenManager::new(
///     Arc::new(MemoryCredentialStore::new()),
///     Arc::new(StaticTokenPrompt::new("my-token")),
/// ));
/// let client = SeekerClient::builder()
///     .base_url("http://localhost:8000")
///     .token_manager(tokens)
///     .build()?;
///
/// for record in client.search("rust async").await? {
///     println!("{:?} {:?}", record.score, record.content);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SeekerClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    transport: HttpTransport,
    tokens: Arc<TokenManager>,
}

impl SeekerClient {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// JSON-RPC endpoint this client posts to.
    pub fn endpoint(&self) -> &url::Url {
        self.inner.transport.endpoint()
    }

    /// The token manager backing this client.
    pub fn token_manager(&self) -> &Arc<TokenManager> {
        &self.inner.tokens
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Tool calls
    // ─────────────────────────────────────────────────────────────────────────

    /// Invoke a remote tool and normalize its output to records.
    pub async fn invoke_tool(
        &self,
        name: &str,
        arguments: Map<String, Value>,
    ) -> Result<Vec<ResultRecord>> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidRequest("tool name must not be empty".to_string()));
        }

        let request = CallToolParams::new(name, arguments).into_request(REQUEST_ID);
        let payload = self.call(request).await?;
        let results = extract_results(payload)?;

        tracing::debug!(tool = %name, count = results.len(), "tool call succeeded");
        Ok(results)
    }

    /// Run the `search` tool with the default search type.
    ///
    /// No matches is an empty vector, not an error.
    pub async fn search(&self, text: &str) -> Result<Vec<ResultRecord>> {
        self.search_with_type(text, DEFAULT_SEARCH_TYPE).await
    }

    /// Run the `search` tool with an explicit search type.
    pub async fn search_with_type(
        &self,
        text: &str,
        search_type: &str,
    ) -> Result<Vec<ResultRecord>> {
        let arguments = match json!({ "search_text": text, "search_type": search_type }) {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        self.invoke_tool(SEARCH_TOOL, arguments).await
    }

    /// List the tools the service exposes.
    pub async fn list_tools(&self) -> Result<Vec<ToolInfo>> {
        let request = JsonRpcRequest::new(REQUEST_ID, METHOD_LIST_TOOLS, None);
        let payload = self.call(request).await?;

        let list: ListToolsResult = serde_json::from_value(payload)
            .map_err(|e| Error::malformed(format!("unexpected tools/list payload: {}", e)))?;

        tracing::debug!(tool_count = list.tools.len(), "listed tools");
        Ok(list.tools)
    }

    /// Check whether the service is usable.
    ///
    /// Tries a trivial search, then a bare GET of the service root. Never
    /// fails: every error is reported as `false`.
    pub async fn test_connection(&self) -> bool {
        let search_error = match self.search(PROBE_QUERY).await {
            Ok(_) => return true,
            Err(e) => e,
        };
        tracing::debug!(error = %search_error, "probe search failed, pinging service root");

        match self.inner.transport.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(error = %e, "service root unreachable");
                false
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Authentication
    // ─────────────────────────────────────────────────────────────────────────

    /// Make sure a credential is available, prompting if needed.
    pub async fn initialize_auth(&self) -> Result<()> {
        self.inner.tokens.acquire().await?;
        Ok(())
    }

    /// Forget the credential, persisted copy included.
    pub async fn clear_auth(&self) -> Result<()> {
        self.inner.tokens.clear().await?;
        Ok(())
    }

    /// Release the in-memory credential. No network effect.
    pub async fn close(&self) {
        self.inner.tokens.release().await;
    }

    /// Whether a credential is currently held.
    pub async fn is_authenticated(&self) -> bool {
        self.inner.tokens.is_authenticated().await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internal
    // ─────────────────────────────────────────────────────────────────────────

    /// Authenticate, send, classify, and unwrap to the payload value.
    async fn call(&self, request: JsonRpcRequest) -> Result<Value> {
        self.inner.tokens.acquire().await?;

        let builder = self.inner.transport.rpc_request(&request);
        let builder = self.inner.tokens.attach(builder).await;
        let body = self.inner.transport.send(builder).await?;

        let raw = classify(&body);
        tracing::debug!(method = %request.method, shape = raw.kind(), "classified response");
        resolve_payload(raw)
    }
}

/// Builder for creating a [`SeekerClient`].
#[derive(Debug)]
pub struct ClientBuilder {
    base_url: Option<String>,
    timeout: Duration,
    token_manager: Option<Arc<TokenManager>>,
    user_agent: Option<String>,
}

impl ClientBuilder {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self {
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
            token_manager: None,
            user_agent: None,
        }
    }

    /// Set the base URL of the service.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the token manager that supplies credentials.
    pub fn token_manager(mut self, tokens: Arc<TokenManager>) -> Self {
        self.token_manager = Some(tokens);
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<SeekerClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| Error::Config("base_url is required".to_string()))?;
        let tokens = self
            .token_manager
            .ok_or_else(|| Error::Config("token_manager is required".to_string()))?;

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("seeker-client/{}", env!("CARGO_PKG_VERSION")));

        let transport = HttpTransport::new(&base_url, self.timeout, &user_agent)?;

        Ok(SeekerClient {
            inner: Arc::new(ClientInner { transport, tokens }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
