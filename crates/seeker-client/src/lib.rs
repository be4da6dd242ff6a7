//! Client for the Seeker remote tool service.
//!
//! Invokes tools over JSON-RPC 2.0 and normalizes the service's response
//! dialects into a flat list of [`ResultRecord`]s.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  SeekerClient                                               │
//! │  - invoke_tool, search, list_tools, test_connection         │
//! │  - acquires a credential from the TokenManager per call     │
//! └─────────────────────────────────────────────────────────────┘
//!                           │
//!                           ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  HttpTransport                                              │
//! │  - single POST to <base_url>/mcp, 30s timeout, no retries   │
//! └─────────────────────────────────────────────────────────────┘
//!                           │
//!                           ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  normalize                                                  │
//! │  - classify: Plain | Stream | Error                         │
//! │  - resolve_payload: result / SSE data / double-encoded text │
//! │  - extract_results: results → data.results → [..] → single  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! let client = SeekerClient::builder()
//!     .base_url("https://search.example.com")
//!     .token_manager(tokens)
//!     .build()?;
//!
//! let results = client.search("vector databases").await?;
//! let tools = client.list_tools().await?;
//! let ok = client.test_connection().await;
//! ```

pub mod client;
pub mod error;
pub mod normalize;
pub mod protocol;
pub mod transport;
pub mod types;

pub use client::{ClientBuilder, SeekerClient};
pub use error::{Error, Result};
pub use normalize::{PayloadShape, RawResponse, classify, extract_results, normalize, resolve_payload};
pub use protocol::{CallToolParams, JsonRpcError, JsonRpcRequest, ListToolsResult, ToolInfo};
pub use transport::{HttpTransport, RPC_PATH};
pub use types::{DEFAULT_SEARCH_TYPE, ResultRecord};
