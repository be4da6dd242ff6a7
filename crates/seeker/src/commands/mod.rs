//! CLI command handlers.

use std::io::IsTerminal;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context as _, Result};
use seeker_auth::{
    FileCredentialStore, NonInteractivePrompt, StaticTokenPrompt, TokenManager, TokenPrompt,
};
use seeker_client::SeekerClient;

use crate::prompt::TerminalPrompt;

pub mod auth;
pub mod call;
pub mod ping;
pub mod search;
pub mod tools;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Service base URL.
    pub server_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Token supplied on the command line or via `SEEKER_TOKEN`.
    pub token: Option<String>,
    /// Output as JSON for scripting.
    pub json_output: bool,
    /// Verbose output enabled.
    pub verbose: bool,
}

impl Context {
    /// Token manager backed by the credential file in the config directory.
    pub fn token_manager(&self) -> Result<Arc<TokenManager>> {
        let path = seeker_config::credentials_path()
            .ok_or(seeker_config::ConfigError::NoConfigDir)?;
        let store = Arc::new(FileCredentialStore::new(path));
        Ok(Arc::new(TokenManager::new(store, self.prompt())))
    }

    /// Client for the configured service.
    pub fn client(&self) -> Result<SeekerClient> {
        let client = SeekerClient::builder()
            .base_url(&self.server_url)
            .timeout(self.timeout)
            .token_manager(self.token_manager()?)
            .build()
            .with_context(|| format!("Failed to create client for {}", self.server_url))?;
        Ok(client)
    }

    fn prompt(&self) -> Arc<dyn TokenPrompt> {
        match &self.token {
            Some(token) => Arc::new(StaticTokenPrompt::new(token.clone())),
            None if std::io::stdin().is_terminal() => Arc::new(TerminalPrompt),
            None => Arc::new(NonInteractivePrompt),
        }
    }
}
