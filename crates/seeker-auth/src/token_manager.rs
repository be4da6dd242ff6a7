//! Credential lifecycle.
//!
//! The manager moves between two states:
//!
//! ```text
//!   Unauthenticated ──acquire()──▶ Authenticated(expiry)
//!         ▲                             │
//!         └──────clear() / release()────┘
//! ```
//!
//! Expiry is checked lazily: nothing happens when the clock passes the
//! expiry, the next `acquire()` notices and re-prompts.

use std::sync::Arc;

use reqwest::RequestBuilder;
use tokio::sync::RwLock;

use crate::credential::{Clock, Credential, SystemClock, TokenInfo};
use crate::error::{AuthError, Result};
use crate::prompt::TokenPrompt;
use crate::store::CredentialStore;

/// Store key holding the bearer token.
pub const TOKEN_KEY: &str = "access_token";

/// Store key holding the expiry, epoch milliseconds as a decimal string.
pub const EXPIRY_KEY: &str = "token_expiry";

/// Lifetime stamped on a freshly acquired token (1 hour).
pub const TOKEN_TTL_MS: i64 = 60 * 60 * 1000;

/// Observable authentication state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    Authenticated { expires_at_ms: i64 },
}

/// Owns the single active bearer credential.
#[derive(Debug)]
pub struct TokenManager {
    store: Arc<dyn CredentialStore>,
    prompt: Arc<dyn TokenPrompt>,
    clock: Arc<dyn Clock>,
    current: RwLock<Option<Credential>>,
}

impl TokenManager {
    /// Create a manager using the wall clock.
    pub fn new(store: Arc<dyn CredentialStore>, prompt: Arc<dyn TokenPrompt>) -> Self {
        Self::with_clock(store, prompt, Arc::new(SystemClock))
    }

    /// Create a manager with an explicit clock.
    pub fn with_clock(
        store: Arc<dyn CredentialStore>,
        prompt: Arc<dyn TokenPrompt>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            prompt,
            clock,
            current: RwLock::new(None),
        }
    }

    /// Get a usable credential, prompting if none is stored or it expired.
    pub async fn acquire(&self) -> Result<Credential> {
        let now = self.clock.now_ms();

        {
            let current = self.current.read().await;
            if let Some(credential) = current.as_ref()
                && credential.is_valid_at(now)
            {
                return Ok(credential.clone());
            }
        }

        if let Some(credential) = self.load_stored(now).await? {
            tracing::debug!(
                expires_at_ms = credential.expires_at_ms(),
                "using stored access token"
            );
            *self.current.write().await = Some(credential.clone());
            return Ok(credential);
        }

        self.acquire_interactively().await
    }

    /// Remove the persisted credential and forget the in-memory one.
    ///
    /// Safe to call when nothing is stored.
    pub async fn clear(&self) -> Result<()> {
        self.store.remove(TOKEN_KEY).await?;
        self.store.remove(EXPIRY_KEY).await?;
        self.release().await;
        tracing::info!("access token cleared");
        Ok(())
    }

    /// Forget the in-memory credential, leaving persisted state alone.
    pub async fn release(&self) {
        *self.current.write().await = None;
    }

    /// Set the bearer header if a credential is held.
    pub async fn attach(&self, request: RequestBuilder) -> RequestBuilder {
        match self.current.read().await.as_ref() {
            Some(credential) => request.bearer_auth(credential.token()),
            None => request,
        }
    }

    /// Current in-memory state.
    pub async fn state(&self) -> AuthState {
        match self.current.read().await.as_ref() {
            Some(credential) => AuthState::Authenticated {
                expires_at_ms: credential.expires_at_ms(),
            },
            None => AuthState::Unauthenticated,
        }
    }

    /// Whether a credential is held in memory.
    pub async fn is_authenticated(&self) -> bool {
        matches!(self.state().await, AuthState::Authenticated { .. })
    }

    /// Expiry information for the persisted credential, without prompting.
    pub async fn token_info(&self) -> Result<Option<TokenInfo>> {
        let token = self.store.get(TOKEN_KEY).await?;
        let expiry = self.store.get(EXPIRY_KEY).await?;
        let now = self.clock.now_ms();

        Ok(match (token, expiry) {
            (Some(token), Some(expiry)) => {
                Credential::from_stored(&token, &expiry).map(|c| c.info_at(now))
            }
            _ => None,
        })
    }

    /// Read the persisted credential, discarding it if expired or malformed.
    async fn load_stored(&self, now: i64) -> Result<Option<Credential>> {
        let token = self.store.get(TOKEN_KEY).await?;
        let expiry = self.store.get(EXPIRY_KEY).await?;

        let (token, expiry) = match (token, expiry) {
            (None, None) => return Ok(None),
            (Some(token), Some(expiry)) => (token, expiry),
            _ => {
                tracing::warn!("incomplete stored credential, discarding");
                self.clear().await?;
                return Ok(None);
            }
        };

        match Credential::from_stored(&token, &expiry) {
            Some(credential) if credential.is_valid_at(now) => Ok(Some(credential)),
            Some(credential) => {
                tracing::info!(
                    expires_at_ms = credential.expires_at_ms(),
                    "stored access token expired"
                );
                self.clear().await?;
                Ok(None)
            }
            None => {
                tracing::warn!("stored credential is malformed, discarding");
                self.clear().await?;
                Ok(None)
            }
        }
    }

    async fn acquire_interactively(&self) -> Result<Credential> {
        tracing::debug!("prompting for access token");

        let answer = self.prompt.request_token().await;
        let token = answer
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AuthError::auth_required("no access token provided"))?;

        let expires_at_ms = self.clock.now_ms() + TOKEN_TTL_MS;
        let credential = Credential::new(token, expires_at_ms);

        self.store.set(TOKEN_KEY, credential.token()).await?;
        self.store
            .set(EXPIRY_KEY, &expires_at_ms.to_string())
            .await?;
        *self.current.write().await = Some(credential.clone());

        tracing::info!(expires_at_ms, "access token acquired");
        Ok(credential)
    }
}
