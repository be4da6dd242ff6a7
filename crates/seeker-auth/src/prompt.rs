//! Interactive token acquisition strategies.

use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;

/// Asks someone for an access token.
///
/// Returning `None` means no token is available (cancelled, no terminal,
/// input error). The token manager treats blank answers the same way.
#[async_trait]
pub trait TokenPrompt: Send + Sync + std::fmt::Debug {
    async fn request_token(&self) -> Option<String>;
}

/// Never yields a token. For non-interactive runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct NonInteractivePrompt;

#[async_trait]
impl TokenPrompt for NonInteractivePrompt {
    async fn request_token(&self) -> Option<String> {
        tracing::debug!("interactive token prompt disabled");
        None
    }
}

/// Answers every prompt with a fixed value and counts how often it was asked.
#[derive(Debug)]
pub struct StaticTokenPrompt {
    token: Option<String>,
    prompt_count: AtomicU32,
}

impl StaticTokenPrompt {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            prompt_count: AtomicU32::new(0),
        }
    }

    /// A prompt that is always declined.
    pub fn declined() -> Self {
        Self {
            token: None,
            prompt_count: AtomicU32::new(0),
        }
    }

    pub fn prompt_count(&self) -> u32 {
        self.prompt_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenPrompt for StaticTokenPrompt {
    async fn request_token(&self) -> Option<String> {
        self.prompt_count.fetch_add(1, Ordering::SeqCst);
        self.token.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_prompt_counts() {
        let prompt = StaticTokenPrompt::new("tok");
        assert_eq!(prompt.request_token().await.as_deref(), Some("tok"));
        assert_eq!(prompt.request_token().await.as_deref(), Some("tok"));
        assert_eq!(prompt.prompt_count(), 2);
    }

    #[tokio::test]
    async fn test_declined_and_non_interactive() {
        assert!(StaticTokenPrompt::declined().request_token().await.is_none());
        assert!(NonInteractivePrompt.request_token().await.is_none());
    }
}
