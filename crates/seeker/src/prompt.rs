//! Terminal token prompt.

use async_trait::async_trait;
use seeker_auth::TokenPrompt;

const PROMPT: &str = "Access token: ";

/// Reads an access token from the terminal without echoing it.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompt;

#[async_trait]
impl TokenPrompt for TerminalPrompt {
    async fn request_token(&self) -> Option<String> {
        match tokio::task::spawn_blocking(|| rpassword::prompt_password(PROMPT)).await {
            Ok(Ok(token)) => Some(token),
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "failed to read access token");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "token prompt task failed");
                None
            }
        }
    }
}
